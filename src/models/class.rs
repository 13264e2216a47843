// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation classes and the active-class registry.
//!
//! Class ids are handed out sequentially in registration order and are
//! never reused, so an id always equals the index of its descriptor.

use crate::util::color::Color;
use serde::{Deserialize, Serialize};

pub type ClassId = u32;

/// A user-defined annotation class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub id: ClassId,
    pub name: String,
    pub color: Color,
}

/// Ordered set of classes plus the one new boxes are tagged with.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: Vec<ClassDescriptor>,
    active: Option<ClassId>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a class. The first class registered becomes active.
    pub fn register(&mut self, name: impl Into<String>, color: Color) -> ClassDescriptor {
        let descriptor = ClassDescriptor {
            id: self.classes.len() as ClassId,
            name: name.into(),
            color,
        };
        self.classes.push(descriptor.clone());

        if self.active.is_none() {
            self.active = Some(descriptor.id);
        }

        log::info!("Registered class {} '{}' ({})", descriptor.id, descriptor.name, descriptor.color);
        descriptor
    }

    /// Mark a class active. Unknown ids are ignored.
    pub fn set_active(&mut self, id: ClassId) {
        if self.get(id).is_some() {
            self.active = Some(id);
        } else {
            log::debug!("Ignoring unknown class id {}", id);
        }
    }

    pub fn active(&self) -> Option<&ClassDescriptor> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: ClassId) -> Option<&ClassDescriptor> {
        self.classes.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.classes.iter()
    }

    /// A colour that stands apart from the ones already handed out.
    pub fn suggest_color(&self) -> Color {
        Color::from_index(self.classes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_registration_order() {
        let mut registry = ClassRegistry::new();
        let names = ["persona", "vehiculo", "perro", "bici"];
        for name in names {
            registry.register(name, Color::rgb(1, 2, 3));
        }

        assert_eq!(registry.len(), names.len());
        let ids: Vec<ClassId> = registry.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        for (i, class) in registry.iter().enumerate() {
            assert_eq!(class.name, names[i]);
        }
    }

    #[test]
    fn test_first_class_is_active() {
        let mut registry = ClassRegistry::new();
        assert!(registry.active().is_none());

        registry.register("persona", Color::rgb(255, 0, 0));
        registry.register("vehiculo", Color::rgb(0, 255, 0));
        assert_eq!(registry.active().map(|c| c.id), Some(0));
    }

    #[test]
    fn test_set_active() {
        let mut registry = ClassRegistry::new();
        registry.register("persona", Color::rgb(255, 0, 0));
        registry.register("vehiculo", Color::rgb(0, 255, 0));

        registry.set_active(1);
        assert_eq!(registry.active().map(|c| c.name.as_str()), Some("vehiculo"));

        // Unknown id leaves the previous choice alone
        registry.set_active(7);
        assert_eq!(registry.active().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_set_active_on_empty_registry() {
        let mut registry = ClassRegistry::new();
        registry.set_active(0);
        assert!(registry.active().is_none());
        assert!(registry.is_empty());
    }
}
