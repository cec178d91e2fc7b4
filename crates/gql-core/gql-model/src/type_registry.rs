// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A get-or-create store of constructed types.
//!
//! Like `MappedArena::add`, creating an entry under a name that is already present keeps the
//! existing entry. Entries are never replaced or evicted, so a type handed out once stays the
//! type for that name as long as the registry lives.

use std::sync::Arc;

use elsa::sync::FrozenMap;

use crate::named_type::NamedType;

pub struct TypeRegistry {
    // `Box` provides the stable address `FrozenMap` needs to hand out references
    entities: FrozenMap<String, Box<Arc<NamedType>>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            entities: FrozenMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<NamedType>> {
        self.entities.get(name).cloned()
    }

    /// Store `typ` under `name` unless something is already there. Returns the stored type, which
    /// is the earlier one on conflict.
    pub fn create(&self, name: &str, typ: Arc<NamedType>) -> Arc<NamedType> {
        self.entities
            .insert(name.to_string(), Box::new(typ))
            .clone()
    }

    /// Return the type stored under `name`, building it with `build` if absent.
    ///
    /// No lock is held while `build` runs, so it may itself look up or create other entries.
    pub fn get_or_create_with<E>(
        &self,
        name: &str,
        build: impl FnOnce() -> Result<NamedType, E>,
    ) -> Result<Arc<NamedType>, E> {
        match self.get(name) {
            Some(existing) => Ok(existing),
            None => Ok(self.create(name, Arc::new(build()?))),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.get(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn absent_before_create() {
        let registry = TypeRegistry::new();
        assert!(registry.get("X").is_none());
        assert!(!registry.contains("X"));
    }

    #[test]
    fn first_create_wins() {
        let registry = TypeRegistry::new();
        let a = Arc::new(NamedType::scalar("X"));
        let b = Arc::new(NamedType::scalar("X").with_description("second"));

        let first = registry.create("X", a.clone());
        let second = registry.create("X", b);

        assert!(Arc::ptr_eq(&first, &a));
        assert!(Arc::ptr_eq(&second, &a));
        assert!(Arc::ptr_eq(&registry.get("X").unwrap(), &a));
        assert_eq!(second.description(), None);
    }

    #[test]
    fn build_runs_only_when_absent() {
        let registry = TypeRegistry::new();
        let mut builds = 0;

        for _ in 0..3 {
            registry
                .get_or_create_with::<()>("DateTime", || {
                    builds += 1;
                    Ok(NamedType::scalar("DateTime"))
                })
                .unwrap();
        }

        assert_eq!(builds, 1);
    }

    #[test]
    fn build_may_create_other_entries() {
        let registry = TypeRegistry::new();

        let outer = registry
            .get_or_create_with::<()>("Outer", || {
                registry.create("Inner", Arc::new(NamedType::scalar("Inner")));
                Ok(NamedType::scalar("Outer"))
            })
            .unwrap();

        assert_eq!(outer.name(), "Outer");
        assert!(registry.contains("Inner"));
    }

    #[test]
    fn failed_build_leaves_no_entry() {
        let registry = TypeRegistry::new();

        let result = registry.get_or_create_with("Broken", || Err("boom"));

        assert_eq!(result.unwrap_err(), "boom");
        assert!(registry.get("Broken").is_none());
    }
}
