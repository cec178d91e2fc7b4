// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, PoisonError, RwLock},
    thread::{self, ThreadId},
};

use tracing::debug;

use crate::{error::TypeLoadingError, named_type::NamedType, type_registry::TypeRegistry};

/// Builds the type registered under a name. Gets the loader so that it can look up the types it
/// depends on.
pub type TypeFactory =
    Arc<dyn Fn(&TypeLoader) -> Result<Arc<NamedType>, TypeLoadingError> + Send + Sync>;

/// Name-indexed factories for schema types.
///
/// Registering a name only promises that the type will exist; the factory runs when the type is
/// first loaded. The schema resolves every type reference through [`TypeLoader::load_type`].
///
/// A factory that ends up loading the type it is still building gets
/// [`TypeLoadingError::CyclicConstruction`]. Factories of types that refer to each other should
/// only name the other type (references are resolved by name), or load it from a type that does
/// not load them back.
#[derive(Default)]
pub struct TypeLoader {
    factories: RwLock<HashMap<String, TypeFactory>>,
    // Names whose factory is running, per thread (a schema may serve several requests at once)
    in_construction: Mutex<HashSet<(ThreadId, String)>>,
    registry: TypeRegistry,
}

impl TypeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry factories use to memoize what they build.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Register `factory` for `name`, replacing any earlier factory for that name.
    pub fn register_type(
        &self,
        name: &str,
        factory: impl Fn(&TypeLoader) -> Result<Arc<NamedType>, TypeLoadingError>
        + Send
        + Sync
        + 'static,
    ) {
        let previous = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), Arc::new(factory));

        if previous.is_some() {
            debug!(type_name = name, "Replaced type loader");
        }
    }

    /// Register a factory whose result gets memoized in [`Self::registry`], so every load of
    /// `name` returns the same object.
    pub fn register_cached_type(
        &self,
        name: &str,
        build: impl Fn(&TypeLoader) -> Result<NamedType, TypeLoadingError> + Send + Sync + 'static,
    ) {
        let type_name = name.to_string();
        self.register_type(name, move |loader| {
            loader
                .registry()
                .get_or_create_with(&type_name, || build(loader))
        });
    }

    pub fn load_type(&self, name: &str) -> Result<Arc<NamedType>, TypeLoadingError> {
        // Clone the factory out so the lock is released before it runs (factories load the
        // types they depend on through this same loader)
        let factory = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| TypeLoadingError::UnregisteredType(name.to_string()))?;

        let typ = {
            let _construction = ConstructionGuard::enter(self, name)?;
            factory(self)?
        };

        if typ.name() != name {
            return Err(TypeLoadingError::NameMismatch {
                requested: name.to_string(),
                built: typ.name().to_string(),
            });
        }

        Ok(typ)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names, sorted
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

/// Marks `name` as being built on the current thread until dropped.
struct ConstructionGuard<'a> {
    loader: &'a TypeLoader,
    key: (ThreadId, String),
}

impl<'a> ConstructionGuard<'a> {
    fn enter(loader: &'a TypeLoader, name: &str) -> Result<Self, TypeLoadingError> {
        let key = (thread::current().id(), name.to_string());

        let newly_entered = loader
            .in_construction
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone());

        if newly_entered {
            Ok(Self { loader, key })
        } else {
            Err(TypeLoadingError::CyclicConstruction(name.to_string()))
        }
    }
}

impl Drop for ConstructionGuard<'_> {
    fn drop(&mut self) {
        self.loader
            .in_construction
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{field, list_of, named};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use test_log::test;

    #[test]
    fn loads_registered_type() {
        let loader = TypeLoader::new();
        loader.register_type("Foo", |_| Ok(Arc::new(NamedType::scalar("Foo"))));

        assert_eq!(loader.load_type("Foo").unwrap().name(), "Foo");
        assert!(loader.is_registered("Foo"));
    }

    #[test]
    fn unregistered_type_fails() {
        let loader = TypeLoader::new();
        loader.register_type("Foo", |_| Ok(Arc::new(NamedType::scalar("Foo"))));

        assert_eq!(
            loader.load_type("Bar").unwrap_err(),
            TypeLoadingError::UnregisteredType("Bar".to_string())
        );
    }

    #[test]
    fn last_registration_wins() {
        let loader = TypeLoader::new();
        loader.register_type("Foo", |_| Ok(Arc::new(NamedType::scalar("Foo"))));
        loader.register_type("Foo", |_| {
            Ok(Arc::new(NamedType::scalar("Foo").with_description("plugin")))
        });

        assert_eq!(loader.load_type("Foo").unwrap().description(), Some("plugin"));
        assert_eq!(loader.registered_names(), vec!["Foo".to_string()]);
    }

    #[test]
    fn uncached_factories_run_on_every_load() {
        let loader = TypeLoader::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        loader.register_type("Foo", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(NamedType::scalar("Foo")))
        });

        let first = loader.load_type("Foo").unwrap();
        let second = loader.load_type("Foo").unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn cached_factories_return_a_stable_object() {
        let loader = TypeLoader::new();
        loader.register_cached_type("Foo", |_| Ok(NamedType::scalar("Foo")));

        let first = loader.load_type("Foo").unwrap();
        let second = loader.load_type("Foo").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&loader.registry().get("Foo").unwrap(), &first));
    }

    #[test]
    fn factories_can_load_mutually_referencing_types() {
        let loader = TypeLoader::new();

        // `Entry.children: [Block]` and `Block.owner: Entry`; each factory checks the other exists
        loader.register_cached_type("Entry", |loader| {
            loader.load_type("Block")?;
            Ok(NamedType::object(
                "Entry",
                &[],
                vec![field("children", list_of(named("Block")))],
            ))
        });
        loader.register_cached_type("Block", |loader| {
            if !loader.is_registered("Entry") {
                return Err(TypeLoadingError::UnregisteredType("Entry".to_string()));
            }
            Ok(NamedType::object("Block", &[], vec![field("owner", named("Entry"))]))
        });

        let entry = loader.load_type("Entry").unwrap();
        assert_eq!(entry.referenced_types(), vec!["Block"]);
        assert!(loader.registry().contains("Block"));
    }

    #[test]
    fn mutually_loading_factories_fail_instead_of_recursing() {
        let loader = TypeLoader::new();

        loader.register_cached_type("EntryInterface", |loader| {
            loader.load_type("news_article_Entry")?;
            Ok(NamedType::interface(
                "EntryInterface",
                vec![field("id", named("ID"))],
            ))
        });
        loader.register_cached_type("news_article_Entry", |loader| {
            let interface = loader.load_type("EntryInterface")?;
            Ok(NamedType::object(
                "news_article_Entry",
                &[interface.name()],
                vec![field("id", named("ID"))],
            ))
        });

        for _ in 0..2 {
            assert_eq!(
                loader.load_type("EntryInterface").unwrap_err(),
                TypeLoadingError::CyclicConstruction("EntryInterface".to_string())
            );
        }
        assert!(!loader.registry().contains("EntryInterface"));
        assert!(!loader.registry().contains("news_article_Entry"));
    }

    #[test]
    fn self_loading_factory_fails() {
        let loader = TypeLoader::new();
        loader.register_type("Foo", |loader| loader.load_type("Foo"));

        assert_eq!(
            loader.load_type("Foo").unwrap_err(),
            TypeLoadingError::CyclicConstruction("Foo".to_string())
        );
    }

    #[test]
    fn concurrent_loads_are_not_cycles() {
        let loader = TypeLoader::new();
        loader.register_cached_type("Slow", |_| {
            std::thread::sleep(std::time::Duration::from_millis(20));
            Ok(NamedType::scalar("Slow"))
        });

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| loader.load_type("Slow")))
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap().name(), "Slow");
            }
        });
    }

    #[test]
    fn name_mismatch_is_reported() {
        let loader = TypeLoader::new();
        loader.register_type("Foo", |_| Ok(Arc::new(NamedType::scalar("Bar"))));

        assert_eq!(
            loader.load_type("Foo").unwrap_err(),
            TypeLoadingError::NameMismatch {
                requested: "Foo".to_string(),
                built: "Bar".to_string()
            }
        );
    }
}
