// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use gql_model::{NamedType, QUERY_ROOT_TYPENAME, TypeLoader, TypeLoadingError};
use tracing::{debug, instrument};

use crate::{error::SchemaBuildingError, sdl, validation};

/// The schema seen by one token.
///
/// Every type lookup goes through the type loader the schema was built from, so types that no
/// one asks for are never built.
pub struct Schema {
    type_loader: TypeLoader,
    query_type: Arc<NamedType>,
    /// Types supplied eagerly (dev mode), which need not be reachable from `Query`
    auxiliary_types: Vec<Arc<NamedType>>,
}

impl Schema {
    /// Load the root query type from `type_loader`. Fails if `Query` is not registered or
    /// cannot be built.
    pub fn new(
        type_loader: TypeLoader,
        auxiliary_types: Vec<Arc<NamedType>>,
    ) -> Result<Self, TypeLoadingError> {
        let query_type = type_loader.load_type(QUERY_ROOT_TYPENAME)?;

        Ok(Self {
            type_loader,
            query_type,
            auxiliary_types,
        })
    }

    pub fn query_type(&self) -> &Arc<NamedType> {
        &self.query_type
    }

    pub fn load_type(&self, name: &str) -> Result<Arc<NamedType>, TypeLoadingError> {
        self.type_loader.load_type(name)
    }

    pub fn auxiliary_types(&self) -> &[Arc<NamedType>] {
        &self.auxiliary_types
    }

    /// The concrete type name of `value`, as seen through the abstract type `abstract_type_name`.
    pub fn resolve_abstract_type(
        &self,
        abstract_type_name: &str,
        value: &serde_json::Value,
    ) -> Result<Option<String>, TypeLoadingError> {
        Ok(self.load_type(abstract_type_name)?.resolve_type(value))
    }

    /// `Query`, the auxiliary types, and everything they refer to (transitively), keyed by name.
    ///
    /// Loads every type on the way, so any unregistered reference surfaces as an error here.
    pub fn reachable_types(&self) -> Result<BTreeMap<String, Arc<NamedType>>, TypeLoadingError> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut types = BTreeMap::new();

        let mut pending: Vec<Arc<NamedType>> = vec![self.query_type.clone()];
        pending.extend(self.auxiliary_types.iter().cloned());

        while let Some(typ) = pending.pop() {
            if !visited.insert(typ.name().to_string()) {
                continue;
            }

            for referenced in typ.referenced_types() {
                if !visited.contains(referenced) {
                    pending.push(self.type_loader.load_type(referenced)?);
                }
            }

            types.insert(typ.name().to_string(), typ);
        }

        Ok(types)
    }

    /// Build every reachable type and check the result is a well-formed GraphQL schema.
    #[instrument(name = "Schema::assert_valid", skip(self))]
    pub fn assert_valid(&self) -> Result<(), SchemaBuildingError> {
        let types = self.reachable_types()?;
        debug!(count = types.len(), "Validating reachable types");

        let errors = validation::validate(&self.query_type, &types);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaBuildingError::InvalidSchema(errors))
        }
    }

    /// The reachable schema in SDL, `Query` first and the rest sorted by name.
    pub fn to_sdl(&self) -> Result<String, TypeLoadingError> {
        let types = self.reachable_types()?;
        Ok(sdl::print_schema(&self.query_type, &types))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gql_model::definition::{field, list_of, named};
    use serde_json::json;
    use test_log::test;

    fn loader_with_query(query_fields: Vec<(&str, &str)>) -> TypeLoader {
        let loader = TypeLoader::new();
        let fields = query_fields
            .into_iter()
            .map(|(name, typ)| field(name, named(typ)))
            .collect::<Vec<_>>();
        loader.register_cached_type(QUERY_ROOT_TYPENAME, move |_| {
            Ok(NamedType::object(QUERY_ROOT_TYPENAME, &[], fields.clone()))
        });
        loader.register_cached_type("String", |_| Ok(NamedType::scalar("String")));
        loader
    }

    #[test]
    fn query_is_loaded_eagerly() {
        let loader = TypeLoader::new();
        assert_eq!(
            Schema::new(loader, vec![]).err(),
            Some(TypeLoadingError::UnregisteredType("Query".to_string()))
        );
    }

    #[test]
    fn reachable_types_tolerate_cycles() {
        let loader = loader_with_query(vec![("node", "Node")]);
        loader.register_cached_type("Node", |_| {
            Ok(NamedType::object(
                "Node",
                &[],
                vec![
                    field("name", named("String")),
                    field("children", list_of(named("Node"))),
                ],
            ))
        });

        let schema = Schema::new(loader, vec![]).unwrap();
        let names: Vec<String> = schema.reachable_types().unwrap().into_keys().collect();
        assert_eq!(names, vec!["Node", "Query", "String"]);
    }

    #[test]
    fn unregistered_references_surface() {
        let loader = loader_with_query(vec![("missing", "Missing")]);
        let schema = Schema::new(loader, vec![]).unwrap();

        assert_eq!(
            schema.reachable_types().err(),
            Some(TypeLoadingError::UnregisteredType("Missing".to_string()))
        );
        assert!(matches!(
            schema.assert_valid(),
            Err(SchemaBuildingError::TypeLoading(
                TypeLoadingError::UnregisteredType(name)
            )) if name == "Missing"
        ));
    }

    #[test]
    fn abstract_types_resolve_through_the_loader() {
        let loader = loader_with_query(vec![("ping", "String")]);
        loader.register_cached_type("Animal", |_| {
            Ok(NamedType::union("Animal", &["Cat", "Dog"]).with_resolver(Arc::new(
                |value: &serde_json::Value| value.get("kind")?.as_str().map(str::to_string),
            )))
        });

        let schema = Schema::new(loader, vec![]).unwrap();
        assert_eq!(
            schema
                .resolve_abstract_type("Animal", &json!({ "kind": "Dog" }))
                .unwrap(),
            Some("Dog".to_string())
        );
        assert_eq!(
            schema.resolve_abstract_type("Plant", &json!({})).err(),
            Some(TypeLoadingError::UnregisteredType("Plant".to_string()))
        );
    }
}
