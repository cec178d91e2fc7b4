// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_graphql_parser::{Positioned, types::FieldDefinition};
use gql_access::RequestScope;
use gql_model::{NamedType, TypeLoader, TypeLoadingError};

/// A type that can be registered with the type loader under its own name.
pub trait SchemaObject: Send + Sync {
    fn name(&self) -> &str;

    /// Build the type. Runs at most once per schema: the result is memoized.
    fn build(&self, loader: &TypeLoader) -> Result<NamedType, TypeLoadingError>;
}

/// The types about to be registered. Extensions may append to it.
#[derive(Default)]
pub struct TypeListBuilder {
    types: Vec<Arc<dyn SchemaObject>>,
}

impl TypeListBuilder {
    pub fn new(types: Vec<Arc<dyn SchemaObject>>) -> Self {
        Self { types }
    }

    pub fn push(&mut self, typ: Arc<dyn SchemaObject>) {
        self.types.push(typ);
    }

    pub fn names(&self) -> Vec<&str> {
        self.types.iter().map(|typ| typ.name()).collect()
    }

    pub(crate) fn into_types(self) -> Vec<Arc<dyn SchemaObject>> {
        self.types
    }
}

/// The fields of the root `Query` type about to be registered. Extensions may append to it.
#[derive(Default)]
pub struct QueryListBuilder {
    queries: Vec<Positioned<FieldDefinition>>,
}

impl QueryListBuilder {
    pub fn new(queries: Vec<Positioned<FieldDefinition>>) -> Self {
        Self { queries }
    }

    pub fn push(&mut self, query: Positioned<FieldDefinition>) {
        self.queries.push(query);
    }

    pub fn extend(&mut self, queries: impl IntoIterator<Item = Positioned<FieldDefinition>>) {
        self.queries.extend(queries);
    }

    pub fn names(&self) -> Vec<&str> {
        self.queries
            .iter()
            .map(|query| query.node.name.node.as_str())
            .collect()
    }

    pub(crate) fn into_queries(self) -> Vec<Positioned<FieldDefinition>> {
        self.queries
    }
}

/// Hooks through which a plugin contributes to the schema. Every hook is called on each schema
/// build, in the order the extensions were registered with the service.
pub trait SchemaExtension: Send + Sync {
    /// Called before the type list gets registered with the type loader.
    fn register_types(&self, _types: &mut TypeListBuilder, _scope: &RequestScope) {}

    /// Called before the root `Query` type's loader is registered.
    fn register_queries(&self, _queries: &mut QueryListBuilder, _scope: &RequestScope) {}

    /// Types to build eagerly in dev mode (typically types that no query refers to directly, such
    /// as the implementations of an interface).
    fn generate_types(
        &self,
        _loader: &TypeLoader,
        _scope: &RequestScope,
    ) -> Result<Vec<Arc<NamedType>>, TypeLoadingError> {
        Ok(vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::{DateTimeType, StandardScalar};
    use gql_model::definition::{field, named};
    use test_log::test;

    #[test]
    fn builders_keep_registration_order() {
        let string: Arc<dyn SchemaObject> = Arc::new(StandardScalar::new("String"));
        let mut types = TypeListBuilder::new(vec![string]);
        types.push(Arc::new(DateTimeType));
        assert_eq!(types.names(), vec!["String", "DateTime"]);

        let mut queries = QueryListBuilder::default();
        queries.push(field("ping", named("String")));
        queries.extend([field("now", named("DateTime"))]);
        assert_eq!(queries.names(), vec!["ping", "now"]);
    }
}
