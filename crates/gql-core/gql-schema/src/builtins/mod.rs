// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Types and queries every schema starts out with.

mod interfaces;
mod queries;
mod scalars;

use std::sync::Arc;

use async_graphql_parser::{Positioned, types::FieldDefinition};
use gql_access::{AllowedEntities, RequestScope};

use crate::{
    content::ContentCatalog,
    extension::SchemaObject,
    generators::{EntryTypeGenerator, MatrixBlockTypeGenerator},
};

pub use interfaces::{
    ENTRY_INTERFACE, EntryInterface, MATRIX_BLOCK_INTERFACE, MatrixBlockInterface,
    entry_interface_fields, matrix_block_interface_fields,
};
pub use queries::{EntryQueries, MatrixBlockQueries, PingQuery, QueryGroup, query_root};
pub use scalars::{DATE_TIME, DateTimeType, STANDARD_SCALARS, StandardScalar};

/// Scalars first, then interfaces.
pub fn builtin_types(
    content: Arc<ContentCatalog>,
    allowed: &AllowedEntities,
) -> Vec<Arc<dyn SchemaObject>> {
    let matrix_generator = MatrixBlockTypeGenerator::new(content.clone(), allowed.clone());
    let entry_generator =
        EntryTypeGenerator::new(content, allowed.clone(), matrix_generator.clone());

    let mut types: Vec<Arc<dyn SchemaObject>> = STANDARD_SCALARS
        .into_iter()
        .map(|name| Arc::new(StandardScalar::new(name)) as Arc<dyn SchemaObject>)
        .collect();

    types.push(Arc::new(DateTimeType));
    types.push(Arc::new(EntryInterface::new(entry_generator)));
    types.push(Arc::new(MatrixBlockInterface::new(matrix_generator)));

    types
}

pub fn builtin_query_groups() -> Vec<Box<dyn QueryGroup>> {
    vec![
        Box::new(PingQuery),
        Box::new(EntryQueries),
        Box::new(MatrixBlockQueries),
    ]
}

/// The queries of all built-in groups, merged in group order.
pub fn builtin_queries(scope: &RequestScope) -> Vec<Positioned<FieldDefinition>> {
    builtin_query_groups()
        .iter()
        .flat_map(|group| group.queries(scope))
        .collect()
}
