// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{
    Positioned,
    types::{FieldDefinition, InputValueDefinition},
};
use gql_access::RequestScope;
use gql_model::{
    NamedType, QUERY_ROOT_TYPENAME,
    definition::{argument, field, field_with_arguments, list_of, named, with_description},
};

use super::interfaces::{ENTRY_INTERFACE, MATRIX_BLOCK_INTERFACE};

/// A set of related root queries. Returns nothing if the token may not use them.
pub trait QueryGroup {
    fn queries(&self, scope: &RequestScope) -> Vec<Positioned<FieldDefinition>>;
}

pub struct PingQuery;

impl QueryGroup for PingQuery {
    fn queries(&self, _scope: &RequestScope) -> Vec<Positioned<FieldDefinition>> {
        vec![with_description(
            field("ping", named("String")),
            "This query is used to test API connectivity.",
        )]
    }
}

pub struct EntryQueries;

impl EntryQueries {
    fn arguments() -> Vec<Positioned<InputValueDefinition>> {
        vec![
            argument("id", list_of(named("ID"))),
            argument("uid", list_of(named("String"))),
            argument("section", list_of(named("String"))),
            argument("type", list_of(named("String"))),
            argument("limit", named("Int")),
            argument("offset", named("Int")),
            argument("orderBy", named("String")),
        ]
    }
}

impl QueryGroup for EntryQueries {
    fn queries(&self, scope: &RequestScope) -> Vec<Positioned<FieldDefinition>> {
        if !scope.can_query_entries() {
            return vec![];
        }

        vec![
            with_description(
                field_with_arguments(
                    "entries",
                    list_of(named(ENTRY_INTERFACE)),
                    Self::arguments(),
                ),
                "This query is used to query for entries.",
            ),
            with_description(
                field_with_arguments("entry", named(ENTRY_INTERFACE), Self::arguments()),
                "This query is used to query for a single entry.",
            ),
        ]
    }
}

pub struct MatrixBlockQueries;

impl QueryGroup for MatrixBlockQueries {
    fn queries(&self, scope: &RequestScope) -> Vec<Positioned<FieldDefinition>> {
        // Blocks are only reachable through their owner entries
        if !scope.can_query_entries() {
            return vec![];
        }

        let arguments = vec![
            argument("id", list_of(named("ID"))),
            argument("uid", list_of(named("String"))),
            argument("fieldId", list_of(named("Int"))),
            argument("ownerId", list_of(named("Int"))),
            argument("type", list_of(named("String"))),
            argument("limit", named("Int")),
        ];

        vec![
            with_description(
                field_with_arguments(
                    "matrixBlocks",
                    list_of(named(MATRIX_BLOCK_INTERFACE)),
                    arguments.clone(),
                ),
                "This query is used to query for matrix blocks.",
            ),
            field_with_arguments("matrixBlock", named(MATRIX_BLOCK_INTERFACE), arguments),
        ]
    }
}

/// The root query type with `queries` as its fields
pub fn query_root(queries: Vec<Positioned<FieldDefinition>>) -> NamedType {
    NamedType::object(QUERY_ROOT_TYPENAME, &[], queries)
        .with_description("The query root of the GraphQL interface.")
}
