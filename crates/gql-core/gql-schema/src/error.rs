// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use gql_env::EnvError;
use gql_model::TypeLoadingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaBuildingError {
    #[error("{0}")]
    TypeLoading(#[from] TypeLoadingError),

    #[error("Invalid schema: {}", join_errors(.0))]
    InvalidSchema(Vec<SchemaValidationError>),

    #[error("{0}")]
    Config(#[from] EnvError),
}

fn join_errors(errors: &[SchemaValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaValidationError {
    #[error("Root query type '{0}' must be an object type")]
    RootNotObject(String),

    #[error("Type '{0}' must define one or more fields")]
    NoFields(String),

    #[error("Type '{type_name}' implements '{interface}', which is not an interface")]
    NotAnInterface { type_name: String, interface: String },

    #[error("Type '{type_name}' must provide field '{field}' of interface '{interface}'")]
    MissingInterfaceField {
        type_name: String,
        interface: String,
        field: String,
    },

    #[error("Union '{0}' must include one or more member types")]
    EmptyUnion(String),

    #[error("Union '{union_name}' member '{member}' must be an object type")]
    NonObjectUnionMember { union_name: String, member: String },
}
