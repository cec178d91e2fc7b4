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
use gql_model::{
    NamedType, TypeLoader, TypeLoadingError,
    definition::{field, named, with_description},
};

use super::scalars::DATE_TIME;
use crate::{
    extension::SchemaObject,
    generators::{EntryTypeGenerator, MatrixBlockTypeGenerator},
};

pub const ENTRY_INTERFACE: &str = "EntryInterface";
pub const MATRIX_BLOCK_INTERFACE: &str = "MatrixBlockInterface";

pub fn entry_interface_fields() -> Vec<Positioned<FieldDefinition>> {
    vec![
        with_description(field("id", named("ID")), "The id of the entity"),
        with_description(field("uid", named("String")), "The uid of the entity"),
        field("title", named("String")),
        field("slug", named("String")),
        with_description(
            field("sectionHandle", named("String")),
            "The handle of the section that contains the entry.",
        ),
        with_description(
            field("typeHandle", named("String")),
            "The handle of the entry type that contains the entry.",
        ),
        field("dateCreated", named(DATE_TIME)),
        field("dateUpdated", named(DATE_TIME)),
    ]
}

pub fn matrix_block_interface_fields() -> Vec<Positioned<FieldDefinition>> {
    vec![
        with_description(field("id", named("ID")), "The id of the entity"),
        with_description(field("uid", named("String")), "The uid of the entity"),
        field("fieldId", named("Int")),
        with_description(
            field("fieldHandle", named("String")),
            "The handle of the matrix field the block belongs to.",
        ),
        field("ownerId", named("Int")),
        with_description(
            field("owner", named(ENTRY_INTERFACE)),
            "The entry that owns the block.",
        ),
        field("typeHandle", named("String")),
        field("sortOrder", named("Int")),
        field("dateCreated", named(DATE_TIME)),
    ]
}

/// The interface implemented by every generated entry type.
pub struct EntryInterface {
    generator: EntryTypeGenerator,
}

impl EntryInterface {
    pub fn new(generator: EntryTypeGenerator) -> Self {
        Self { generator }
    }
}

impl SchemaObject for EntryInterface {
    fn name(&self) -> &str {
        ENTRY_INTERFACE
    }

    fn build(&self, loader: &TypeLoader) -> Result<NamedType, TypeLoadingError> {
        // Implementations are only reachable through the interface, so make them loadable now
        self.generator.generate_types(loader)?;

        Ok(NamedType::interface(ENTRY_INTERFACE, entry_interface_fields())
            .with_description("This is the interface implemented by all entries.")
            .with_resolver(Arc::new(|value: &serde_json::Value| {
                let section = value.get("sectionHandle")?.as_str()?;
                let entry_type = value.get("typeHandle")?.as_str()?;
                Some(EntryTypeGenerator::type_name(section, entry_type))
            })))
    }
}

/// The interface implemented by every generated matrix block type.
pub struct MatrixBlockInterface {
    generator: MatrixBlockTypeGenerator,
}

impl MatrixBlockInterface {
    pub fn new(generator: MatrixBlockTypeGenerator) -> Self {
        Self { generator }
    }
}

impl SchemaObject for MatrixBlockInterface {
    fn name(&self) -> &str {
        MATRIX_BLOCK_INTERFACE
    }

    fn build(&self, loader: &TypeLoader) -> Result<NamedType, TypeLoadingError> {
        self.generator.generate_types(loader)?;

        Ok(
            NamedType::interface(MATRIX_BLOCK_INTERFACE, matrix_block_interface_fields())
                .with_description("This is the interface implemented by all matrix blocks.")
                .with_resolver(Arc::new(|value: &serde_json::Value| {
                    let field = value.get("fieldHandle")?.as_str()?;
                    let block_type = value.get("typeHandle")?.as_str()?;
                    Some(MatrixBlockTypeGenerator::block_type_name(field, block_type))
                })),
        )
    }
}
