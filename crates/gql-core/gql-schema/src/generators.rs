// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Concrete types generated from the content catalog.
//!
//! Entry and matrix block types only ever appear in the schema as implementations of the
//! built-in interfaces (or members of a matrix field union), so nothing refers to them by name
//! up front. The generators register them with the loader when the owning interface gets built,
//! and in dev mode the service calls them directly to collect the auxiliary type list.

use std::sync::Arc;

use gql_access::{AllowedEntities, resource};
use gql_model::{
    NamedType, TypeLoader, TypeLoadingError,
    definition::{field, list_of, named},
    union::get_or_build_union,
};
use tracing::debug;

use crate::{
    builtins::{
        ENTRY_INTERFACE, MATRIX_BLOCK_INTERFACE, entry_interface_fields,
        matrix_block_interface_fields,
    },
    content::{ContentCatalog, MatrixField},
};

fn is_allowed(allowed: &AllowedEntities, resource_kind: &str, uid: &str) -> bool {
    allowed
        .get(resource_kind)
        .is_some_and(|uids| uids.iter().any(|allowed_uid| allowed_uid == uid))
}

#[derive(Clone)]
pub struct EntryTypeGenerator {
    content: Arc<ContentCatalog>,
    allowed: AllowedEntities,
    matrix: MatrixBlockTypeGenerator,
}

impl EntryTypeGenerator {
    pub fn new(
        content: Arc<ContentCatalog>,
        allowed: AllowedEntities,
        matrix: MatrixBlockTypeGenerator,
    ) -> Self {
        Self {
            content,
            allowed,
            matrix,
        }
    }

    pub fn type_name(section_handle: &str, type_handle: &str) -> String {
        format!("{section_handle}_{type_handle}_Entry")
    }

    /// Register and load an object type for every (section, entry type) pair the token may read.
    pub fn generate_types(
        &self,
        loader: &TypeLoader,
    ) -> Result<Vec<Arc<NamedType>>, TypeLoadingError> {
        let mut types = vec![];

        for section in &self.content.sections {
            if !is_allowed(&self.allowed, resource::SECTIONS, &section.uid) {
                continue;
            }

            for entry_type in &section.entry_types {
                if !is_allowed(&self.allowed, resource::ENTRY_TYPES, &entry_type.uid) {
                    continue;
                }

                let type_name = Self::type_name(&section.handle, &entry_type.handle);
                let description = format!(
                    "Entries of type `{}` in the {} section.",
                    entry_type.handle,
                    section.name.as_deref().unwrap_or(&section.handle)
                );

                let content = self.content.clone();
                let matrix = self.matrix.clone();
                let matrix_handles = entry_type.fields.clone();
                let built_name = type_name.clone();

                loader.register_cached_type(&type_name, move |loader| {
                    let mut fields = entry_interface_fields();

                    for handle in &matrix_handles {
                        let matrix_field = content.matrix_field(handle).ok_or_else(|| {
                            TypeLoadingError::Construction {
                                type_name: built_name.clone(),
                                message: format!("Unknown matrix field '{handle}'"),
                            }
                        })?;
                        let union_type = matrix.field_union(loader, matrix_field)?;
                        fields.push(field(handle, list_of(named(union_type.name()))));
                    }

                    Ok(
                        NamedType::object(&built_name, &[ENTRY_INTERFACE], fields)
                            .with_description(&description),
                    )
                });

                types.push(loader.load_type(&type_name)?);
            }
        }

        debug!(count = types.len(), "Generated entry types");

        Ok(types)
    }
}

#[derive(Clone)]
pub struct MatrixBlockTypeGenerator {
    content: Arc<ContentCatalog>,
    allowed: AllowedEntities,
}

impl MatrixBlockTypeGenerator {
    pub fn new(content: Arc<ContentCatalog>, allowed: AllowedEntities) -> Self {
        Self { content, allowed }
    }

    pub fn block_type_name(field_handle: &str, type_handle: &str) -> String {
        format!("{field_handle}_{type_handle}_BlockType")
    }

    pub fn union_name(field_handle: &str) -> String {
        format!("{field_handle}_MatrixField")
    }

    /// The union of the block types of `matrix_field`. Registers the block types on the way.
    pub fn field_union(
        &self,
        loader: &TypeLoader,
        matrix_field: &MatrixField,
    ) -> Result<Arc<NamedType>, TypeLoadingError> {
        let member_types: Vec<String> = matrix_field
            .block_types
            .iter()
            .map(|block_type| {
                let type_name = Self::block_type_name(&matrix_field.handle, &block_type.handle);
                let built_name = type_name.clone();
                loader.register_cached_type(&type_name, move |_| {
                    Ok(NamedType::object(
                        &built_name,
                        &[MATRIX_BLOCK_INTERFACE],
                        matrix_block_interface_fields(),
                    ))
                });
                type_name
            })
            .collect();

        let field_handle = matrix_field.handle.clone();
        Ok(get_or_build_union(
            loader,
            &Self::union_name(&matrix_field.handle),
            &member_types,
            Arc::new(move |value: &serde_json::Value| {
                let type_handle = value.get("typeHandle")?.as_str()?;
                Some(Self::block_type_name(&field_handle, type_handle))
            }),
        ))
    }

    /// The block types and field unions of every matrix field. Nothing for a token that may not
    /// query entries, since blocks are only reachable through them.
    pub fn generate_types(
        &self,
        loader: &TypeLoader,
    ) -> Result<Vec<Arc<NamedType>>, TypeLoadingError> {
        if !(self.allowed.contains(resource::SECTIONS)
            && self.allowed.contains(resource::ENTRY_TYPES))
        {
            return Ok(vec![]);
        }

        let mut types = vec![];

        for matrix_field in &self.content.matrix_fields {
            let union_type = self.field_union(loader, matrix_field)?;
            for member in union_type.union_members() {
                types.push(loader.load_type(member)?);
            }
            types.push(union_type);
        }

        debug!(count = types.len(), "Generated matrix block types");

        Ok(types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gql_access::{RequestScope, StaticTokenSource, Token};
    use serde_json::json;
    use test_log::test;

    fn catalog() -> Arc<ContentCatalog> {
        Arc::new(
            ContentCatalog::from_json(
                r#"{
                    "sections": [
                        {
                            "uid": "s-news",
                            "handle": "news",
                            "name": "News",
                            "entryTypes": [
                                { "uid": "t-article", "handle": "article", "fields": ["body"] },
                                { "uid": "t-link", "handle": "link" }
                            ]
                        },
                        {
                            "uid": "s-pages",
                            "handle": "pages",
                            "entryTypes": [{ "uid": "t-page", "handle": "page" }]
                        }
                    ],
                    "matrixFields": [
                        {
                            "uid": "f-body",
                            "handle": "body",
                            "blockTypes": [
                                { "uid": "b-text", "handle": "text" },
                                { "uid": "b-quote", "handle": "quote" }
                            ]
                        }
                    ]
                }"#,
            )
            .unwrap(),
        )
    }

    fn allowed(permissions: &[&str]) -> AllowedEntities {
        RequestScope::new(Arc::new(StaticTokenSource::new(Token::new(
            "Test",
            "test",
            permissions,
        ))))
        .allowed_entities()
    }

    fn generators(permissions: &[&str]) -> EntryTypeGenerator {
        let allowed = allowed(permissions);
        let matrix = MatrixBlockTypeGenerator::new(catalog(), allowed.clone());
        EntryTypeGenerator::new(catalog(), allowed, matrix)
    }

    fn names(types: &[Arc<NamedType>]) -> Vec<&str> {
        types.iter().map(|typ| typ.name()).collect()
    }

    #[test]
    fn entry_types_follow_permissions() {
        let loader = TypeLoader::new();
        let generator = generators(&[
            "sections.s-news:read",
            "entrytypes.t-article:read",
            "entrytypes.t-page:read",
        ]);

        let types = generator.generate_types(&loader).unwrap();

        // `pages` is not an allowed section and `link` is not an allowed entry type
        assert_eq!(names(&types), vec!["news_article_Entry"]);
        assert_eq!(types[0].interfaces(), vec![ENTRY_INTERFACE]);
        assert_eq!(
            types[0].description(),
            Some("Entries of type `article` in the News section.")
        );
    }

    #[test]
    fn matrix_fields_become_union_lists() {
        let loader = TypeLoader::new();
        let generator = generators(&["sections.s-news:read", "entrytypes.t-article:read"]);

        let types = generator.generate_types(&loader).unwrap();
        let body = types[0]
            .fields()
            .iter()
            .find(|candidate| candidate.node.name.node.as_str() == "body")
            .unwrap();
        assert_eq!(body.node.ty.node.to_string(), "[body_MatrixField]");

        let union_type = loader.load_type("body_MatrixField").unwrap();
        assert_eq!(
            union_type.union_members(),
            vec!["body_text_BlockType", "body_quote_BlockType"]
        );
        assert_eq!(
            union_type.resolve_type(&json!({ "typeHandle": "quote" })),
            Some("body_quote_BlockType".to_string())
        );
        assert!(loader.is_registered("body_text_BlockType"));
    }

    #[test]
    fn generated_types_are_stable() {
        let loader = TypeLoader::new();
        let generator = generators(&["sections.s-news:read", "entrytypes.t-article:read"]);

        let first = generator.generate_types(&loader).unwrap();
        let second = generator.generate_types(&loader).unwrap();
        assert!(Arc::ptr_eq(&first[0], &second[0]));
    }

    #[test]
    fn unknown_matrix_field_fails_construction() {
        let content = Arc::new(
            ContentCatalog::from_json(
                r#"{
                    "sections": [{
                        "uid": "s-news",
                        "handle": "news",
                        "entryTypes": [{ "uid": "t-article", "handle": "article", "fields": ["gallery"] }]
                    }]
                }"#,
            )
            .unwrap(),
        );
        let allowed = allowed(&["sections.s-news:read", "entrytypes.t-article:read"]);
        let matrix = MatrixBlockTypeGenerator::new(content.clone(), allowed.clone());
        let generator = EntryTypeGenerator::new(content, allowed, matrix);

        assert_eq!(
            generator.generate_types(&TypeLoader::new()).unwrap_err(),
            TypeLoadingError::Construction {
                type_name: "news_article_Entry".to_string(),
                message: "Unknown matrix field 'gallery'".to_string(),
            }
        );
    }

    #[test]
    fn block_types_need_entry_permissions() {
        let loader = TypeLoader::new();

        let denied = MatrixBlockTypeGenerator::new(catalog(), allowed(&["sections.s-news:read"]));
        assert!(denied.generate_types(&loader).unwrap().is_empty());

        let granted = MatrixBlockTypeGenerator::new(
            catalog(),
            allowed(&["sections.s-news:read", "entrytypes.t-article:read"]),
        );
        assert_eq!(
            names(&granted.generate_types(&loader).unwrap()),
            vec!["body_text_BlockType", "body_quote_BlockType", "body_MatrixField"]
        );
    }
}
