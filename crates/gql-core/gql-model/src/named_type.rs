// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{fmt, sync::Arc};

use async_graphql_parser::{
    Positioned,
    types::{FieldDefinition, InterfaceType, ObjectType, TypeDefinition, TypeKind, UnionType},
};

use crate::definition::{default_positioned, default_positioned_name, underlying_type_name};

/// Picks the concrete object type name for a resolved value of an abstract (interface or union)
/// type. Returns `None` when the value matches none of the possible types.
pub type TypeResolver = Arc<dyn Fn(&serde_json::Value) -> Option<String> + Send + Sync>;

/// A schema type that can be addressed by name.
///
/// Other types are only ever referenced by name (field types, implemented interfaces, union
/// members), never by holding on to their `NamedType`.
#[derive(Clone)]
pub struct NamedType {
    definition: TypeDefinition,
    resolver: Option<TypeResolver>,
}

impl NamedType {
    pub fn new(definition: TypeDefinition) -> Self {
        Self {
            definition,
            resolver: None,
        }
    }

    pub fn scalar(name: &str) -> Self {
        Self::new(Self::type_definition(name, TypeKind::Scalar))
    }

    pub fn object(
        name: &str,
        implements: &[&str],
        fields: Vec<Positioned<FieldDefinition>>,
    ) -> Self {
        Self::new(Self::type_definition(
            name,
            TypeKind::Object(ObjectType {
                implements: implements
                    .iter()
                    .map(|interface| default_positioned_name(interface))
                    .collect(),
                fields,
            }),
        ))
    }

    pub fn interface(name: &str, fields: Vec<Positioned<FieldDefinition>>) -> Self {
        Self::new(Self::type_definition(
            name,
            TypeKind::Interface(InterfaceType {
                implements: vec![],
                fields,
            }),
        ))
    }

    pub fn union<S: AsRef<str>>(name: &str, members: &[S]) -> Self {
        Self::new(Self::type_definition(
            name,
            TypeKind::Union(UnionType {
                members: members
                    .iter()
                    .map(|member| default_positioned_name(member.as_ref()))
                    .collect(),
            }),
        ))
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.definition.description = Some(default_positioned(description.to_string()));
        self
    }

    pub fn with_resolver(mut self, resolver: TypeResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    fn type_definition(name: &str, kind: TypeKind) -> TypeDefinition {
        TypeDefinition {
            extend: false,
            description: None,
            name: default_positioned_name(name),
            directives: vec![],
            kind,
        }
    }

    pub fn name(&self) -> &str {
        self.definition.name.node.as_str()
    }

    pub fn kind(&self) -> &TypeKind {
        &self.definition.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.definition
            .description
            .as_ref()
            .map(|description| description.node.as_str())
    }

    pub fn is_abstract(&self) -> bool {
        matches!(
            self.definition.kind,
            TypeKind::Interface(_) | TypeKind::Union(_)
        )
    }

    /// Fields of an object or interface type (empty for every other kind)
    pub fn fields(&self) -> &[Positioned<FieldDefinition>] {
        match &self.definition.kind {
            TypeKind::Object(ObjectType { fields, .. })
            | TypeKind::Interface(InterfaceType { fields, .. }) => fields,
            _ => &[],
        }
    }

    /// Interfaces implemented by an object or interface type
    pub fn interfaces(&self) -> Vec<&str> {
        match &self.definition.kind {
            TypeKind::Object(ObjectType { implements, .. })
            | TypeKind::Interface(InterfaceType { implements, .. }) => {
                implements.iter().map(|name| name.node.as_str()).collect()
            }
            _ => vec![],
        }
    }

    pub fn union_members(&self) -> Vec<&str> {
        match &self.definition.kind {
            TypeKind::Union(UnionType { members }) => {
                members.iter().map(|name| name.node.as_str()).collect()
            }
            _ => vec![],
        }
    }

    /// Every type name this type mentions: field and argument types, implemented interfaces, and
    /// union members. Duplicates are removed, first mention first.
    pub fn referenced_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.interfaces();
        names.extend(self.union_members());
        for field in self.fields() {
            names.push(underlying_type_name(&field.node.ty.node));
            names.extend(
                field
                    .node
                    .arguments
                    .iter()
                    .map(|argument| underlying_type_name(&argument.node.ty.node)),
            );
        }
        if let TypeKind::InputObject(input) = &self.definition.kind {
            names.extend(
                input
                    .fields
                    .iter()
                    .map(|field| underlying_type_name(&field.node.ty.node)),
            );
        }

        let mut referenced: Vec<&str> = Vec::with_capacity(names.len());
        for name in names {
            if !referenced.contains(&name) {
                referenced.push(name);
            }
        }
        referenced
    }

    /// Resolve the concrete type of `value`. Concrete types resolve to themselves.
    pub fn resolve_type(&self, value: &serde_json::Value) -> Option<String> {
        match &self.resolver {
            Some(resolver) => resolver(value),
            None if !self.is_abstract() => Some(self.name().to_string()),
            None => None,
        }
    }
}

impl fmt::Debug for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedType")
            .field("name", &self.name())
            .field("definition", &self.definition)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{argument, field_with_arguments, list_of, named, non_null};
    use serde_json::json;
    use test_log::test;

    #[test]
    fn references_are_collected_once() {
        let typ = NamedType::object(
            "Query",
            &[],
            vec![
                field_with_arguments(
                    "entries",
                    list_of(named("EntryInterface")),
                    vec![argument("id", list_of(non_null(named("ID"))))],
                ),
                field_with_arguments(
                    "entry",
                    named("EntryInterface"),
                    vec![argument("id", named("ID"))],
                ),
            ],
        );

        assert_eq!(typ.referenced_types(), vec!["EntryInterface", "ID"]);
    }

    #[test]
    fn union_resolution() {
        let union = NamedType::union("Block", &["Text", "Image"]).with_resolver(Arc::new(
            |value: &serde_json::Value| value["kind"].as_str().map(|kind| kind.to_string()),
        ));

        assert!(union.is_abstract());
        assert_eq!(union.union_members(), vec!["Text", "Image"]);
        assert_eq!(union.referenced_types(), vec!["Text", "Image"]);
        assert_eq!(
            union.resolve_type(&json!({"kind": "Image"})),
            Some("Image".to_string())
        );
        assert_eq!(union.resolve_type(&json!({})), None);
    }

    #[test]
    fn concrete_types_resolve_to_themselves() {
        let scalar = NamedType::scalar("DateTime");
        assert_eq!(
            scalar.resolve_type(&json!("2019-08-01")),
            Some("DateTime".to_string())
        );
    }
}
