// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Helpers to put together `async_graphql_parser` definitions without source positions.

use async_graphql_parser::{
    Pos, Positioned,
    types::{BaseType, FieldDefinition, InputValueDefinition, Type},
};
use async_graphql_value::Name;

pub fn default_positioned<T>(value: T) -> Positioned<T> {
    Positioned::new(value, Pos::default())
}

pub fn default_positioned_name(value: &str) -> Positioned<Name> {
    default_positioned(Name::new(value))
}

/// A nullable reference to a named type, such as `String`
pub fn named(type_name: &str) -> Type {
    Type {
        base: BaseType::Named(Name::new(type_name)),
        nullable: true,
    }
}

/// A non-null variant of `typ`, such as `String!`
pub fn non_null(typ: Type) -> Type {
    Type {
        nullable: false,
        ..typ
    }
}

/// A nullable list of `element`, such as `[String]`
pub fn list_of(element: Type) -> Type {
    Type {
        base: BaseType::List(Box::new(element)),
        nullable: true,
    }
}

pub fn field(name: &str, ty: Type) -> Positioned<FieldDefinition> {
    field_with_arguments(name, ty, vec![])
}

pub fn field_with_arguments(
    name: &str,
    ty: Type,
    arguments: Vec<Positioned<InputValueDefinition>>,
) -> Positioned<FieldDefinition> {
    default_positioned(FieldDefinition {
        description: None,
        name: default_positioned_name(name),
        arguments,
        ty: default_positioned(ty),
        directives: vec![],
    })
}

pub fn argument(name: &str, ty: Type) -> Positioned<InputValueDefinition> {
    default_positioned(InputValueDefinition {
        description: None,
        name: default_positioned_name(name),
        ty: default_positioned(ty),
        default_value: None,
        directives: vec![],
    })
}

pub fn with_description(
    mut field: Positioned<FieldDefinition>,
    description: &str,
) -> Positioned<FieldDefinition> {
    field.node.description = Some(default_positioned(description.to_string()));
    field
}

/// The innermost named type of `typ` (`Entry` for `[Entry!]!`)
pub fn underlying_type_name(typ: &Type) -> &str {
    match &typ.base {
        BaseType::Named(name) => name.as_str(),
        BaseType::List(inner) => underlying_type_name(inner),
    }
}
