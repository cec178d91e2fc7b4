// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{collections::BTreeMap, sync::Arc};

use async_graphql_parser::{
    Positioned,
    types::{FieldDefinition, InputValueDefinition, TypeKind},
};
use gql_model::NamedType;

use crate::builtins::STANDARD_SCALARS;

/// Render `Query` followed by the other types in name order. The GraphQL standard scalars are
/// implied and left out.
pub(crate) fn print_schema(
    query_type: &NamedType,
    types: &BTreeMap<String, Arc<NamedType>>,
) -> String {
    let mut blocks = vec![print_type(query_type)];

    blocks.extend(
        types
            .values()
            .filter(|typ| typ.name() != query_type.name())
            .filter(|typ| !STANDARD_SCALARS.iter().any(|scalar| *scalar == typ.name()))
            .map(|typ| print_type(typ)),
    );

    let mut sdl = blocks.join("\n");
    if !sdl.ends_with('\n') {
        sdl.push('\n');
    }
    sdl
}

fn print_type(typ: &NamedType) -> String {
    let mut out = String::new();
    print_description(&mut out, typ.description(), "");

    let name = typ.name();
    match typ.kind() {
        TypeKind::Scalar => out.push_str(&format!("scalar {name}\n")),
        TypeKind::Object(object) => {
            out.push_str(&format!("type {name}"));
            if !object.implements.is_empty() {
                let interfaces: Vec<&str> = object
                    .implements
                    .iter()
                    .map(|interface| interface.node.as_str())
                    .collect();
                out.push_str(&format!(" implements {}", interfaces.join(" & ")));
            }
            print_fields(&mut out, &object.fields);
        }
        TypeKind::Interface(interface) => {
            out.push_str(&format!("interface {name}"));
            print_fields(&mut out, &interface.fields);
        }
        TypeKind::Union(_) => {
            out.push_str(&format!(
                "union {name} = {}\n",
                typ.union_members().join(" | ")
            ));
        }
        TypeKind::Enum(enum_type) => {
            out.push_str(&format!("enum {name} {{\n"));
            for value in &enum_type.values {
                out.push_str(&format!("  {}\n", value.node.value.node));
            }
            out.push_str("}\n");
        }
        TypeKind::InputObject(input) => {
            out.push_str(&format!("input {name} {{\n"));
            for field in &input.fields {
                print_description(&mut out, description_of(&field.node.description), "  ");
                out.push_str(&format!("  {}\n", print_argument(field)));
            }
            out.push_str("}\n");
        }
    }

    out
}

fn print_fields(out: &mut String, fields: &[Positioned<FieldDefinition>]) {
    out.push_str(" {\n");
    for field in fields {
        let field = &field.node;
        print_description(out, description_of(&field.description), "  ");

        out.push_str(&format!("  {}", field.name.node));
        if !field.arguments.is_empty() {
            let arguments: Vec<String> = field.arguments.iter().map(print_argument).collect();
            out.push_str(&format!("({})", arguments.join(", ")));
        }
        out.push_str(&format!(": {}\n", field.ty.node));
    }
    out.push_str("}\n");
}

fn print_argument(argument: &Positioned<InputValueDefinition>) -> String {
    let argument = &argument.node;
    match &argument.default_value {
        Some(default_value) => format!(
            "{}: {} = {}",
            argument.name.node, argument.ty.node, default_value.node
        ),
        None => format!("{}: {}", argument.name.node, argument.ty.node),
    }
}

fn description_of(description: &Option<Positioned<String>>) -> Option<&str> {
    description
        .as_ref()
        .map(|description| description.node.as_str())
}

fn print_description(out: &mut String, description: Option<&str>, indent: &str) {
    if let Some(description) = description {
        // Block strings only escape `"""`; a trailing quote would run into the closing delimiter
        let escaped = description.replace("\"\"\"", "\\\"\"\"");
        let separator = if escaped.ends_with('"') {
            format!("\n{indent}")
        } else {
            String::new()
        };
        out.push_str(&format!("{indent}\"\"\"{escaped}{separator}\"\"\"\n"));
    }
}
