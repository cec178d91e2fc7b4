// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Structural checks of a loaded schema: the GraphQL type system rules that the type definitions
//! themselves cannot enforce.

use std::{collections::BTreeMap, sync::Arc};

use async_graphql_parser::types::TypeKind;
use gql_model::NamedType;
use tracing::warn;

use crate::error::SchemaValidationError;

/// Check `types` (which must contain every type they reference) and return all violations.
pub(crate) fn validate(
    query_type: &NamedType,
    types: &BTreeMap<String, Arc<NamedType>>,
) -> Vec<SchemaValidationError> {
    let mut errors = vec![];

    if !matches!(query_type.kind(), TypeKind::Object(_)) {
        errors.push(SchemaValidationError::RootNotObject(
            query_type.name().to_string(),
        ));
    }

    for typ in types.values() {
        match typ.kind() {
            TypeKind::Object(_) => {
                validate_fields(typ, &mut errors);
                validate_implementations(typ, types, &mut errors);
            }
            TypeKind::Interface(_) => {
                validate_fields(typ, &mut errors);

                let implemented = types
                    .values()
                    .any(|candidate| candidate.interfaces().contains(&typ.name()));
                if !implemented {
                    warn!(interface = typ.name(), "Interface has no implementations");
                }
            }
            TypeKind::Union(_) => validate_union(typ, types, &mut errors),
            _ => {}
        }
    }

    errors
}

fn validate_fields(typ: &NamedType, errors: &mut Vec<SchemaValidationError>) {
    if typ.fields().is_empty() {
        errors.push(SchemaValidationError::NoFields(typ.name().to_string()));
    }
}

fn validate_implementations(
    typ: &NamedType,
    types: &BTreeMap<String, Arc<NamedType>>,
    errors: &mut Vec<SchemaValidationError>,
) {
    for interface_name in typ.interfaces() {
        let Some(interface) = types
            .get(interface_name)
            .filter(|interface| matches!(interface.kind(), TypeKind::Interface(_)))
        else {
            errors.push(SchemaValidationError::NotAnInterface {
                type_name: typ.name().to_string(),
                interface: interface_name.to_string(),
            });
            continue;
        };

        for interface_field in interface.fields() {
            let field_name = interface_field.node.name.node.as_str();
            let provided = typ
                .fields()
                .iter()
                .any(|field| field.node.name.node.as_str() == field_name);

            if !provided {
                errors.push(SchemaValidationError::MissingInterfaceField {
                    type_name: typ.name().to_string(),
                    interface: interface_name.to_string(),
                    field: field_name.to_string(),
                });
            }
        }
    }
}

fn validate_union(
    typ: &NamedType,
    types: &BTreeMap<String, Arc<NamedType>>,
    errors: &mut Vec<SchemaValidationError>,
) {
    let members = typ.union_members();

    if members.is_empty() {
        errors.push(SchemaValidationError::EmptyUnion(typ.name().to_string()));
    }

    for member in members {
        let is_object = types
            .get(member)
            .is_some_and(|member_type| matches!(member_type.kind(), TypeKind::Object(_)));

        if !is_object {
            errors.push(SchemaValidationError::NonObjectUnionMember {
                union_name: typ.name().to_string(),
                member: member.to_string(),
            });
        }
    }
}
