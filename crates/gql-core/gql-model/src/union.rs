// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use tracing::debug;

use crate::{
    named_type::{NamedType, TypeResolver},
    type_loader::TypeLoader,
};

/// Get (creating if needed) the union `name` over `member_types`, and make it loadable by name.
///
/// Once a union exists under `name`, later calls return it unchanged: different `member_types`
/// or `resolver` passed afterwards are ignored.
pub fn get_or_build_union<S: AsRef<str>>(
    loader: &TypeLoader,
    name: &str,
    member_types: &[S],
    resolver: TypeResolver,
) -> Arc<NamedType> {
    let union_type = match loader.registry().get(name) {
        Some(existing) => {
            let requested: Vec<&str> =
                member_types.iter().map(|member| member.as_ref()).collect();
            if existing.union_members() != requested {
                debug!(
                    union = name,
                    ?requested,
                    "Union already exists with different members, keeping the existing one"
                );
            }
            existing
        }
        None => loader.registry().create(
            name,
            Arc::new(NamedType::union(name, member_types).with_resolver(resolver)),
        ),
    };

    let registered = union_type.clone();
    loader.register_type(name, move |_| Ok(registered.clone()));

    union_type
}
