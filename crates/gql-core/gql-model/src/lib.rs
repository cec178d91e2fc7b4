// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Named GraphQL types and the machinery to build them lazily.
//!
//! Types refer to each other only by name. A [`TypeLoader`] maps each name to a factory, and a
//! [`TypeRegistry`] memoizes what the factories produce. This split lets a type graph with
//! cycles (an interface whose field returns a union whose members implement the interface) be
//! declared in any order: nothing gets built until somebody asks for it by name.

pub mod definition;
pub mod error;
pub mod named_type;
pub mod type_loader;
pub mod type_registry;
pub mod union;

pub use error::TypeLoadingError;
pub use named_type::{NamedType, TypeResolver};
pub use type_loader::{TypeFactory, TypeLoader};
pub use type_registry::TypeRegistry;

/// Name of the root query type. Reserved: plugins must not register a type under this name.
pub const QUERY_ROOT_TYPENAME: &str = "Query";
