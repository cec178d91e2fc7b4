// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Assembly of the GraphQL schema visible to a token.
//!
//! [`GqlService::get_schema`] registers the built-in types and queries (and whatever the
//! registered [`SchemaExtension`]s add) into a fresh type loader, then wraps it in a [`Schema`].
//! Types get built when first loaded, either by the executor or by [`Schema::assert_valid`] in
//! dev mode.

pub mod builtins;
pub mod content;
pub mod error;
pub mod extension;
pub mod generators;
pub mod schema;
pub mod service;

mod sdl;
mod validation;

pub use content::ContentCatalog;
pub use error::{SchemaBuildingError, SchemaValidationError};
pub use extension::{QueryListBuilder, SchemaExtension, SchemaObject, TypeListBuilder};
pub use schema::Schema;
pub use service::GqlService;
