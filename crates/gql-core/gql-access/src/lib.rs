// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Token permissions and the checks built on them.
//!
//! A token carries permission strings of the form `resourceKind.identifier:action` (for example
//! `sections.news:read`). A [`RequestScope`] answers questions about the current request's token
//! and caches what it derives for as long as the request lives.

mod error;
mod request_scope;
mod token;
mod token_source;

pub use error::PermissionResolutionError;
pub use request_scope::{AllowedEntities, RequestScope};
pub use token::Token;
pub use token_source::{MissingTokenSource, StaticTokenSource, TokenSource, TokenStore};

/// The action checked when none is given.
pub const READ_ACTION: &str = "read";

/// Resource kinds that appear in permission strings.
pub mod resource {
    pub const SECTIONS: &str = "sections";
    pub const ENTRY_TYPES: &str = "entrytypes";
    pub const VOLUMES: &str = "volumes";
    pub const GLOBAL_SETS: &str = "globalsets";
    pub const USER_GROUPS: &str = "usergroups";
}
