// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// Rebuild and fully validate the schema on every request.
pub const GQL_DEV_MODE: &str = "GQL_DEV_MODE";

/// Keep built schemas around between requests (per token). Defaults to `true`.
pub const GQL_SCHEMA_CACHE: &str = "GQL_SCHEMA_CACHE";

/// Log filter directives, same syntax as `RUST_LOG`.
pub const GQL_LOG: &str = "GQL_LOG";

pub const GQL_TOKENS_FILE: &str = "GQL_TOKENS_FILE";
pub const GQL_CONTENT_FILE: &str = "GQL_CONTENT_FILE";
