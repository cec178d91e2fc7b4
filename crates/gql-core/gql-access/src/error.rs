// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

/// The token for the current request could not be determined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionResolutionError {
    #[error("Missing authorization token")]
    MissingToken,

    #[error("Invalid authorization token")]
    UnknownToken,

    #[error("Token `{0}` is disabled")]
    DisabledToken(String),

    #[error("Token `{0}` has expired")]
    ExpiredToken(String),
}
