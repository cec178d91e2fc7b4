// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeLoadingError {
    #[error("Tried to load an unregistered type '{0}'")]
    UnregisteredType(String),

    #[error("Loader for type '{requested}' produced a type named '{built}'")]
    NameMismatch { requested: String, built: String },

    #[error("Could not construct type '{type_name}': {message}")]
    Construction { type_name: String, message: String },

    #[error("Type '{0}' depends on itself while being constructed")]
    CyclicConstruction(String),
}
