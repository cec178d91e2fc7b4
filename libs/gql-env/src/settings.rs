// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use crate::{EnvError, Environment, env_const::*};

/// Settings that control how the GraphQL schema gets assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GqlSettings {
    pub dev_mode: bool,
    pub schema_cache: bool,
    pub tokens_file: Option<PathBuf>,
    pub content_file: Option<PathBuf>,
}

impl Default for GqlSettings {
    fn default() -> Self {
        Self {
            dev_mode: false,
            schema_cache: true,
            tokens_file: None,
            content_file: None,
        }
    }
}

impl GqlSettings {
    pub fn from_env(env: &dyn Environment) -> Result<Self, EnvError> {
        Ok(Self {
            dev_mode: env.enabled(GQL_DEV_MODE, false)?,
            schema_cache: env.enabled(GQL_SCHEMA_CACHE, true)?,
            tokens_file: env.get(GQL_TOKENS_FILE).map(PathBuf::from),
            content_file: env.get(GQL_CONTENT_FILE).map(PathBuf::from),
        })
    }
}
