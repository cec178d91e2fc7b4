// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PermissionResolutionError;

/// An access token and the permissions granted to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub name: String,
    pub access_token: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

impl Token {
    pub fn new(name: &str, access_token: &str, permissions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            access_token: access_token.to_string(),
            enabled: true,
            expiry_date: None,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// A token may be used if it is enabled and, when it has an expiry date, `now` is before it.
    pub fn ensure_usable(&self, now: DateTime<Utc>) -> Result<(), PermissionResolutionError> {
        if !self.enabled {
            return Err(PermissionResolutionError::DisabledToken(self.name.clone()));
        }

        match self.expiry_date {
            Some(expiry_date) if expiry_date <= now => {
                Err(PermissionResolutionError::ExpiredToken(self.name.clone()))
            }
            _ => Ok(()),
        }
    }
}
