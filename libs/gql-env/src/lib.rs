// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Access to configuration values.
//!
//! All settings are read through the [`Environment`] trait so that tests (and embedders) can
//! supply values without touching the process environment.

mod map;
mod settings;

pub mod env_const;

pub use map::MapEnvironment;
pub use settings::GqlSettings;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Interpret the value of `key` as a boolean flag, falling back to `default_value` when unset.
    fn enabled(&self, key: &str, default_value: bool) -> Result<bool, EnvError> {
        let Some(value) = self.get(key) else {
            return Ok(default_value);
        };

        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(EnvError::InvalidBoolean {
                key: key.to_string(),
                value,
            }),
        }
    }

    fn get_or_else(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or_else(|| default_value.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("Invalid value for {key}: {value}. Expected true, 1, yes, on OR false, 0, no, off")]
    InvalidBoolean { key: String, value: String },
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
