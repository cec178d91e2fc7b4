// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Loading the token and content files the commands work with.

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::ArgMatches;
use gql_access::{RequestScope, TokenStore};
use gql_env::{Environment, GqlSettings};
use gql_schema::ContentCatalog;
use tracing::debug;

use super::command::get;

/// Settings from the environment, with file arguments given on the command line taking
/// precedence.
pub fn settings(matches: &ArgMatches, env: &dyn Environment) -> Result<GqlSettings> {
    let mut settings = GqlSettings::from_env(env)?;

    if let Some(tokens_file) = path_arg(matches, "tokens") {
        settings.tokens_file = Some(tokens_file);
    }
    if let Some(content_file) = path_arg(matches, "content") {
        settings.content_file = Some(content_file);
    }

    Ok(settings)
}

// Not every command defines every file argument
fn path_arg(matches: &ArgMatches, arg_id: &str) -> Option<PathBuf> {
    matches
        .try_get_one::<PathBuf>(arg_id)
        .ok()
        .flatten()
        .cloned()
}

/// The known tokens. No tokens file means no known tokens.
pub fn token_store(settings: &GqlSettings) -> Result<Arc<TokenStore>> {
    let Some(path) = &settings.tokens_file else {
        debug!("No tokens file given");
        return Ok(Arc::new(TokenStore::default()));
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("Could not read tokens file {}", path.display()))?;
    let store = TokenStore::from_json(&json)
        .with_context(|| format!("Invalid tokens file {}", path.display()))?;
    debug!(count = store.len(), "Loaded tokens");

    Ok(Arc::new(store))
}

/// The content catalog. No content file means empty content.
pub fn content_catalog(settings: &GqlSettings) -> Result<ContentCatalog> {
    let Some(path) = &settings.content_file else {
        debug!("No content file given");
        return Ok(ContentCatalog::default());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("Could not read content file {}", path.display()))?;
    ContentCatalog::from_json(&json)
        .with_context(|| format!("Invalid content file {}", path.display()))
}

/// The scope of a request presenting the `--token` argument (if any).
pub fn request_scope(matches: &ArgMatches, store: &Arc<TokenStore>) -> RequestScope {
    let access_token: Option<String> = get(matches, "token");
    RequestScope::new(store.source_for(access_token.as_deref()))
}
