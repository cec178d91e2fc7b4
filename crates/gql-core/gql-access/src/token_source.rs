// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{collections::HashMap, sync::Arc};

use crate::{PermissionResolutionError, Token};

/// Where the token of the current request comes from.
pub trait TokenSource: Send + Sync {
    fn current_token(&self) -> Result<Arc<Token>, PermissionResolutionError>;
}

/// Always the same token.
pub struct StaticTokenSource(Arc<Token>);

impl StaticTokenSource {
    pub fn new(token: Token) -> Self {
        Self(Arc::new(token))
    }
}

impl TokenSource for StaticTokenSource {
    fn current_token(&self) -> Result<Arc<Token>, PermissionResolutionError> {
        Ok(self.0.clone())
    }
}

/// For requests that did not present a token.
pub struct MissingTokenSource;

impl TokenSource for MissingTokenSource {
    fn current_token(&self) -> Result<Arc<Token>, PermissionResolutionError> {
        Err(PermissionResolutionError::MissingToken)
    }
}

/// Known tokens, indexed by access token.
#[derive(Debug, Default)]
pub struct TokenStore {
    tokens: HashMap<String, Arc<Token>>,
}

impl TokenStore {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens
                .into_iter()
                .map(|token| (token.access_token.clone(), Arc::new(token)))
                .collect(),
        }
    }

    /// Load tokens from a JSON array of token records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tokens: Vec<Token> = serde_json::from_str(json)?;
        Ok(Self::new(tokens))
    }

    pub fn get(&self, access_token: &str) -> Option<Arc<Token>> {
        self.tokens.get(access_token).cloned()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// A token source for a request that presented `access_token` (if any). The lookup happens
    /// when the source is first asked for the token.
    pub fn source_for(self: &Arc<Self>, access_token: Option<&str>) -> Arc<dyn TokenSource> {
        match access_token {
            Some(access_token) => Arc::new(StoredTokenSource {
                store: self.clone(),
                access_token: access_token.to_string(),
            }),
            None => Arc::new(MissingTokenSource),
        }
    }
}

struct StoredTokenSource {
    store: Arc<TokenStore>,
    access_token: String,
}

impl TokenSource for StoredTokenSource {
    fn current_token(&self) -> Result<Arc<Token>, PermissionResolutionError> {
        self.store
            .get(&self.access_token)
            .ok_or(PermissionResolutionError::UnknownToken)
    }
}
