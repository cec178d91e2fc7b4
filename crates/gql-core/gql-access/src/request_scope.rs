// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    collections::BTreeMap,
    sync::{Arc, OnceLock},
};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{PermissionResolutionError, READ_ACTION, Token, TokenSource, resource};

/// Identifiers a token may act on, grouped by resource kind (`sections` -> `["news", "blog"]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowedEntities(BTreeMap<String, Vec<String>>);

impl AllowedEntities {
    pub fn contains(&self, resource_kind: &str) -> bool {
        self.0.contains_key(resource_kind)
    }

    pub fn get(&self, resource_kind: &str) -> Option<&[String]> {
        self.0.get(resource_kind).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_permissions<'a>(permissions: impl Iterator<Item = &'a str>, action: &str) -> Self {
        let suffix = format!(":{action}");
        let mut pairs: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for scope in permissions.filter_map(|permission| permission.strip_suffix(&suffix)) {
            if let [resource_kind, identifier] = scope.split('.').collect::<Vec<_>>()[..] {
                pairs
                    .entry(resource_kind.to_string())
                    .or_default()
                    .push(identifier.to_string());
            }
        }

        Self(pairs)
    }
}

/// Permission checks for a single request.
///
/// The token is fetched from the source at most once (successfully) and cached, as are the
/// allowed entities derived from it. A token cannot change during a request, so a `RequestScope`
/// must not outlive the request it was created for.
///
/// If the token cannot be resolved, the failure is logged and every check fails closed.
pub struct RequestScope {
    source: Arc<dyn TokenSource>,
    token: OnceLock<Arc<Token>>,
    // (action extracted for, result)
    allowed_entities: OnceLock<(String, AllowedEntities)>,
}

impl RequestScope {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            token: OnceLock::new(),
            allowed_entities: OnceLock::new(),
        }
    }

    pub fn token(&self) -> Result<Arc<Token>, PermissionResolutionError> {
        if let Some(token) = self.token.get() {
            return Ok(token.clone());
        }

        let token = self.source.current_token()?;
        token.ensure_usable(Utc::now())?;

        Ok(self.token.get_or_init(|| token).clone())
    }

    /// The access token of the current request's token, if it resolves. Distinguishes requests
    /// that must not share permission-derived state.
    pub fn token_identity(&self) -> Option<String> {
        self.resolved_token().map(|token| token.access_token.clone())
    }

    fn resolved_token(&self) -> Option<Arc<Token>> {
        match self.token() {
            Ok(token) => Some(token),
            Err(error) => {
                warn!(%error, "Could not resolve the GraphQL token for the request");
                None
            }
        }
    }

    /// True if, for each scope, the token has a permission starting with `scope:` (ignoring case).
    /// True for an empty list of scopes.
    pub fn is_aware_of(&self, scopes: &[&str]) -> bool {
        let Some(token) = self.resolved_token() else {
            return false;
        };

        let permissions: Vec<String> = token
            .permissions
            .iter()
            .map(|permission| permission.to_lowercase())
            .collect();

        scopes.iter().all(|scope| {
            let prefix = format!("{}:", scope.to_lowercase());
            permissions
                .iter()
                .any(|permission| permission.starts_with(&prefix))
        })
    }

    /// True if the token has exactly the permission `scope:action` (ignoring case).
    pub fn can_perform(&self, scope: &str, action: &str) -> bool {
        let Some(token) = self.resolved_token() else {
            return false;
        };

        let wanted = format!("{scope}:{action}").to_lowercase();
        token
            .permissions
            .iter()
            .any(|permission| permission.to_lowercase() == wanted)
    }

    pub fn can_read(&self, scope: &str) -> bool {
        self.can_perform(scope, READ_ACTION)
    }

    /// The entities the token may act on for `action`.
    ///
    /// The result of the first call that resolves the token is kept for the rest of the request
    /// and returned by every later call, whatever `action` they ask for. Use a fresh
    /// `RequestScope` to extract for another action.
    pub fn extract_allowed_entities(&self, action: &str) -> AllowedEntities {
        if let Some((cached_action, cached)) = self.allowed_entities.get() {
            if cached_action != action {
                debug!(
                    action,
                    %cached_action,
                    "Returning allowed entities cached for another action"
                );
            }
            return cached.clone();
        }

        let Some(token) = self.resolved_token() else {
            return AllowedEntities::default();
        };

        let extracted =
            AllowedEntities::from_permissions(token.permissions.iter().map(String::as_str), action);

        self.allowed_entities
            .get_or_init(|| (action.to_string(), extracted))
            .1
            .clone()
    }

    pub fn allowed_entities(&self) -> AllowedEntities {
        self.extract_allowed_entities(READ_ACTION)
    }

    pub fn can_query_entries(&self) -> bool {
        let allowed = self.allowed_entities();
        allowed.contains(resource::SECTIONS) && allowed.contains(resource::ENTRY_TYPES)
    }

    pub fn can_query_assets(&self) -> bool {
        self.allowed_entities().contains(resource::VOLUMES)
    }

    pub fn can_query_global_sets(&self) -> bool {
        self.allowed_entities().contains(resource::GLOBAL_SETS)
    }

    pub fn can_query_users(&self) -> bool {
        self.allowed_entities().contains(resource::USER_GROUPS)
    }
}
