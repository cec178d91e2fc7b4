// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::Arc;

use crate::Environment;

/// An in-memory environment, optionally layered over another one (typically
/// [`crate::SystemEnvironment`]).
#[derive(Clone, Default)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
    fallback: Option<Arc<dyn Environment>>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(fallback: Arc<dyn Environment>) -> Self {
        Self {
            values: HashMap::new(),
            fallback: Some(fallback),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl Environment for MapEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| self.fallback.as_ref().and_then(|env| env.get(key)))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnvironment {
    fn from(values: [(&str, &str); N]) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            fallback: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn own_values_shadow_fallback() {
        let fallback = Arc::new(MapEnvironment::from([("A", "fallback"), ("B", "fallback")]));
        let mut env = MapEnvironment::with_fallback(fallback);
        env.set("A", "own");

        assert_eq!(env.get("A"), Some("own".to_string()));
        assert_eq!(env.get("B"), Some("fallback".to_string()));
        assert_eq!(env.get("C"), None);
        assert_eq!(env.get_or_else("C", "default"), "default");
    }

    #[test]
    fn flags() {
        let env = MapEnvironment::from([("ON", " TRUE "), ("OFF", "0")]);

        assert!(env.enabled("ON", false).unwrap());
        assert!(!env.enabled("OFF", true).unwrap());
        assert!(env.enabled("UNSET", true).unwrap());
    }
}
