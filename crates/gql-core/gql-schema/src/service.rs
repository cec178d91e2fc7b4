// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use gql_access::RequestScope;
use gql_env::{Environment, GqlSettings};
use gql_model::{NamedType, QUERY_ROOT_TYPENAME, TypeLoader, TypeLoadingError};
use tracing::{debug, instrument, warn};

use crate::{
    builtins::{builtin_queries, builtin_types, query_root},
    content::ContentCatalog,
    error::SchemaBuildingError,
    extension::{QueryListBuilder, SchemaExtension, TypeListBuilder},
    generators::{EntryTypeGenerator, MatrixBlockTypeGenerator},
    schema::Schema,
};

/// Hands out the schema visible to the token of a request.
///
/// Schemas are cached per token (the access token, or `None` for requests whose token does not
/// resolve), since the types and queries in a schema depend on the token's permissions.
pub struct GqlService {
    content: Arc<ContentCatalog>,
    extensions: Vec<Arc<dyn SchemaExtension>>,
    settings: GqlSettings,
    schemas: Mutex<HashMap<Option<String>, Arc<Schema>>>,
}

impl GqlService {
    pub fn new(content: ContentCatalog) -> Self {
        Self::with_settings(content, GqlSettings::default())
    }

    pub fn with_settings(content: ContentCatalog, settings: GqlSettings) -> Self {
        Self {
            content: Arc::new(content),
            extensions: vec![],
            settings,
            schemas: Mutex::new(HashMap::new()),
        }
    }

    /// A service configured from `GQL_*` variables in `env`.
    pub fn from_env(
        content: ContentCatalog,
        env: &dyn Environment,
    ) -> Result<Self, SchemaBuildingError> {
        Ok(Self::with_settings(content, GqlSettings::from_env(env)?))
    }

    pub fn settings(&self) -> &GqlSettings {
        &self.settings
    }

    /// Extensions are consulted in registration order. Cached schemas are dropped, since they
    /// were built without the new extension.
    pub fn register_extension(&mut self, extension: Arc<dyn SchemaExtension>) {
        self.extensions.push(extension);
        self.invalidate();
    }

    pub fn with_extension(mut self, extension: Arc<dyn SchemaExtension>) -> Self {
        self.register_extension(extension);
        self
    }

    pub fn invalidate(&self) {
        self.schemas
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// The schema for the token of `scope`.
    ///
    /// Built on first use for a token and cached; rebuilt on every call in dev mode (`dev_mode`
    /// or the `GQL_DEV_MODE` setting), where it also gets validated, or when the schema cache is
    /// disabled.
    #[instrument(name = "GqlService::get_schema", skip(self, scope))]
    pub fn get_schema(
        &self,
        scope: &RequestScope,
        dev_mode: bool,
    ) -> Result<Arc<Schema>, SchemaBuildingError> {
        let dev_mode = dev_mode || self.settings.dev_mode;
        let cache_key = scope.token_identity();

        if !dev_mode && self.settings.schema_cache {
            let schemas = self.schemas.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(schema) = schemas.get(&cache_key) {
                return Ok(schema.clone());
            }
        }

        debug!(has_token = cache_key.is_some(), "Building schema");
        let schema = Arc::new(self.build_schema(scope, dev_mode)?);

        if !self.settings.schema_cache {
            return Ok(schema);
        }

        let mut schemas = self.schemas.lock().unwrap_or_else(PoisonError::into_inner);
        if dev_mode {
            schemas.insert(cache_key, schema.clone());
            Ok(schema)
        } else {
            // A concurrent build for the same token may have finished first
            Ok(schemas.entry(cache_key).or_insert(schema).clone())
        }
    }

    fn build_schema(
        &self,
        scope: &RequestScope,
        dev_mode: bool,
    ) -> Result<Schema, SchemaBuildingError> {
        let type_loader = TypeLoader::new();
        let allowed = scope.allowed_entities();

        let mut types = TypeListBuilder::new(builtin_types(self.content.clone(), &allowed));
        for extension in &self.extensions {
            extension.register_types(&mut types, scope);
        }

        for typ in types.into_types() {
            if typ.name() == QUERY_ROOT_TYPENAME {
                warn!(
                    type_name = QUERY_ROOT_TYPENAME,
                    "Ignoring a type registered under the reserved root query name"
                );
                continue;
            }

            let type_name = typ.name().to_string();
            type_loader.register_cached_type(&type_name, move |loader| typ.build(loader));
        }

        let mut queries = QueryListBuilder::new(builtin_queries(scope));
        for extension in &self.extensions {
            extension.register_queries(&mut queries, scope);
        }

        debug!(queries = ?queries.names(), "Registering root query type");
        let queries = queries.into_queries();
        type_loader.register_cached_type(QUERY_ROOT_TYPENAME, move |_| {
            Ok(query_root(queries.clone()))
        });

        let auxiliary_types = if dev_mode {
            self.generate_types(&type_loader, scope)?
        } else {
            vec![]
        };

        let schema = Schema::new(type_loader, auxiliary_types)?;

        if dev_mode {
            schema.assert_valid()?;
        }

        Ok(schema)
    }

    /// The types that only become known when the interfaces they implement get built.
    fn generate_types(
        &self,
        type_loader: &TypeLoader,
        scope: &RequestScope,
    ) -> Result<Vec<Arc<NamedType>>, TypeLoadingError> {
        let allowed = scope.allowed_entities();
        let matrix_generator = MatrixBlockTypeGenerator::new(self.content.clone(), allowed.clone());
        let entry_generator =
            EntryTypeGenerator::new(self.content.clone(), allowed, matrix_generator.clone());

        let mut types = entry_generator.generate_types(type_loader)?;
        types.extend(matrix_generator.generate_types(type_loader)?);

        for extension in &self.extensions {
            types.extend(extension.generate_types(type_loader, scope)?);
        }

        Ok(types)
    }
}
