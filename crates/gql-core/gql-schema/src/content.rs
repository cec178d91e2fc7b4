// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The content structure that concrete GraphQL types get generated from. Supplied by whoever
//! owns the content model; this crate only reads it.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCatalog {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub matrix_fields: Vec<MatrixField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub uid: String,
    pub handle: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub entry_types: Vec<EntryTypeInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryTypeInfo {
    pub uid: String,
    pub handle: String,
    /// Handles of the matrix fields in the entry type's field layout
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixField {
    pub uid: String,
    pub handle: String,
    #[serde(default)]
    pub block_types: Vec<BlockTypeInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTypeInfo {
    pub uid: String,
    pub handle: String,
}

impl ContentCatalog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn matrix_field(&self, handle: &str) -> Option<&MatrixField> {
        self.matrix_fields.iter().find(|field| field.handle == handle)
    }
}
