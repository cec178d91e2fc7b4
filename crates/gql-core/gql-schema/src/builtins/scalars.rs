// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use gql_model::{NamedType, TypeLoader, TypeLoadingError};

use crate::extension::SchemaObject;

pub const DATE_TIME: &str = "DateTime";

pub const STANDARD_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

pub struct DateTimeType;

impl SchemaObject for DateTimeType {
    fn name(&self) -> &str {
        DATE_TIME
    }

    fn build(&self, _loader: &TypeLoader) -> Result<NamedType, TypeLoadingError> {
        Ok(NamedType::scalar(DATE_TIME)
            .with_description("The `DateTime` scalar type represents a point in time."))
    }
}

/// One of the scalars defined by GraphQL itself
pub struct StandardScalar {
    name: &'static str,
}

impl StandardScalar {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl SchemaObject for StandardScalar {
    fn name(&self) -> &str {
        self.name
    }

    fn build(&self, _loader: &TypeLoader) -> Result<NamedType, TypeLoadingError> {
        Ok(NamedType::scalar(self.name))
    }
}
