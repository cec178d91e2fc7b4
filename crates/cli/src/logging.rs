// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Console logging through `tracing`.
//!
//! The `GQL_LOG` environment variable controls what gets logged, following the conventions of
//! `RUST_LOG` (for example `GQL_LOG=gql_schema=debug`). Only warnings and errors are shown by
//! default.

use gql_env::env_const::GQL_LOG;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

pub fn init() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(GQL_LOG)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
