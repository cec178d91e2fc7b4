// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use gql_access::READ_ACTION;
use gql_env::Environment;
use tracing::debug;

use super::{
    command::{
        CommandDefinition, SubcommandDefinition, access_token_arg, get_required, tokens_file_arg,
    },
    inputs,
};

pub fn command_definition() -> SubcommandDefinition {
    SubcommandDefinition::new(
        "token",
        "Token related commands",
        vec![Box::new(ScopesCommandDefinition {})],
    )
}

struct ScopesCommandDefinition {}

impl CommandDefinition for ScopesCommandDefinition {
    fn command(&self) -> Command {
        Command::new("scopes")
            .about("Print the entities a token may act on, grouped by resource kind (JSON)")
            .arg(tokens_file_arg())
            .arg(access_token_arg().required(true))
            .arg(
                Arg::new("action")
                    .help("The action to list entities for")
                    .long("action")
                    .short('a')
                    .required(false)
                    .default_value(READ_ACTION)
                    .num_args(1),
            )
    }

    fn execute(&self, matches: &ArgMatches, env: &dyn Environment) -> Result<()> {
        let settings = inputs::settings(matches, env)?;
        let store = inputs::token_store(&settings)?;
        let action: String = get_required(matches, "action")?;

        let scope = inputs::request_scope(matches, &store);
        // Surface why the token is unusable rather than printing an empty mapping
        let token = scope.token().context("Could not resolve the token")?;

        let allowed = scope.extract_allowed_entities(&action);
        println!("{}", serde_json::to_string_pretty(&allowed)?);
        debug!(token = %token.name, %action, "Printed allowed entities");

        Ok(())
    }
}
