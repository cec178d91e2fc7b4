// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use anyhow::Result;
use gql_env::SystemEnvironment;

use commands::{
    command::{CommandDefinition, SubcommandDefinition},
    schema, token,
};

mod commands;
mod logging;

fn main() -> Result<()> {
    logging::init();

    let subcommand_definition = SubcommandDefinition::new(
        "gql",
        "Inspect the GraphQL schema visible to a token",
        vec![
            Box::new(schema::command_definition()),
            Box::new(token::command_definition()),
        ],
    );

    let command = subcommand_definition
        .command()
        .version(env!("CARGO_PKG_VERSION"));

    let matches = command.get_matches();

    subcommand_definition.execute(&matches, &SystemEnvironment)
}
