// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{fs::File, io::Write, path::PathBuf};

use anyhow::Result;
use clap::{ArgMatches, Command};
use colored::Colorize;
use gql_env::Environment;
use gql_schema::GqlService;

use super::{
    command::{
        CommandDefinition, SubcommandDefinition, access_token_arg, content_file_arg,
        dev_mode_arg, get, output_arg, tokens_file_arg,
    },
    inputs,
};

pub fn command_definition() -> SubcommandDefinition {
    SubcommandDefinition::new(
        "schema",
        "GraphQL schema related commands",
        vec![
            Box::new(PrintCommandDefinition {}),
            Box::new(CheckCommandDefinition {}),
        ],
    )
}

fn with_input_args(command: Command) -> Command {
    command
        .arg(tokens_file_arg())
        .arg(content_file_arg())
        .arg(access_token_arg())
}

struct PrintCommandDefinition {}

impl CommandDefinition for PrintCommandDefinition {
    fn command(&self) -> Command {
        with_input_args(Command::new("print").about("Print the schema visible to a token (SDL)"))
            .arg(dev_mode_arg())
            .arg(output_arg())
    }

    fn execute(&self, matches: &ArgMatches, env: &dyn Environment) -> Result<()> {
        let settings = inputs::settings(matches, env)?;
        let store = inputs::token_store(&settings)?;
        let content = inputs::content_catalog(&settings)?;
        let dev_mode = matches.get_flag("dev");

        let service = GqlService::with_settings(content, settings);
        let scope = inputs::request_scope(matches, &store);
        let sdl = service.get_schema(&scope, dev_mode)?.to_sdl()?;

        match get::<PathBuf>(matches, "output") {
            Some(output) => File::create(output)?.write_all(sdl.as_bytes())?,
            None => print!("{sdl}"),
        }

        Ok(())
    }
}

struct CheckCommandDefinition {}

impl CommandDefinition for CheckCommandDefinition {
    fn command(&self) -> Command {
        with_input_args(
            Command::new("check")
                .about("Build the schema visible to a token in dev mode and validate it"),
        )
    }

    fn execute(&self, matches: &ArgMatches, env: &dyn Environment) -> Result<()> {
        let settings = inputs::settings(matches, env)?;
        let store = inputs::token_store(&settings)?;
        let content = inputs::content_catalog(&settings)?;

        let service = GqlService::with_settings(content, settings);
        let scope = inputs::request_scope(matches, &store);
        let schema = service.get_schema(&scope, true)?;

        println!(
            "{} ({} types)",
            "Schema is valid".green(),
            schema.reachable_types()?.len()
        );

        Ok(())
    }
}
