// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command};
use gql_env::Environment;

pub trait CommandDefinition {
    fn command(&self) -> Command;

    fn execute(&self, matches: &ArgMatches, env: &dyn Environment) -> Result<()>;
}

pub struct SubcommandDefinition {
    pub name: &'static str,
    pub about: &'static str,
    pub command_definitions: Vec<Box<dyn CommandDefinition>>,
}

impl SubcommandDefinition {
    pub fn new(
        name: &'static str,
        about: &'static str,
        command_definitions: Vec<Box<dyn CommandDefinition>>,
    ) -> Self {
        Self {
            name,
            about,
            command_definitions,
        }
    }
}

impl CommandDefinition for SubcommandDefinition {
    fn command(&self) -> Command {
        Command::new(self.name)
            .about(self.about)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .disable_help_subcommand(true)
            .subcommands(
                self.command_definitions
                    .iter()
                    .map(|command_definition| command_definition.command()),
            )
    }

    fn execute(&self, matches: &ArgMatches, env: &dyn Environment) -> Result<()> {
        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| anyhow!("No subcommand given for `{}`", self.name))?;

        for command_definition in &self.command_definitions {
            if command_definition.command().get_name() == name {
                return command_definition.execute(sub_matches, env);
            }
        }

        Err(anyhow!("Unknown subcommand: {}", name))
    }
}

pub fn get<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, arg_id: &str) -> Option<T> {
    matches.get_one::<T>(arg_id).cloned()
}

pub fn get_required<T: Clone + Send + Sync + 'static>(
    matches: &ArgMatches,
    arg_id: &str,
) -> Result<T> {
    get(matches, arg_id).ok_or_else(|| anyhow!("Required argument `{}` is not present", arg_id))
}

pub fn tokens_file_arg() -> Arg {
    Arg::new("tokens")
        .help("The JSON file with the known tokens.")
        .long_help(
            "The JSON file with the known tokens (an array of token records). If not specified, \
             the program will attempt to read it from the environment (`GQL_TOKENS_FILE`).",
        )
        .long("tokens")
        .required(false)
        .value_parser(clap::value_parser!(PathBuf))
        .num_args(1)
}

pub fn content_file_arg() -> Arg {
    Arg::new("content")
        .help("The JSON file describing sections, entry types and matrix fields.")
        .long_help(
            "The JSON file describing sections, entry types and matrix fields. If not specified, \
             the program will attempt to read it from the environment (`GQL_CONTENT_FILE`).",
        )
        .long("content")
        .required(false)
        .value_parser(clap::value_parser!(PathBuf))
        .num_args(1)
}

pub fn access_token_arg() -> Arg {
    Arg::new("token")
        .help("The access token of the request")
        .long_help("The access token of the request. Requests without a token are anonymous.")
        .long("token")
        .short('t')
        .required(false)
        .num_args(1)
}

pub fn dev_mode_arg() -> Arg {
    Arg::new("dev")
        .help("Rebuild and validate the schema (dev mode)")
        .long("dev")
        .required(false)
        .action(ArgAction::SetTrue)
}

pub fn output_arg() -> Arg {
    Arg::new("output")
        .help("Output file path")
        .long_help("If specified, the output will be written to this file path instead of stdout.")
        .short('o')
        .long("output")
        .required(false)
        .value_parser(clap::value_parser!(PathBuf))
        .num_args(1)
}
