//! Top level subcommands

pub(crate) mod command;
mod inputs;
pub(crate) mod schema;
pub(crate) mod token;
