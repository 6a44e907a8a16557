//! CLI argument definitions using clap
//!
//! This module defines all command-line arguments for reqbook.

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::workflow::EditRequest;

#[derive(Parser, Debug, Clone)]
#[command(name = "reqbook", version, about = "Store, edit and run HTTP requests from named collections", long_about = None)]
pub struct Args {
    /// Use this YAML configuration file instead of the default one
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format for diagnostics on stderr
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Print the debug representation of errors
    #[arg(long = "debug", action = ArgAction::SetTrue, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a new request in a collection, guided by prompts
    #[command(visible_alias = "c")]
    Create,

    /// Print a stored request
    #[command(visible_alias = "i")]
    Inspect(Selection),

    /// List the requests or collections
    #[command(visible_alias = "l")]
    List {
        /// Only list requests of this collection
        #[arg(short = 'c', long = "collection", value_name = "NAME")]
        collection: Option<String>,

        /// List collection names instead of requests
        #[arg(long = "collection-only", action = ArgAction::SetTrue)]
        collection_only: bool,
    },

    /// Remove a stored request
    Remove {
        #[command(flatten)]
        selection: Selection,

        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes", action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Remove a collection and every request in it
    #[command(name = "remove-collection", visible_alias = "rc")]
    RemoveCollection {
        /// Collection to remove (prompted when omitted)
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes", action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Perform a stored request, optionally editing it first
    #[command(visible_alias = "r")]
    Run(RunArgs),

    /// Write shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Which stored request to act on; missing parts are prompted
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct Selection {
    #[arg(short = 'c', long = "collection", value_name = "NAME")]
    pub collection: Option<String>,

    #[arg(short = 'r', long = "request", value_name = "NAME")]
    pub request: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub selection: Selection,

    /// Print an equivalent curl command before sending
    #[arg(short = 'p', long = "print-curl", action = ArgAction::SetTrue)]
    pub print_curl: bool,

    /// Print the equivalent curl command and do not send anything
    #[arg(long = "offline", action = ArgAction::SetTrue)]
    pub offline: bool,

    /// Edit the body before sending
    #[arg(long = "edit-body", action = ArgAction::SetTrue)]
    pub edit_body: bool,

    /// Edit the domain before sending
    #[arg(long = "edit-domain", action = ArgAction::SetTrue)]
    pub edit_domain: bool,

    /// Edit the path before sending
    #[arg(long = "edit-path", action = ArgAction::SetTrue)]
    pub edit_path: bool,

    /// Edit the query parameters before sending
    #[arg(long = "edit-query-params", action = ArgAction::SetTrue)]
    pub edit_query_params: bool,

    /// Edit the headers before sending
    #[arg(long = "edit-headers", action = ArgAction::SetTrue)]
    pub edit_headers: bool,

    /// Edit the method before sending
    #[arg(long = "edit-method", action = ArgAction::SetTrue)]
    pub edit_method: bool,

    /// Edit the content type before sending
    #[arg(long = "edit-content-type", action = ArgAction::SetTrue)]
    pub edit_content_type: bool,

    /// Edit the whole request document before sending
    #[arg(long = "edit-all", action = ArgAction::SetTrue)]
    pub edit_all: bool,
}

impl RunArgs {
    pub fn edit_request(&self) -> EditRequest {
        EditRequest {
            body: self.edit_body,
            domain: self.edit_domain,
            path: self.edit_path,
            query_params: self.edit_query_params,
            headers: self.edit_headers,
            method: self.edit_method,
            content_type: self.edit_content_type,
            all: self.edit_all,
        }
    }
}

/// Shell types for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Log format for diagnostics
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_run_flags() {
        let args = Args::try_parse_from([
            "reqbook", "-vv", "r", "-c", "users", "-r", "get", "-p", "--edit-headers", "--edit-all",
        ])
        .unwrap();

        assert_eq!(args.verbose, 2);
        let Commands::Run(run) = args.command else { panic!("expected run") };
        assert_eq!(run.selection.collection.as_deref(), Some("users"));
        assert_eq!(run.selection.request.as_deref(), Some("get"));
        assert!(run.print_curl && !run.offline);

        let edits = run.edit_request();
        assert!(edits.headers && edits.all && !edits.body);
    }

    #[test]
    fn test_aliases_and_global_options() {
        let args = Args::try_parse_from(["reqbook", "rc", "old", "-y", "--config", "/tmp/c.yaml", "--log-format", "json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.yaml")));
        assert_eq!(args.log_format, LogFormat::Json);
        assert!(matches!(args.command, Commands::RemoveCollection { name: Some(ref n), yes: true } if n == "old"));

        let args = Args::try_parse_from(["reqbook", "l", "--collection-only"]).unwrap();
        assert!(matches!(args.command, Commands::List { collection: None, collection_only: true }));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["reqbook"]).is_err());
    }
}
