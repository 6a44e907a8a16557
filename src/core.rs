use clap::Parser;
use console::Term;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::body::resolve;
use crate::cli::{Args, Commands, LogFormat, RunArgs, Selection, Shell};
use crate::client::{build_client, execute};
use crate::config::AppConfig;
use crate::devexp::{format_curl_pretty, generate_curl_command};
use crate::errors::{ReqbookError, Result};
use crate::output::{print_json, print_response, ResponseReport};
use crate::prompts::{Prompter, TerminalPrompter};
use crate::request::build_request;
use crate::status::ExitStatus;
use crate::store::CollectionStore;
use crate::workflow::{apply_edits, prompt_new_request};

/// Log filter used when no `-v` is given
pub const LOG_ENV: &str = "REQBOOK_LOG";

const NO_REQUESTS: &str = "There are no available requests in collection";
const NO_COLLECTIONS: &str = "There are no collections";

/// Main entry point for the CLI.
///
/// Parses arguments, sets up logging, and dispatches the subcommand. Every
/// failure ends up in [`handle_error`]; nothing below exits the process.
pub fn run(args: Vec<String>) -> ExitStatus {
    let debug = args.iter().any(|a| a == "--debug");

    let parsed = match Args::try_parse_from(&args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    init_tracing(parsed.verbose, parsed.log_format);

    match program(parsed) {
        Ok(status) => status,
        Err(e) => handle_error(e, debug),
    }
}

/// Install the stderr subscriber; `-v` flags take precedence over `REQBOOK_LOG`
fn init_tracing(verbose: u8, format: LogFormat) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // a subscriber may already be installed when embedded (e.g. tests)
    let _ = match format {
        LogFormat::Text => builder.with_target(false).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

pub fn program(args: Args) -> Result<ExitStatus> {
    if args.debug {
        eprintln!("Debug: {:?}", args);
    }

    if let Commands::Completions { shell } = args.command {
        generate_completions(shell);
        return Ok(ExitStatus::Success);
    }

    let config = AppConfig::load(args.config.as_deref())?;
    debug!(collections = %config.collection_directory.display(), "Configuration loaded");

    let mut store = CollectionStore::new(&config.collection_directory);
    let mut prompter = TerminalPrompter::new(&config.editor, &config.temporary_files_directory);

    match args.command {
        Commands::Create => {
            let collections = store.list_collections()?;
            let descriptor = prompt_new_request(&mut prompter, &collections)?;
            let path = store.save(&descriptor)?;
            info!(path = %path.display(), "Request created");
            println!("Request was added to collection");
        }

        Commands::Inspect(selection) => {
            let (collection, name) =
                choose_request(&store, &mut prompter, &selection, "What is the request you want to inspect?")?;
            let descriptor = store.load(&collection, &name)?;
            print_json(&descriptor.to_pretty_json()?)?;
        }

        Commands::List { collection, collection_only } => {
            let names = if collection_only {
                store.list_collections()?
            } else {
                store.list_requests(collection.as_deref())?
            };

            if names.is_empty() {
                let message = if collection_only { NO_COLLECTIONS } else { NO_REQUESTS };
                return Err(ReqbookError::Argument(message.to_string()));
            }

            for name in names {
                println!("{}", name);
            }
        }

        Commands::Remove { selection, yes } => {
            let (collection, name) =
                choose_request(&store, &mut prompter, &selection, "What is the request you want to remove?")?;

            if !yes && !prompter.confirm(&format!("Remove request {}/{}?", collection, name), false)? {
                return Ok(ExitStatus::Success);
            }

            store.remove(&collection, &name)?;
            info!(collection = %collection, request = %name, "Request removed");
            println!("Request was removed from collection");
        }

        Commands::RemoveCollection { name, yes } => {
            let collection = match name {
                Some(name) => name,
                None => choose_collection(&store, &mut prompter)?,
            };

            if !yes
                && !prompter.confirm(&format!("Remove collection {} and all its requests?", collection), false)?
            {
                return Ok(ExitStatus::Success);
            }

            store.remove_collection(&collection)?;
            info!(collection = %collection, "Collection removed");
            println!("Collection was removed");
        }

        Commands::Run(run_args) => run_request(&config, &mut store, &mut prompter, &run_args)?,

        // written before the configuration is loaded
        Commands::Completions { .. } => {}
    }

    Ok(ExitStatus::Success)
}

/// Load, edit, preview and send one stored request
fn run_request(
    config: &AppConfig,
    store: &mut CollectionStore,
    prompter: &mut TerminalPrompter,
    run_args: &RunArgs,
) -> Result<()> {
    let (collection, name) = choose_request(
        store,
        prompter,
        &run_args.selection,
        "What is the request you want to perform?",
    )?;
    let mut descriptor = store.load(&collection, &name)?;

    let edits = run_args.edit_request().merged_with_config(config);
    let state = apply_edits(&mut descriptor, &edits, prompter, store)?;
    debug!(state = ?state, "Edits applied");

    let body = resolve(&descriptor);

    if run_args.print_curl || run_args.offline {
        let command = generate_curl_command(&descriptor, &body)?;
        println!("cURL equivalent:");
        if Term::stdout().is_term() {
            println!("{}", format_curl_pretty(&command));
        } else {
            println!("{}", command);
        }
    }

    if run_args.offline {
        return Ok(());
    }

    let client = build_client()?;
    let request = build_request(&client, &descriptor, &body)?;

    eprintln!("Request started...");
    let (response, elapsed) = execute(&client, request)?;
    let report = ResponseReport::from_response(response, elapsed)?;
    print_response(&report)
}

/// Resolve the selected request, prompting for whatever was not given
fn choose_request(
    store: &CollectionStore,
    prompter: &mut dyn Prompter,
    selection: &Selection,
    label: &str,
) -> Result<(String, String)> {
    let collection = match &selection.collection {
        Some(collection) => collection.clone(),
        None => choose_collection(store, prompter)?,
    };

    let name = match &selection.request {
        Some(name) => name.clone(),
        None => {
            let requests = store.list_requests(Some(&collection))?;
            if requests.is_empty() {
                return Err(ReqbookError::Argument(NO_REQUESTS.to_string()));
            }
            let index = prompter.fuzzy_select(label, &requests)?;
            requests[index].clone()
        }
    };

    Ok((collection, name))
}

fn choose_collection(store: &CollectionStore, prompter: &mut dyn Prompter) -> Result<String> {
    let collections = store.list_collections()?;
    if collections.is_empty() {
        return Err(ReqbookError::Argument(NO_COLLECTIONS.to_string()));
    }
    let index = prompter.fuzzy_select("Choose one of your collections", &collections)?;
    Ok(collections[index].clone())
}

fn handle_error(error: ReqbookError, debug: bool) -> ExitStatus {
    if debug {
        eprintln!("Error: {:?}", error);
    } else {
        eprintln!("Error: {}", error);
    }

    // All errors return the same exit code (1) following Unix conventions
    ExitStatus::Error
}

fn generate_completions(shell: Shell) {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as ClapShell};

    let mut cmd = Args::command();
    let shell = match shell {
        Shell::Bash => ClapShell::Bash,
        Shell::Zsh => ClapShell::Zsh,
        Shell::Fish => ClapShell::Fish,
        Shell::PowerShell => ClapShell::PowerShell,
        Shell::Elvish => ClapShell::Elvish,
    };

    generate(shell, &mut cmd, "reqbook", &mut std::io::stdout());
}
