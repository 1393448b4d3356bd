// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Relay command-line interface.
//!
//! This is the main entry point for the `relay` command, which loads a class
//! manifest and inspects or exercises delegated dispatch on its instance.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand};
use miette::Result;
use tracing_subscriber::{self, EnvFilter};

mod commands;

/// Relay: attribute objects with delegated message sends
#[derive(Debug, Parser)]
#[command(name = "relay")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Class manifest to load
    #[arg(
        short,
        long,
        global = true,
        env = "RELAY_MANIFEST",
        default_value = "relay.toml"
    )]
    manifest: Utf8PathBuf,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the manifest and print the instance it builds
    Check,

    /// Show how a selector would be answered, without binding it
    Resolve {
        /// Selector to resolve
        selector: String,
    },

    /// Report whether the instance responds to each selector
    Probe {
        /// Selectors to probe
        #[arg(required = true)]
        selectors: Vec<String>,
    },

    /// Send a message to the instance and print the result
    Send {
        /// Selector to send
        selector: String,

        /// Arguments, parsed as TOML values (plain text is a string)
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = cli.manifest.as_path();
    let result = match &cli.command {
        Command::Check => commands::check(path),
        Command::Resolve { selector } => commands::resolve(path, selector),
        Command::Probe { selectors } => commands::probe(path, selectors),
        Command::Send { selector, args } => commands::send(path, selector, args),
    };

    // Exit with appropriate code
    match result {
        Ok(output) => {
            print!("{output}");
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    // The binary's module path is `relay`; `relay_core` carries the
    // resolution and binding events.
    match v {
        0 => "relay=info,relay_core=info",
        1 => "relay=debug,relay_core=debug",
        _ => "relay=trace,relay_core=trace",
    }
}
