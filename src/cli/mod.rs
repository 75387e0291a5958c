//
//  apim-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod completion;
mod copy;
mod service;

pub use completion::CompletionCommand;
pub use copy::CopyCommand;
pub use service::ServiceCommand;

use clap::{Parser, Subcommand};

/// apim - Work with API-management instances from the command line
#[derive(Parser, Debug)]
#[command(
    name = "apim",
    version,
    about = "Work with API-management instances from the command line",
    long_about = "apim talks to the admin API of API-management instances.\n\n\
                  It copies services with their metrics, methods, plans, limits, and\n\
                  mapping rules between instances, and manages services in place.",
    propagate_version = true,
    after_help = "Use 'apim <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Accept self-signed TLS certificates on the admin endpoints
    #[arg(long, short = 'k', global = true, env = "APIM_INSECURE")]
    pub insecure: bool,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy entities between instances
    Copy(CopyCommand),

    /// Manage services on an instance
    #[command(visible_alias = "svc")]
    Service(ServiceCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}
