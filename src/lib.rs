//
//  apim-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API-Management CLI Library
//!
//! Core functionality for the `apim` CLI tool: it talks to the admin API
//! of API-management instances and replicates services between them.
//!
//! ## Overview
//!
//! A service bundles proxy settings, metrics, methods, application plans,
//! plan limits, mapping rules, and backend usages. Copying one across
//! instances cannot reuse numeric ids (they are instance-local), so the
//! copy pipeline correlates entities by canonical system name and rewrites
//! every id reference through the resulting map.
//!
//! ## Features
//!
//! - **Service Copy**: Full replication of a service and its sub-resources
//! - **Idempotent Writes**: Re-running a copy updates rather than duplicates
//! - **Flexible Addressing**: Services addressed by id or system name
//! - **Scriptable**: JSON output for automation
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: Admin API transport, pagination, and the [`api::Remote`] seam
//! - [`entities`]: Domain objects backed by remote records
//! - [`copy`]: The copy pipeline and its tasks
//! - [`error`]: Error taxonomy shared by transport and domain layers

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the
/// clap derive API.
pub mod cli;

/// Admin API transport.
///
/// The HTTP client, the pagination cursor, and the [`api::Remote`] trait
/// the rest of the crate is written against. The client handles
/// authentication, request building, and error classification.
pub mod api;

/// The copy pipeline.
///
/// Orchestrates the replication of a source service onto a target, one
/// task per sub-resource kind, in dependency order.
pub mod copy;

/// Domain entities backed by remote records.
///
/// Services, backends, metrics, methods, application plans, mapping rules,
/// and backend usages, plus the system-name correlation helpers.
pub mod entities;

/// Error taxonomy.
pub mod error;

/// Re-export of the main CLI struct for convenient access.
///
/// The [`Cli`] struct represents the root command and is the entry point
/// for parsing command-line arguments.
pub use cli::Cli;

/// Re-export of the crate error type.
pub use error::{Error, Result};

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes.
pub const APP_NAME: &str = "apim";

/// Application version constant.
///
/// The current version of the CLI, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts to
/// programmatically detect the outcome of CLI operations.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// The addressed resource does not exist on the remote.
    pub const NOT_FOUND: i32 = 8;
}
