//
//  apim-cli
//  cli/service.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Service commands
//!
//! In-place service management on a single instance: list, show, delete.
//! Services are addressed by id or system name in the same argument.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use crate::api::{AdminClient, RemoteHandle};
use crate::entities::{EntityRef, Service};

use super::GlobalOptions;

/// Manage services on an instance
#[derive(Args, Debug)]
pub struct ServiceCommand {
    #[command(subcommand)]
    pub command: ServiceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ServiceSubcommand {
    /// List services
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View service details
    Show(ShowArgs),

    /// Delete a service
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Instance admin URL, http[s]://<token>@<host>
    #[arg(long, short = 'r', env = "APIM_REMOTE")]
    pub remote: String,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Instance admin URL, http[s]://<token>@<host>
    #[arg(long, short = 'r', env = "APIM_REMOTE")]
    pub remote: String,

    /// Service to show, by id or system name
    pub service: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Instance admin URL, http[s]://<token>@<host>
    #[arg(long, short = 'r', env = "APIM_REMOTE")]
    pub remote: String,

    /// Service to delete, by id or system name
    pub service: String,
}

impl ServiceCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ServiceSubcommand::List(args) => list(args, global).await,
            ServiceSubcommand::Show(args) => show(args, global).await,
            ServiceSubcommand::Delete(args) => delete(args, global).await,
        }
    }
}

fn connect(remote_url: &str, global: &GlobalOptions) -> Result<RemoteHandle> {
    Ok(Arc::new(AdminClient::from_remote_url(
        remote_url,
        global.insecure,
    )?))
}

async fn resolve(remote: RemoteHandle, raw: &str) -> Result<Service> {
    let reference = EntityRef::parse(raw);
    Service::find(remote, &reference)
        .await?
        .ok_or_else(|| anyhow!("service {reference} not found"))
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let remote = connect(&args.remote, global)?;
    let mut services = Service::list(remote).await?;

    if global.json {
        let mut records = Vec::new();
        for service in &mut services {
            records.push(Value::Object(service.attrs().await?.clone()));
        }
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!(
        "{:<10} {:<30} {}",
        style("ID").bold(),
        style("SYSTEM NAME").bold(),
        style("NAME").bold()
    );
    for service in &mut services {
        let system_name = service.system_name().await?;
        let name = service.name().await?;
        println!("{:<10} {:<30} {}", service.id(), system_name, name);
    }
    Ok(())
}

async fn show(args: &ShowArgs, global: &GlobalOptions) -> Result<()> {
    let remote = connect(&args.remote, global)?;
    let mut service = resolve(remote, &args.service).await?;
    let attrs = service.attrs().await?;

    if global.json {
        println!("{}", serde_json::to_string_pretty(&Value::Object(attrs.clone()))?);
        return Ok(());
    }

    for (key, value) in attrs {
        println!("{:<32} {}", style(key).bold(), value);
    }
    Ok(())
}

async fn delete(args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
    let remote = connect(&args.remote, global)?;
    let mut service = resolve(remote, &args.service).await?;
    let system_name = service.system_name().await?;
    service.delete().await?;
    println!(
        "{} service {} deleted",
        style("✓").green().bold(),
        style(system_name).cyan()
    );
    Ok(())
}
