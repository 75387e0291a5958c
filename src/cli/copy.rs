//
//  apim-cli
//  cli/copy.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Copy commands
//!
//! Replicates a service and its sub-resources from one instance onto
//! another. The destination service is matched by system name: an existing
//! match is updated in place, otherwise the service is created, so the
//! command is safe to re-run.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use console::style;
use serde_json::{json, Value};

use crate::api::{AdminClient, RemoteHandle};
use crate::copy::{run_pipeline, CopyContext};
use crate::entities::{EntityRef, Service};

use super::GlobalOptions;

/// Copy entities between instances
#[derive(Args, Debug)]
pub struct CopyCommand {
    #[command(subcommand)]
    pub command: CopySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CopySubcommand {
    /// Copy a service with its metrics, methods, plans, limits, and
    /// mapping rules
    Service(CopyServiceArgs),
}

#[derive(Args, Debug)]
pub struct CopyServiceArgs {
    /// Source instance admin URL, http[s]://<token>@<host>
    #[arg(long, short = 's', env = "APIM_SOURCE")]
    pub source: String,

    /// Destination instance admin URL, http[s]://<token>@<host>
    #[arg(long, short = 'd', env = "APIM_DESTINATION")]
    pub destination: String,

    /// System name for the destination service (defaults to the source's)
    #[arg(long, short = 't')]
    pub target_system_name: Option<String>,

    /// Service to copy, by id or system name
    pub service: String,
}

impl CopyCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            CopySubcommand::Service(args) => copy_service(args, global).await,
        }
    }
}

async fn copy_service(args: &CopyServiceArgs, global: &GlobalOptions) -> Result<()> {
    let source_remote: RemoteHandle =
        Arc::new(AdminClient::from_remote_url(&args.source, global.insecure)?);
    let target_remote: RemoteHandle =
        Arc::new(AdminClient::from_remote_url(&args.destination, global.insecure)?);

    let reference = EntityRef::parse(&args.service);
    let mut source = Service::find(source_remote, &reference)
        .await?
        .ok_or_else(|| anyhow!("source service {reference} not found"))?;

    let mut attrs = source.attrs().await?.clone();
    let target_name = match &args.target_system_name {
        Some(name) => {
            attrs.insert("system_name".into(), Value::String(name.clone()));
            name.clone()
        }
        None => source.system_name().await?,
    };

    // Matching by system name makes the copy re-runnable: an earlier copy's
    // output is updated, never duplicated.
    let target = match Service::find_by_system_name(RemoteHandle::clone(&target_remote), &target_name)
        .await?
    {
        Some(mut existing) => {
            existing.update(&attrs).await?;
            existing
        }
        None => Service::create(target_remote, &attrs).await?,
    };

    let mut ctx = CopyContext::new(source, target);
    run_pipeline(&mut ctx).await?;

    if global.json {
        let summary = json!({
            "source": {"id": ctx.source.id(), "system_name": ctx.source.system_name().await?},
            "target": {"id": ctx.target.id(), "system_name": ctx.target.system_name().await?},
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} service {} copied to {} (id {})",
            style("✓").green().bold(),
            style(ctx.source.system_name().await?).cyan(),
            style(&target_name).cyan(),
            ctx.target.id()
        );
    }
    Ok(())
}
