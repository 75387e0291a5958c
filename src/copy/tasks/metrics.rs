//
//  apim-cli
//  copy/tasks/metrics.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use std::collections::HashSet;

use tracing::{debug, info};

use crate::copy::CopyContext;
use crate::entities::Metric;
use crate::error::Result;

/// Creates the source's metrics the target is missing, diffed by canonical
/// system name. The built-in `hits` metric exists on both sides and is
/// skipped by the diff like any other match.
pub async fn copy_metrics(ctx: &mut CopyContext) -> Result<()> {
    let mut existing = HashSet::new();
    for mut metric in ctx.target.metrics().await? {
        existing.insert(metric.system_name().await?);
    }

    let mut copied = 0;
    for mut metric in ctx.source.metrics().await? {
        let name = metric.system_name().await?;
        if existing.contains(&name) {
            continue;
        }
        debug!(metric = %name, "creating missing metric");
        Metric::create(ctx.target.remote(), ctx.target.id(), metric.attrs().await?).await?;
        copied += 1;
    }
    info!(copied, "metrics synchronized");
    Ok(())
}
