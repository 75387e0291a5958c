//
//  apim-cli
//  copy/tasks/methods.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use std::collections::HashSet;

use tracing::{debug, info};

use crate::copy::CopyContext;
use crate::entities::Method;
use crate::error::Result;

/// Creates the source's methods the target is missing, diffed by canonical
/// system name, under the target's `hits` metric.
pub async fn copy_methods(ctx: &mut CopyContext) -> Result<()> {
    let target_hits_id = ctx.target.hits().await?.id();

    let mut existing = HashSet::new();
    for mut method in ctx.target.methods().await? {
        existing.insert(method.system_name().await?);
    }

    let mut copied = 0;
    for mut method in ctx.source.methods().await? {
        let name = method.system_name().await?;
        if existing.contains(&name) {
            continue;
        }
        debug!(method = %name, "creating missing method");
        Method::create(
            ctx.target.remote(),
            ctx.target.id(),
            target_hits_id,
            method.attrs().await?,
        )
        .await?;
        copied += 1;
    }
    info!(copied, "methods synchronized");
    Ok(())
}
