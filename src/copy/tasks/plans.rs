//
//  apim-cli
//  copy/tasks/plans.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use std::collections::HashSet;

use tracing::{debug, info};

use crate::copy::CopyContext;
use crate::entities::ApplicationPlan;
use crate::error::Result;

/// Creates the source's application plans the target is missing, diffed by
/// canonical system name.
pub async fn copy_application_plans(ctx: &mut CopyContext) -> Result<()> {
    let existing: HashSet<String> = ctx
        .target
        .plans()
        .await?
        .iter()
        .map(ApplicationPlan::system_name)
        .collect();

    let mut copied = 0;
    for plan in ctx.source.plans().await? {
        let name = plan.system_name();
        if existing.contains(&name) {
            continue;
        }
        debug!(plan = %name, "creating missing application plan");
        ApplicationPlan::create(ctx.target.remote(), ctx.target.id(), plan.attrs()).await?;
        copied += 1;
    }
    info!(copied, "application plans synchronized");
    Ok(())
}
