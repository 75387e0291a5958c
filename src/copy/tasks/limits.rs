//
//  apim-cli
//  copy/tasks/limits.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use serde_json::Value;
use tracing::{debug, info};

use crate::copy::CopyContext;
use crate::error::{Error, Result};

/// Copies plan limits between same-named plans, rewriting metric references
/// through the id map. A target limit already covering `(period, mapped
/// metric)` is left alone; a source limit referencing a metric without a
/// target counterpart is fatal, since copying it would attach the limit to
/// the wrong metric.
pub async fn copy_limits(ctx: &mut CopyContext) -> Result<()> {
    let mapping = ctx.metrics_mapping().await?;
    let source_plans = ctx.source.plans().await?;
    let target_plans = ctx.target.plans().await?;

    let mut copied = 0;
    for source_plan in &source_plans {
        let Some(target_plan) = target_plans
            .iter()
            .find(|plan| plan.system_name() == source_plan.system_name())
        else {
            continue;
        };

        let existing = target_plan.limits().await?;
        for limit in source_plan.limits().await? {
            let Some(metric_id) = limit.get("metric_id").and_then(Value::as_u64) else {
                continue;
            };
            let target_metric_id = *mapping.get(&metric_id).ok_or_else(|| {
                Error::Invariant(format!(
                    "limit in plan {} references metric {metric_id} with no counterpart on the target",
                    source_plan.system_name()
                ))
            })?;

            let period = limit.get("period").cloned().unwrap_or(Value::Null);
            let already = existing.iter().any(|candidate| {
                candidate.get("period").cloned().unwrap_or(Value::Null) == period
                    && candidate.get("metric_id").and_then(Value::as_u64) == Some(target_metric_id)
            });
            if already {
                continue;
            }

            debug!(plan = %target_plan.system_name(), metric = target_metric_id, "creating missing limit");
            target_plan.create_limit(target_metric_id, &limit).await?;
            copied += 1;
        }
    }
    info!(copied, "plan limits synchronized");
    Ok(())
}
