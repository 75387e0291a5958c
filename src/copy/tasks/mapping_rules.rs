//
//  apim-cli
//  copy/tasks/mapping_rules.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use serde_json::json;
use tracing::{debug, info};

use crate::copy::CopyContext;
use crate::entities::MappingRule;
use crate::error::{Error, Result};

/// Deletes every mapping rule on the target, including the catch-all the
/// portal generates on service creation, so the subsequent copy leaves the
/// target with exactly the source's rule set.
pub async fn destroy_mapping_rules(ctx: &mut CopyContext) -> Result<()> {
    let rules = ctx.target.mapping_rules().await?;
    let removed = rules.len();
    for rule in rules {
        rule.delete().await?;
    }
    info!(removed, "target mapping rules destroyed");
    Ok(())
}

/// Copies the source's mapping rules, rewriting the metric reference of
/// each through the id map. A target rule already matching `(pattern, HTTP
/// method, delta, mapped metric)` is left alone; a source rule referencing
/// a metric without a target counterpart is fatal.
pub async fn copy_mapping_rules(ctx: &mut CopyContext) -> Result<()> {
    let mapping = ctx.metrics_mapping().await?;
    let existing = ctx.target.mapping_rules().await?;

    let mut copied = 0;
    for rule in ctx.source.mapping_rules().await? {
        let metric_id = rule.metric_id().ok_or_else(|| {
            Error::Invariant(format!("mapping rule {} references no metric", rule.id()))
        })?;
        let target_metric_id = *mapping.get(&metric_id).ok_or_else(|| {
            Error::Invariant(format!(
                "mapping rule {} references metric {metric_id} with no counterpart on the target",
                rule.id()
            ))
        })?;

        let already = existing.iter().any(|candidate| {
            candidate.pattern() == rule.pattern()
                && candidate.http_method() == rule.http_method()
                && candidate.delta() == rule.delta()
                && candidate.metric_id() == Some(target_metric_id)
        });
        if already {
            continue;
        }

        debug!(pattern = rule.pattern(), "creating mapping rule");
        let mut attrs = rule.attrs().clone();
        attrs.insert("metric_id".into(), json!(target_metric_id));
        MappingRule::create(ctx.target.remote(), ctx.target.id(), &attrs).await?;
        copied += 1;
    }
    info!(copied, "mapping rules synchronized");
    Ok(())
}
