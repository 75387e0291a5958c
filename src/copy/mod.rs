//
//  apim-cli
//  copy/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Copy Orchestrator
//!
//! Replicates a resolved source service onto a resolved target service,
//! one task per sub-resource kind, in a fixed order:
//!
//! 1. proxy settings
//! 2. methods
//! 3. metrics
//! 4. application plans
//! 5. plan limits
//! 6. destroy the target's mapping rules
//! 7. mapping rules
//!
//! Ordering matters twice: limits and mapping rules reference metrics and
//! methods by id, so the id map is only complete once tasks 2 and 3 have
//! run; and the target's pre-existing rules (including the portal's
//! auto-generated catch-all) are destroyed before the source's rules come
//! over, so the target ends up with exactly the source's rule set.
//!
//! Every task diffs by canonical system name and creates only what the
//! target is missing, so the pipeline is re-runnable: a second pass over
//! an up-to-date target performs no writes besides the rule rebuild.

use std::collections::HashMap;

use crate::entities::Service;
use crate::error::Result;

pub mod tasks;

/// Shared state of one copy run.
///
/// Holds the two resolved services and caches the metric/method id map
/// once a task needs it; the map is computed after the metric and method
/// tasks have run, so it covers freshly created entities.
pub struct CopyContext {
    pub source: Service,
    pub target: Service,
    metrics_map: Option<HashMap<u64, u64>>,
}

impl CopyContext {
    pub fn new(source: Service, target: Service) -> Self {
        Self {
            source,
            target,
            metrics_map: None,
        }
    }

    /// Source-id → target-id map over metrics and methods, computed once.
    pub(crate) async fn metrics_mapping(&mut self) -> Result<HashMap<u64, u64>> {
        if let Some(map) = &self.metrics_map {
            return Ok(map.clone());
        }
        let map = self.source.metrics_mapping(&self.target).await?;
        self.metrics_map = Some(map.clone());
        Ok(map)
    }
}

/// Runs the full copy pipeline over the context.
pub async fn run_pipeline(ctx: &mut CopyContext) -> Result<()> {
    tasks::copy_proxy(ctx).await?;
    tasks::copy_methods(ctx).await?;
    tasks::copy_metrics(ctx).await?;
    tasks::copy_application_plans(ctx).await?;
    tasks::copy_limits(ctx).await?;
    tasks::destroy_mapping_rules(ctx).await?;
    tasks::copy_mapping_rules(ctx).await?;
    Ok(())
}
