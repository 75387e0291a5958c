//
//  apim-cli
//  entities/application_plan.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Application-plan entity, including its rate limits.

use crate::api::remote::{Attrs, RemoteHandle};
use crate::error::Result;

use super::{filter_params, id_of, process_attrs, system_name_of};

/// An application plan of a service.
///
/// Plans are always materialized from their collection listing or from a
/// create response, so the attribute bag is present from birth.
pub struct ApplicationPlan {
    id: u64,
    service_id: u64,
    remote: RemoteHandle,
    attrs: Attrs,
}

impl ApplicationPlan {
    /// Attribute keys the admin API accepts on plan writes.
    pub const VALID_PARAMS: &'static [&'static str] = &[
        "name",
        "system_name",
        "approval_required",
        "end_user_required",
        "cost_per_month",
        "setup_fee",
        "trial_period_days",
    ];

    /// Attribute keys the admin API accepts on limit writes.
    pub const LIMIT_PARAMS: &'static [&'static str] = &["period", "value"];

    /// Wraps one record from the service's plan listing.
    pub fn from_attrs(remote: RemoteHandle, service_id: u64, attrs: Attrs) -> Result<Self> {
        let attrs = process_attrs(attrs);
        Ok(Self {
            id: id_of(&attrs)?,
            service_id,
            remote,
            attrs,
        })
    }

    /// Creates a plan on a service from a filtered attribute set.
    pub async fn create(remote: RemoteHandle, service_id: u64, attrs: &Attrs) -> Result<Self> {
        let candidate = filter_params(Self::VALID_PARAMS, attrs);
        let created = remote
            .create_application_plan(service_id, &candidate)
            .await
            .map_err(|e| e.with_context("application plan not created"))?;
        Self::from_attrs(remote, service_id, created)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn service_id(&self) -> u64 {
        self.service_id
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Canonical system name (disambiguation suffix already stripped).
    pub fn system_name(&self) -> String {
        system_name_of(&self.attrs)
    }

    /// The plan's rate limits, as raw records.
    pub async fn limits(&self) -> Result<Vec<Attrs>> {
        self.remote
            .list_limits(self.id)
            .await
            .map_err(|e| e.with_context("plan limits not read"))
    }

    /// Creates a limit for `metric_id` on this plan.
    pub async fn create_limit(&self, metric_id: u64, attrs: &Attrs) -> Result<Attrs> {
        let candidate = filter_params(Self::LIMIT_PARAMS, attrs);
        self.remote
            .create_limit(self.id, metric_id, &candidate)
            .await
            .map_err(|e| e.with_context("plan limit not created"))
    }
}
