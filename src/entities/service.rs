//
//  apim-cli
//  entities/service.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Service Entity
//!
//! The service is the root aggregate of a copy: proxy settings, metrics,
//! methods, application plans, and mapping rules all hang off it, and
//! backend usages tie it to backends.
//!
//! ## Resolution
//!
//! [`Service::find`] resolves an [`EntityRef`]: an id reference costs one
//! direct fetch, a name reference scans the paginated service listing. A
//! dangling id falls back to a name scan with the decimal spelling, so a
//! service whose system name looks numeric is still reachable.
//!
//! ## Writes
//!
//! Create and update filter the submitted attributes down to the keys the
//! admin API accepts. One rejection is retryable: a `deployment_option`
//! the destination does not support is removed and the write resubmitted
//! exactly once. Any failure of the retry is surfaced as-is.

use std::collections::HashMap;

use tracing::{debug, warn};

use serde_json::Value;

use crate::api::pagination::{Pager, MAX_PER_PAGE};
use crate::api::remote::{Attrs, RemoteHandle};
use crate::error::{Error, Result};

use super::{
    correlate, filter_params, id_of, invalid_deployment_option, process_attrs, system_name_of,
    ApplicationPlan, BackendUsage, EntityRef, MappingRule, Metric, Method,
};

/// A service on a remote instance.
pub struct Service {
    id: u64,
    remote: RemoteHandle,
    attrs: Option<Attrs>,
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("id", &self.id)
            .field("attrs", &self.attrs)
            .finish_non_exhaustive()
    }
}

impl Service {
    /// Attribute keys the admin API accepts on service writes.
    pub const VALID_PARAMS: &'static [&'static str] = &[
        "name",
        "description",
        "system_name",
        "backend_version",
        "deployment_option",
        "support_email",
        "tech_support_email",
        "admin_support_email",
        "end_user_registration_required",
    ];

    pub fn new(remote: RemoteHandle, id: u64, attrs: Option<Attrs>) -> Self {
        Self {
            id,
            remote,
            attrs: attrs.map(process_attrs),
        }
    }

    /// Creates a service from a filtered attribute set.
    ///
    /// A `deployment_option` rejection is retried once without the
    /// offending key; the retry's outcome, success or failure, is final.
    pub async fn create(remote: RemoteHandle, attrs: &Attrs) -> Result<Self> {
        let candidate = filter_params(Self::VALID_PARAMS, attrs);
        let created = match remote.create_service(&candidate).await {
            Err(Error::Api { payload, .. }) if invalid_deployment_option(&payload) => {
                warn!("deployment option rejected, retrying create without it");
                let mut retry = candidate;
                retry.remove("deployment_option");
                remote.create_service(&retry).await
            }
            outcome => outcome,
        }
        .map_err(|e| e.with_context("service not created"))?;

        let created = process_attrs(created);
        let id = id_of(&created)?;
        Ok(Self {
            id,
            remote,
            attrs: Some(created),
        })
    }

    /// Resolves a service reference to an entity, `None` when absent.
    ///
    /// Id references cost one fetch; a dangling id degrades to a name scan
    /// with its decimal spelling. Name references scan the listing only.
    pub async fn find(remote: RemoteHandle, reference: &EntityRef) -> Result<Option<Self>> {
        match reference {
            EntityRef::Id(id) => {
                match remote.show_service(*id).await {
                    Ok(attrs) => Ok(Some(Self::new(remote, *id, Some(attrs)))),
                    Err(e) if e.is_not_found() => {
                        debug!(id, "no service with that id, scanning by name");
                        Self::find_by_system_name(remote, &id.to_string()).await
                    }
                    Err(e) => Err(e.with_context("service not read")),
                }
            }
            EntityRef::Name(name) => Self::find_by_system_name(remote, name).await,
        }
    }

    /// Scans the paginated service listing for a canonical system name.
    pub async fn find_by_system_name(remote: RemoteHandle, name: &str) -> Result<Option<Self>> {
        let wanted = super::canonical_system_name(name);
        let mut pager = Self::pager(&remote);
        while let Some(page) = pager
            .next_page()
            .await
            .map_err(|e| e.with_context("service list not read"))?
        {
            for attrs in page {
                if system_name_of(&attrs) == wanted {
                    let attrs = process_attrs(attrs);
                    let id = id_of(&attrs)?;
                    return Ok(Some(Self {
                        id,
                        remote,
                        attrs: Some(attrs),
                    }));
                }
            }
        }
        Ok(None)
    }

    /// Every service of the instance, full enumeration.
    pub async fn list(remote: RemoteHandle) -> Result<Vec<Self>> {
        let records = Self::pager(&remote)
            .collect_all()
            .await
            .map_err(|e| e.with_context("service list not read"))?;
        records
            .into_iter()
            .map(|attrs| {
                let attrs = process_attrs(attrs);
                let id = id_of(&attrs)?;
                Ok(Self {
                    id,
                    remote: RemoteHandle::clone(&remote),
                    attrs: Some(attrs),
                })
            })
            .collect()
    }

    fn pager(remote: &RemoteHandle) -> Pager<impl FnMut(u32, u32) -> PageFuture> {
        let remote = RemoteHandle::clone(remote);
        Pager::new(MAX_PER_PAGE, move |page, per_page| -> PageFuture {
            let remote = RemoteHandle::clone(&remote);
            Box::pin(async move { remote.list_services(page, per_page).await })
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn remote(&self) -> RemoteHandle {
        RemoteHandle::clone(&self.remote)
    }

    /// Attributes, fetched on first access and cached thereafter.
    pub async fn attrs(&mut self) -> Result<&Attrs> {
        match self.attrs.take() {
            Some(attrs) => Ok(self.attrs.insert(attrs)),
            None => {
                if self.id == 0 {
                    return Err(Error::InvalidId);
                }
                let fetched = self
                    .remote
                    .show_service(self.id)
                    .await
                    .map_err(|e| e.with_context("service not read"))?;
                Ok(self.attrs.insert(process_attrs(fetched)))
            }
        }
    }

    /// Canonical system name.
    pub async fn system_name(&mut self) -> Result<String> {
        Ok(system_name_of(self.attrs().await?))
    }

    /// Human-readable name, empty if unset.
    pub async fn name(&mut self) -> Result<String> {
        Ok(self
            .attrs()
            .await?
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    /// Updates the service, caching the authoritative response.
    ///
    /// Shares the create path's one-shot `deployment_option` retry.
    pub async fn update(&mut self, attrs: &Attrs) -> Result<&Attrs> {
        let candidate = filter_params(Self::VALID_PARAMS, attrs);
        let updated = match self.remote.update_service(self.id, &candidate).await {
            Err(Error::Api { payload, .. }) if invalid_deployment_option(&payload) => {
                warn!("deployment option rejected, retrying update without it");
                let mut retry = candidate;
                retry.remove("deployment_option");
                self.remote.update_service(self.id, &retry).await
            }
            outcome => outcome,
        }
        .map_err(|e| e.with_context("service not updated"))?;
        Ok(self.attrs.insert(process_attrs(updated)))
    }

    /// Deletes the service from its instance.
    pub async fn delete(&self) -> Result<()> {
        self.remote
            .delete_service(self.id)
            .await
            .map_err(|e| e.with_context("service not deleted"))
    }

    // --- proxy ----------------------------------------------------------

    /// Reads the proxy/deployment settings.
    pub async fn proxy(&self) -> Result<Attrs> {
        self.remote
            .show_proxy(self.id)
            .await
            .map_err(|e| e.with_context("service proxy not read"))
    }

    /// Updates the proxy/deployment settings.
    pub async fn update_proxy(&self, attrs: &Attrs) -> Result<Attrs> {
        self.remote
            .update_proxy(self.id, attrs)
            .await
            .map_err(|e| e.with_context("service proxy not updated"))
    }

    // --- metrics and methods --------------------------------------------

    async fn metrics_and_methods(&self) -> Result<Vec<Attrs>> {
        let records = self
            .remote
            .list_metrics(self.id)
            .await
            .map_err(|e| e.with_context("service metrics not read"))?;
        Ok(records.into_iter().map(process_attrs).collect())
    }

    /// Top-level metrics (methods excluded).
    pub async fn metrics(&self) -> Result<Vec<Metric>> {
        let mut metrics = Vec::new();
        for attrs in self.metrics_and_methods().await? {
            if matches!(attrs.get("parent_id"), None | Some(Value::Null)) {
                let id = id_of(&attrs)?;
                metrics.push(Metric::new(self.remote(), self.id, id, Some(attrs)));
            }
        }
        Ok(metrics)
    }

    /// The built-in `hits` metric every service carries.
    pub async fn hits(&self) -> Result<Metric> {
        for attrs in self.metrics_and_methods().await? {
            if system_name_of(&attrs) == "hits" {
                let id = id_of(&attrs)?;
                return Ok(Metric::new(self.remote(), self.id, id, Some(attrs)));
            }
        }
        Err(Error::Invariant(format!(
            "service {} is missing its hits metric",
            self.id
        )))
    }

    /// Methods under the hits metric.
    pub async fn methods(&self) -> Result<Vec<Method>> {
        let hits_id = self.hits().await?.id();
        let records = self
            .remote
            .list_methods(self.id, hits_id)
            .await
            .map_err(|e| e.with_context("service methods not read"))?;
        records
            .into_iter()
            .map(|attrs| {
                let attrs = process_attrs(attrs);
                let id = id_of(&attrs)?;
                Ok(Method::new(self.remote(), self.id, hits_id, id, Some(attrs)))
            })
            .collect()
    }

    // --- plans, rules, usages -------------------------------------------

    /// The service's application plans.
    pub async fn plans(&self) -> Result<Vec<ApplicationPlan>> {
        let records = self
            .remote
            .list_application_plans(self.id)
            .await
            .map_err(|e| e.with_context("service plans not read"))?;
        records
            .into_iter()
            .map(|attrs| ApplicationPlan::from_attrs(self.remote(), self.id, attrs))
            .collect()
    }

    /// The service's proxy mapping rules.
    pub async fn mapping_rules(&self) -> Result<Vec<MappingRule>> {
        let records = self
            .remote
            .list_mapping_rules(self.id)
            .await
            .map_err(|e| e.with_context("service mapping rules not read"))?;
        records
            .into_iter()
            .map(|attrs| MappingRule::from_attrs(self.remote(), self.id, attrs))
            .collect()
    }

    /// The service's backend usages.
    pub async fn backend_usages(&self) -> Result<Vec<BackendUsage>> {
        let records = self
            .remote
            .list_backend_usages(self.id)
            .await
            .map_err(|e| e.with_context("service backend usages not read"))?;
        records
            .into_iter()
            .map(|attrs| BackendUsage::from_attrs(self.remote(), attrs))
            .collect()
    }

    // --- identity mapping -----------------------------------------------

    /// `(id, canonical system name)` index over metrics and methods.
    pub(crate) async fn metric_index(&self) -> Result<Vec<(u64, String)>> {
        self.metrics_and_methods()
            .await?
            .iter()
            .map(|attrs| Ok((id_of(attrs)?, system_name_of(attrs))))
            .collect()
    }

    /// Maps this service's metric and method ids onto `target`'s.
    ///
    /// Covers the service scope and, for backends both services use under
    /// the same system name, the backend scope. Entities without a
    /// same-named counterpart on the target are left unmapped.
    pub async fn metrics_mapping(&self, target: &Service) -> Result<HashMap<u64, u64>> {
        let mut mapping = correlate(&self.metric_index().await?, &target.metric_index().await?);

        let mut source_backends = Vec::new();
        for usage in self.backend_usages().await? {
            let mut backend = usage.backend()?;
            let name = backend.system_name().await?;
            source_backends.push((backend, name));
        }
        let mut target_backends = Vec::new();
        for usage in target.backend_usages().await? {
            let mut backend = usage.backend()?;
            let name = backend.system_name().await?;
            target_backends.push((backend, name));
        }

        for (source_backend, source_name) in &source_backends {
            for (target_backend, target_name) in &target_backends {
                if source_name == target_name {
                    debug!(backend = %source_name, "merging backend-scope metric mapping");
                    mapping.extend(source_backend.metrics_mapping(target_backend).await?);
                }
            }
        }
        Ok(mapping)
    }
}

type PageFuture =
    std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<Attrs>>> + Send>>;
