//
//  apim-cli
//  api/remote.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Remote Admin API Seam
//!
//! The [`Remote`] trait is the boundary between the synchronization core and
//! the HTTP transport. Every entity operation goes through it, which keeps
//! the entities, the identity mapper, and the copy pipeline testable against
//! an in-memory implementation.
//!
//! ## Contract
//!
//! Per entity kind the trait exposes list/show/create/update/delete calls
//! returning raw attribute bags ([`Attrs`]). Implementations must:
//!
//! - return [`Error::NotFound`](crate::Error::NotFound) for a typed
//!   "no such record" condition (the resolver branches on it),
//! - return [`Error::Api`](crate::Error::Api) for any response carrying an
//!   error marker, with the payload preserved verbatim,
//! - treat the error marker as authoritative regardless of HTTP status.
//!
//! Collections that the admin portal paginates (services, backends) take
//! explicit `page`/`per_page` arguments; page numbering starts at 1. Nested
//! collections (metrics, methods, plans, limits, mapping rules, backend
//! usages) are returned whole, matching the admin API.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::Result;

/// Raw attribute bag of a remote entity, as returned by the admin API.
pub type Attrs = Map<String, Value>;

/// Shared handle to a remote instance.
///
/// Read-shared across every entity and copy task of one invocation; the
/// handle itself is never mutated.
pub type RemoteHandle = Arc<dyn Remote>;

/// Operations the synchronization core requires from an admin API transport.
#[async_trait]
pub trait Remote: Send + Sync {
    // --- services -------------------------------------------------------

    /// Lists one page of services. An empty page means end of data.
    async fn list_services(&self, page: u32, per_page: u32) -> Result<Vec<Attrs>>;

    /// Fetches one service by id.
    async fn show_service(&self, id: u64) -> Result<Attrs>;

    /// Creates a service from the given attributes.
    async fn create_service(&self, attrs: &Attrs) -> Result<Attrs>;

    /// Updates a service, returning the authoritative representation.
    async fn update_service(&self, id: u64, attrs: &Attrs) -> Result<Attrs>;

    /// Deletes a service.
    async fn delete_service(&self, id: u64) -> Result<()>;

    // --- proxy ----------------------------------------------------------

    /// Reads a service's proxy/deployment settings.
    async fn show_proxy(&self, service_id: u64) -> Result<Attrs>;

    /// Updates a service's proxy/deployment settings.
    async fn update_proxy(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs>;

    // --- metrics and methods (service scope) ----------------------------

    /// Lists a service's metrics, methods included (methods carry a
    /// non-null `parent_id`).
    async fn list_metrics(&self, service_id: u64) -> Result<Vec<Attrs>>;

    /// Fetches one metric by id.
    async fn show_metric(&self, service_id: u64, id: u64) -> Result<Attrs>;

    /// Creates a metric on a service.
    async fn create_metric(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs>;

    /// Lists the methods under a service's hits metric.
    async fn list_methods(&self, service_id: u64, hits_id: u64) -> Result<Vec<Attrs>>;

    /// Fetches one method by id.
    async fn show_method(&self, service_id: u64, hits_id: u64, id: u64) -> Result<Attrs>;

    /// Creates a method under a service's hits metric.
    async fn create_method(&self, service_id: u64, hits_id: u64, attrs: &Attrs) -> Result<Attrs>;

    // --- application plans and limits -----------------------------------

    /// Lists a service's application plans.
    async fn list_application_plans(&self, service_id: u64) -> Result<Vec<Attrs>>;

    /// Creates an application plan on a service.
    async fn create_application_plan(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs>;

    /// Lists the limits of an application plan.
    async fn list_limits(&self, plan_id: u64) -> Result<Vec<Attrs>>;

    /// Creates a limit for a metric on an application plan.
    async fn create_limit(&self, plan_id: u64, metric_id: u64, attrs: &Attrs) -> Result<Attrs>;

    // --- mapping rules --------------------------------------------------

    /// Lists a service's proxy mapping rules.
    async fn list_mapping_rules(&self, service_id: u64) -> Result<Vec<Attrs>>;

    /// Creates a proxy mapping rule on a service.
    async fn create_mapping_rule(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs>;

    /// Deletes a proxy mapping rule.
    async fn delete_mapping_rule(&self, service_id: u64, rule_id: u64) -> Result<()>;

    // --- backends -------------------------------------------------------

    /// Lists one page of backends. An empty page means end of data.
    async fn list_backends(&self, page: u32, per_page: u32) -> Result<Vec<Attrs>>;

    /// Fetches one backend by id.
    async fn show_backend(&self, id: u64) -> Result<Attrs>;

    /// Lists the backend usages of a service.
    async fn list_backend_usages(&self, service_id: u64) -> Result<Vec<Attrs>>;

    /// Lists a backend's metrics, methods included (methods carry a
    /// non-null `parent_id`).
    async fn list_backend_metrics(&self, backend_id: u64) -> Result<Vec<Attrs>>;

    /// Lists the methods under a backend's hits metric.
    async fn list_backend_methods(&self, backend_id: u64, hits_id: u64) -> Result<Vec<Attrs>>;
}
