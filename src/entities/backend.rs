//
//  apim-cli
//  entities/backend.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Backend entity.
//!
//! A backend is a correlation scope of its own: products referencing it
//! through backend usages can point rate limits and mapping rules at the
//! backend's metrics and methods, so the identity map has to cover those
//! too. [`Backend::metrics_mapping`] computes the backend-scoped slice that
//! [`Service::metrics_mapping`](super::Service::metrics_mapping) merges into
//! the service-level map.

use std::collections::HashMap;

use serde_json::Value;

use crate::api::remote::{Attrs, RemoteHandle};
use crate::error::{Error, Result};

use super::{correlate, process_attrs, system_name_of, BackendMethod, BackendMetric};

/// A backend (private API) registered on an instance.
pub struct Backend {
    id: u64,
    remote: RemoteHandle,
    attrs: Option<Attrs>,
}

impl Backend {
    /// Builds a handle; pass `attrs` when the record is already known.
    pub fn new(remote: RemoteHandle, id: u64, attrs: Option<Attrs>) -> Self {
        Self {
            id,
            remote,
            attrs: attrs.map(process_attrs),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The backend's attributes, fetched on first access and cached.
    pub async fn attrs(&mut self) -> Result<&Attrs> {
        match self.attrs.take() {
            Some(attrs) => Ok(self.attrs.insert(attrs)),
            None => {
                if self.id == 0 {
                    return Err(Error::InvalidId);
                }
                let fetched = self
                    .remote
                    .show_backend(self.id)
                    .await
                    .map_err(|e| e.with_context("backend not read"))?;
                Ok(self.attrs.insert(process_attrs(fetched)))
            }
        }
    }

    /// Canonical system name (disambiguation suffix already stripped).
    pub async fn system_name(&mut self) -> Result<String> {
        Ok(system_name_of(self.attrs().await?))
    }

    async fn metrics_and_methods(&self) -> Result<Vec<Attrs>> {
        self.remote
            .list_backend_metrics(self.id)
            .await
            .map_err(|e| e.with_context("backend metrics not read"))
    }

    /// The backend's top-level metrics (`parent_id` null).
    pub async fn metrics(&self) -> Result<Vec<BackendMetric>> {
        self.metrics_and_methods()
            .await?
            .into_iter()
            .filter(|attrs| matches!(attrs.get("parent_id"), None | Some(Value::Null)))
            .map(|attrs| BackendMetric::from_attrs(self.id, attrs))
            .collect()
    }

    /// The backend's mandatory `hits` metric.
    pub async fn hits(&self) -> Result<BackendMetric> {
        for attrs in self.metrics_and_methods().await? {
            let metric = BackendMetric::from_attrs(self.id, attrs)?;
            if metric.system_name() == "hits" {
                return Ok(metric);
            }
        }
        Err(Error::Invariant(format!(
            "backend {} is missing its hits metric",
            self.id
        )))
    }

    /// The backend's methods, scoped under its `hits` metric.
    pub async fn methods(&self) -> Result<Vec<BackendMethod>> {
        let hits = self.hits().await?;
        self.remote
            .list_backend_methods(self.id, hits.id())
            .await
            .map_err(|e| e.with_context("backend methods not read"))?
            .into_iter()
            .map(|attrs| BackendMethod::from_attrs(self.id, attrs))
            .collect()
    }

    /// Ids and canonical names of this backend's metrics and methods.
    pub(crate) async fn metric_index(&self) -> Result<Vec<(u64, String)>> {
        let mut index = Vec::new();
        for metric in self.metrics().await? {
            index.push((metric.id(), metric.system_name()));
        }
        for method in self.methods().await? {
            index.push((method.id(), method.system_name()));
        }
        Ok(index)
    }

    /// Correlates this backend's metrics/methods with `other`'s by canonical
    /// system name, producing a source-id → destination-id map slice.
    pub async fn metrics_mapping(&self, other: &Backend) -> Result<HashMap<u64, u64>> {
        Ok(correlate(
            &self.metric_index().await?,
            &other.metric_index().await?,
        ))
    }

}
