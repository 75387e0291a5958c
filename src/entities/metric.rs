//
//  apim-cli
//  entities/metric.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Service-scoped metric entity.

use crate::api::remote::{Attrs, RemoteHandle};
use crate::error::{Error, Result};

use super::{filter_params, id_of, process_attrs, system_name_of};

/// A metric owned by a service.
///
/// Methods are stored by the portal in the same collection with a
/// `parent_id` pointing at the `hits` metric; [`Metric`] only represents the
/// top-level records (`parent_id` null).
pub struct Metric {
    id: u64,
    service_id: u64,
    remote: RemoteHandle,
    attrs: Option<Attrs>,
}

impl std::fmt::Debug for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metric")
            .field("id", &self.id)
            .field("service_id", &self.service_id)
            .field("attrs", &self.attrs)
            .finish_non_exhaustive()
    }
}

impl Metric {
    /// Attribute keys the admin API accepts on metric writes.
    pub const VALID_PARAMS: &'static [&'static str] =
        &["friendly_name", "system_name", "unit", "description"];

    /// Builds a handle; pass `attrs` when the record is already known.
    pub fn new(remote: RemoteHandle, service_id: u64, id: u64, attrs: Option<Attrs>) -> Self {
        Self {
            id,
            service_id,
            remote,
            attrs: attrs.map(process_attrs),
        }
    }

    /// Creates a metric on a service from a filtered attribute set.
    pub async fn create(remote: RemoteHandle, service_id: u64, attrs: &Attrs) -> Result<Self> {
        let candidate = filter_params(Self::VALID_PARAMS, attrs);
        let created = remote
            .create_metric(service_id, &candidate)
            .await
            .map_err(|e| e.with_context("metric not created"))?;
        let id = id_of(&created)?;
        Ok(Self::new(remote, service_id, id, Some(created)))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The metric's attributes, fetched on first access and cached.
    pub async fn attrs(&mut self) -> Result<&Attrs> {
        match self.attrs.take() {
            Some(attrs) => Ok(self.attrs.insert(attrs)),
            None => {
                if self.id == 0 {
                    return Err(Error::InvalidId);
                }
                let fetched = self
                    .remote
                    .show_metric(self.service_id, self.id)
                    .await
                    .map_err(|e| e.with_context("metric not read"))?;
                Ok(self.attrs.insert(process_attrs(fetched)))
            }
        }
    }

    /// Canonical system name (disambiguation suffix already stripped).
    pub async fn system_name(&mut self) -> Result<String> {
        Ok(system_name_of(self.attrs().await?))
    }
}
