//
//  apim-cli
//  entities/method.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Service-scoped method entity, nested under the service's `hits` metric.

use crate::api::remote::{Attrs, RemoteHandle};
use crate::error::{Error, Result};

use super::{filter_params, id_of, process_attrs, system_name_of};

/// A method of a service, scoped under its `hits` metric.
pub struct Method {
    id: u64,
    service_id: u64,
    hits_id: u64,
    remote: RemoteHandle,
    attrs: Option<Attrs>,
}

impl Method {
    /// Attribute keys the admin API accepts on method writes.
    pub const VALID_PARAMS: &'static [&'static str] =
        &["friendly_name", "system_name", "description"];

    /// Builds a handle; pass `attrs` when the record is already known.
    pub fn new(
        remote: RemoteHandle,
        service_id: u64,
        hits_id: u64,
        id: u64,
        attrs: Option<Attrs>,
    ) -> Self {
        Self {
            id,
            service_id,
            hits_id,
            remote,
            attrs: attrs.map(process_attrs),
        }
    }

    /// Creates a method under a service's `hits` metric from a filtered
    /// attribute set.
    pub async fn create(
        remote: RemoteHandle,
        service_id: u64,
        hits_id: u64,
        attrs: &Attrs,
    ) -> Result<Self> {
        let candidate = filter_params(Self::VALID_PARAMS, attrs);
        let created = remote
            .create_method(service_id, hits_id, &candidate)
            .await
            .map_err(|e| e.with_context("method not created"))?;
        let id = id_of(&created)?;
        Ok(Self::new(remote, service_id, hits_id, id, Some(created)))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The method's attributes, fetched on first access and cached.
    pub async fn attrs(&mut self) -> Result<&Attrs> {
        match self.attrs.take() {
            Some(attrs) => Ok(self.attrs.insert(attrs)),
            None => {
                if self.id == 0 {
                    return Err(Error::InvalidId);
                }
                let fetched = self
                    .remote
                    .show_method(self.service_id, self.hits_id, self.id)
                    .await
                    .map_err(|e| e.with_context("method not read"))?;
                Ok(self.attrs.insert(process_attrs(fetched)))
            }
        }
    }

    /// Canonical system name (disambiguation suffix already stripped).
    pub async fn system_name(&mut self) -> Result<String> {
        Ok(system_name_of(self.attrs().await?))
    }
}
