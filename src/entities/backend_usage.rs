//
//  apim-cli
//  entities/backend_usage.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Backend-usage entity: the link record attaching a backend to a product.

use serde_json::Value;

use crate::api::remote::{Attrs, RemoteHandle};
use crate::error::{Error, Result};

use super::{id_of, Backend};

/// One backend attached to a service, with its mount path.
pub struct BackendUsage {
    id: u64,
    remote: RemoteHandle,
    attrs: Attrs,
}

impl BackendUsage {
    /// Wraps one record from the service's backend-usage listing.
    pub fn from_attrs(remote: RemoteHandle, attrs: Attrs) -> Result<Self> {
        Ok(Self {
            id: id_of(&attrs)?,
            remote,
            attrs,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Id of the backend this usage points at.
    pub fn backend_id(&self) -> Result<u64> {
        self.attrs
            .get("backend_id")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                Error::Invariant(format!("backend usage {} carries no backend id", self.id))
            })
    }

    /// Handle to the referenced backend (attributes not yet materialized).
    pub fn backend(&self) -> Result<Backend> {
        Ok(Backend::new(self.remote.clone(), self.backend_id()?, None))
    }
}
