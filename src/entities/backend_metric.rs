//
//  apim-cli
//  entities/backend_metric.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Backend-scoped metric entity.
//!
//! Backend metrics participate in the identity mapping (a product's rate
//! limits and mapping rules can reference them through backend usages) but
//! are never written by the copy pipeline, so the entity is materialized
//! from its collection listing and read-only.

use crate::api::remote::Attrs;
use crate::error::Result;

use super::{id_of, process_attrs, system_name_of};

/// A metric owned by a backend.
#[derive(Debug)]
pub struct BackendMetric {
    id: u64,
    backend_id: u64,
    attrs: Attrs,
}

impl BackendMetric {
    /// Wraps one record from the backend's metric listing.
    pub fn from_attrs(backend_id: u64, attrs: Attrs) -> Result<Self> {
        let attrs = process_attrs(attrs);
        Ok(Self {
            id: id_of(&attrs)?,
            backend_id,
            attrs,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn backend_id(&self) -> u64 {
        self.backend_id
    }

    /// Canonical system name (disambiguation suffix already stripped).
    pub fn system_name(&self) -> String {
        system_name_of(&self.attrs)
    }
}
