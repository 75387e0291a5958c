//
//  apim-cli
//  entities/backend_method.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Backend-scoped method entity, nested under the backend's `hits` metric.
//! Read-only for the same reason as [`BackendMetric`](super::BackendMetric).

use crate::api::remote::Attrs;
use crate::error::Result;

use super::{id_of, process_attrs, system_name_of};

/// A method of a backend, scoped under its `hits` metric.
pub struct BackendMethod {
    id: u64,
    backend_id: u64,
    attrs: Attrs,
}

impl BackendMethod {
    /// Wraps one record from the backend's method listing.
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
