//
//  apim-cli
//  entities/mapping_rule.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Proxy mapping-rule entity.
//!
//! Mapping rules reference metrics and methods by id, so copying them
//! across instances requires rewriting `metric_id` through the identity
//! map first.

use serde_json::Value;

use crate::api::remote::{Attrs, RemoteHandle};
use crate::error::Result;

use super::{filter_params, id_of};

/// One proxy mapping rule of a service.
pub struct MappingRule {
    id: u64,
    service_id: u64,
    remote: RemoteHandle,
    attrs: Attrs,
}

impl MappingRule {
    /// Attribute keys the admin API accepts on mapping-rule writes.
    pub const VALID_PARAMS: &'static [&'static str] =
        &["metric_id", "pattern", "http_method", "delta", "position", "last"];

    /// Wraps one record from the service's mapping-rule listing.
    pub fn from_attrs(remote: RemoteHandle, service_id: u64, attrs: Attrs) -> Result<Self> {
        Ok(Self {
            id: id_of(&attrs)?,
            service_id,
            remote,
            attrs,
        })
    }

    /// Creates a mapping rule on a service from a filtered attribute set.
    pub async fn create(remote: RemoteHandle, service_id: u64, attrs: &Attrs) -> Result<Self> {
        let candidate = filter_params(Self::VALID_PARAMS, attrs);
        let created = remote
            .create_mapping_rule(service_id, &candidate)
            .await
            .map_err(|e| e.with_context("mapping rule not created"))?;
        Self::from_attrs(remote, service_id, created)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// URL pattern the rule matches.
    pub fn pattern(&self) -> &str {
        self.attrs.get("pattern").and_then(Value::as_str).unwrap_or("")
    }

    /// HTTP verb the rule matches.
    pub fn http_method(&self) -> &str {
        self.attrs
            .get("http_method")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Increment applied to the referenced metric on a hit.
    pub fn delta(&self) -> u64 {
        self.attrs.get("delta").and_then(Value::as_u64).unwrap_or(0)
    }

    /// Id of the metric or method the rule reports into.
    pub fn metric_id(&self) -> Option<u64> {
        self.attrs.get("metric_id").and_then(Value::as_u64)
    }

    /// Deletes this rule from its service.
    pub async fn delete(&self) -> Result<()> {
        self.remote
            .delete_mapping_rule(self.service_id, self.id)
            .await
            .map_err(|e| e.with_context("mapping rule not deleted"))
    }
}
