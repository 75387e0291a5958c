//
//  apim-cli
//  entities/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Remote Entities
//!
//! Domain objects backed by records on a remote instance: services,
//! backends, metrics, methods, application plans, mapping rules, and
//! backend usages.
//!
//! ## Shape
//!
//! Every entity holds its immutable numeric id, a shared [`RemoteHandle`],
//! and a lazily materialized attribute bag. Attributes load on first access
//! and cache; a mutation replaces the cache with the server's authoritative
//! response; a negative (not-found) result is never cached. Two entity
//! handles for the same remote record do not share a cache.
//!
//! ## System names
//!
//! Numeric ids are instance-local, so cross-instance correlation uses the
//! *canonical system name*: the portion of the reported `system_name` before
//! the first `.` separator (the portal appends a `.NNN` suffix to
//! disambiguate collisions). The canonical form is applied on every
//! attribute ingest, so comparisons never see the suffix.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::api::remote::Attrs;
use crate::error::{Error, Result};

mod application_plan;
mod backend;
mod backend_metric;
mod backend_method;
mod backend_usage;
mod mapping_rule;
mod metric;
mod method;
mod service;

pub use application_plan::ApplicationPlan;
pub use backend::Backend;
pub use backend_metric::BackendMetric;
pub use backend_method::BackendMethod;
pub use backend_usage::BackendUsage;
pub use mapping_rule::MappingRule;
pub use metric::Metric;
pub use method::Method;
pub use service::Service;

/// Reference to a remote entity, decided once at the command boundary.
///
/// Operators address entities either by numeric id or by system name, in the
/// same positional argument. The ambiguity is resolved exactly once, when
/// the argument is parsed: a nonzero canonical decimal becomes [`Id`],
/// anything else becomes [`Name`]. The resolver still falls back from a
/// dangling id to a name scan, so a service whose system name happens to be
/// numeric remains reachable.
///
/// [`Id`]: EntityRef::Id
/// [`Name`]: EntityRef::Name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    /// Resolved numeric identifier.
    Id(u64),
    /// System name to scan for.
    Name(String),
}

impl EntityRef {
    /// Parses a raw command-line reference.
    ///
    /// Only a nonzero number in canonical form counts as an id; zero and
    /// leading-zero spellings are treated as names (zero is never a valid
    /// id, and `042` can only be a system name).
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<u64>() {
            Ok(n) if n > 0 && n.to_string() == raw => Self::Id(n),
            _ => Self::Name(raw.to_string()),
        }
    }
}

impl From<&str> for EntityRef {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Returns the canonical form of a reported system name.
///
/// `orders.99812` canonicalizes to `orders`; a name without a separator is
/// already canonical.
pub fn canonical_system_name(raw: &str) -> &str {
    raw.split('.').next().unwrap_or(raw)
}

/// Rewrites `system_name` to its canonical form on attribute ingest.
pub(crate) fn process_attrs(mut attrs: Attrs) -> Attrs {
    if let Some(raw) = attrs.get("system_name").and_then(Value::as_str) {
        let canonical = canonical_system_name(raw).to_string();
        attrs.insert("system_name".into(), Value::String(canonical));
    }
    attrs
}

/// Keeps only the attribute keys the remote accepts for an entity kind.
///
/// Unknown keys are dropped before submission, never sent.
pub(crate) fn filter_params(valid: &[&str], attrs: &Attrs) -> Attrs {
    attrs
        .iter()
        .filter(|(key, _)| valid.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Reads the mandatory numeric id of a record.
pub(crate) fn id_of(attrs: &Attrs) -> Result<u64> {
    attrs
        .get("id")
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::Invariant("remote record carries no numeric id".to_string()))
}

/// Reads the canonical system name of a record, empty if unset.
pub(crate) fn system_name_of(attrs: &Attrs) -> String {
    attrs
        .get("system_name")
        .and_then(Value::as_str)
        .map(|raw| canonical_system_name(raw).to_string())
        .unwrap_or_default()
}

/// Returns `true` when an error payload matches the one retryable rejection:
/// a `deployment_option` value the destination instance does not accept.
pub(crate) fn invalid_deployment_option(payload: &Value) -> bool {
    payload
        .get("errors")
        .and_then(|errors| errors.get("deployment_option"))
        .and_then(Value::as_array)
        .map(|messages| {
            messages
                .iter()
                .filter_map(Value::as_str)
                .any(|msg| msg.contains("is not included in the list"))
        })
        .unwrap_or(false)
}

/// Correlates two `(id, canonical system name)` indexes into a source-id →
/// destination-id map.
///
/// Cross product filtered by name equality; entities unmatched on the
/// destination are silently excluded. With duplicate names in one scope the
/// last matching pair wins — the portal is supposed to prevent duplicates,
/// so which pair wins is deliberately left undefined.
pub(crate) fn correlate(source: &[(u64, String)], target: &[(u64, String)]) -> HashMap<u64, u64> {
    let mut mapping = HashMap::new();
    for (source_id, source_name) in source {
        for (target_id, target_name) in target {
            if source_name == target_name {
                mapping.insert(*source_id, *target_id);
            }
        }
    }
    mapping
}
