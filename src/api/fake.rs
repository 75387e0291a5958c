//
//  apim-cli
//  api/fake.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! In-memory [`Remote`] implementation backing the entity and copy tests.
//!
//! Mirrors the behaviors of the real admin portal the core depends on:
//! page-sliced list endpoints, typed not-found, error payloads with the
//! `errors` marker, id assignment on create, and the service-creation side
//! effects (default `hits` metric plus an auto-generated mapping rule).
//! Failure knobs and per-operation call counters let tests assert the exact
//! remote call shapes.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::remote::{Attrs, Remote, RemoteHandle};
use crate::error::{Error, Result};

/// Coerces a concrete fake into the trait-object handle entities take.
pub(crate) fn handle(remote: &std::sync::Arc<FakeRemote>) -> RemoteHandle {
    std::sync::Arc::clone(remote) as RemoteHandle
}

fn obj(value: Value) -> Attrs {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}

fn id_of(attrs: &Attrs) -> u64 {
    attrs.get("id").and_then(Value::as_u64).unwrap_or(0)
}

#[derive(Default)]
struct State {
    services: Vec<Attrs>,
    proxies: HashMap<u64, Attrs>,
    // service_id -> metrics and methods (methods carry parent_id)
    metrics: HashMap<u64, Vec<Attrs>>,
    plans: HashMap<u64, Vec<Attrs>>,
    // plan_id -> limits
    limits: HashMap<u64, Vec<Attrs>>,
    mapping_rules: HashMap<u64, Vec<Attrs>>,
    backends: Vec<Attrs>,
    backend_metrics: HashMap<u64, Vec<Attrs>>,
    backend_usages: HashMap<u64, Vec<Attrs>>,
    next_id: u64,
    calls: HashMap<&'static str, u32>,
    reject_deployment_option: bool,
    suffix_created_system_names: bool,
    fail: HashMap<&'static str, Value>,
    fail_from: HashMap<&'static str, (u32, Value)>,
}

/// Scriptable in-memory admin portal.
#[derive(Default)]
pub(crate) struct FakeRemote {
    state: Mutex<State>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }

    fn next_id(state: &mut State) -> u64 {
        state.next_id += 1;
        1000 + state.next_id
    }

    fn track(&self, op: &'static str) -> Result<()> {
        self.with_state(|state| {
            let count = state.calls.entry(op).or_insert(0);
            *count += 1;
            let count = *count;
            if let Some(payload) = state.fail.get(op) {
                return Err(Error::api("remote error", payload.clone()));
            }
            if let Some((from, payload)) = state.fail_from.get(op) {
                if count >= *from {
                    return Err(Error::api("remote error", payload.clone()));
                }
            }
            Ok(())
        })
    }

    /// Number of calls observed for one trait operation.
    pub fn calls(&self, op: &'static str) -> u32 {
        self.with_state(|state| state.calls.get(op).copied().unwrap_or(0))
    }

    /// Makes every call of `op` answer with the given error payload.
    pub fn fail_with(&self, op: &'static str, payload: Value) {
        self.with_state(|state| {
            state.fail.insert(op, payload);
        });
    }

    /// Makes calls of `op` fail with the payload starting with call `from`
    /// (1-based); earlier calls behave normally.
    pub fn fail_from(&self, op: &'static str, from: u32, payload: Value) {
        self.with_state(|state| {
            state.fail_from.insert(op, (from, payload));
        });
    }

    /// Rejects creates/updates carrying `deployment_option`.
    pub fn reject_deployment_option(&self) {
        self.with_state(|state| state.reject_deployment_option = true);
    }

    /// Appends a `.NNN` disambiguation suffix to created system names.
    pub fn suffix_created_system_names(&self) {
        self.with_state(|state| state.suffix_created_system_names = true);
    }

    // --- seeding helpers ------------------------------------------------

    pub fn add_service(&self, value: Value) -> u64 {
        self.with_state(|state| {
            let mut attrs = obj(value);
            let id = match attrs.get("id").and_then(Value::as_u64) {
                Some(id) => id,
                None => {
                    let id = Self::next_id(state);
                    attrs.insert("id".into(), json!(id));
                    id
                }
            };
            state.services.push(attrs);
            id
        })
    }

    pub fn set_proxy(&self, service_id: u64, value: Value) {
        self.with_state(|state| {
            state.proxies.insert(service_id, obj(value));
        });
    }

    pub fn add_metric(&self, service_id: u64, value: Value) -> u64 {
        self.add_scoped(service_id, value, None, false)
    }

    pub fn add_method(&self, service_id: u64, parent_id: u64, value: Value) -> u64 {
        self.add_scoped(service_id, value, Some(parent_id), false)
    }

    pub fn add_backend_metric(&self, backend_id: u64, value: Value) -> u64 {
        self.add_scoped(backend_id, value, None, true)
    }

    pub fn add_backend_method(&self, backend_id: u64, parent_id: u64, value: Value) -> u64 {
        self.add_scoped(backend_id, value, Some(parent_id), true)
    }

    fn add_scoped(
        &self,
        scope_id: u64,
        value: Value,
        parent_id: Option<u64>,
        backend: bool,
    ) -> u64 {
        self.with_state(|state| {
            let mut attrs = obj(value);
            let id = match attrs.get("id").and_then(Value::as_u64) {
                Some(id) => id,
                None => {
                    let id = Self::next_id(state);
                    attrs.insert("id".into(), json!(id));
                    id
                }
            };
            attrs.insert("parent_id".into(), parent_id.map_or(Value::Null, |p| json!(p)));
            let store = if backend {
                &mut state.backend_metrics
            } else {
                &mut state.metrics
            };
            store.entry(scope_id).or_default().push(attrs);
            id
        })
    }

    pub fn add_plan(&self, service_id: u64, value: Value) -> u64 {
        self.with_state(|state| {
            let mut attrs = obj(value);
            let id = match attrs.get("id").and_then(Value::as_u64) {
                Some(id) => id,
                None => {
                    let id = Self::next_id(state);
                    attrs.insert("id".into(), json!(id));
                    id
                }
            };
            state.plans.entry(service_id).or_default().push(attrs);
            id
        })
    }

    pub fn add_limit(&self, plan_id: u64, value: Value) {
        self.with_state(|state| {
            let mut attrs = obj(value);
            if !attrs.contains_key("id") {
                let id = Self::next_id(state);
                attrs.insert("id".into(), json!(id));
            }
            state.limits.entry(plan_id).or_default().push(attrs);
        });
    }

    pub fn add_mapping_rule(&self, service_id: u64, value: Value) -> u64 {
        self.with_state(|state| {
            let mut attrs = obj(value);
            let id = match attrs.get("id").and_then(Value::as_u64) {
                Some(id) => id,
                None => {
                    let id = Self::next_id(state);
                    attrs.insert("id".into(), json!(id));
                    id
                }
            };
            state.mapping_rules.entry(service_id).or_default().push(attrs);
            id
        })
    }

    pub fn add_backend(&self, value: Value) -> u64 {
        self.with_state(|state| {
            let mut attrs = obj(value);
            let id = match attrs.get("id").and_then(Value::as_u64) {
                Some(id) => id,
                None => {
                    let id = Self::next_id(state);
                    attrs.insert("id".into(), json!(id));
                    id
                }
            };
            state.backends.push(attrs);
            id
        })
    }

    pub fn add_backend_usage(&self, service_id: u64, backend_id: u64) {
        self.with_state(|state| {
            let id = Self::next_id(state);
            let attrs = obj(json!({
                "id": id,
                "service_id": service_id,
                "backend_id": backend_id,
                "path": "/",
            }));
            state.backend_usages.entry(service_id).or_default().push(attrs);
        });
    }

    /// Mapping rules currently stored for a service, for assertions.
    pub fn mapping_rules_of(&self, service_id: u64) -> Vec<Attrs> {
        self.with_state(|state| {
            state.mapping_rules.get(&service_id).cloned().unwrap_or_default()
        })
    }

    /// Limits currently stored for a plan, for assertions.
    pub fn limits_of(&self, plan_id: u64) -> Vec<Attrs> {
        self.with_state(|state| state.limits.get(&plan_id).cloned().unwrap_or_default())
    }

    fn page(records: &[Attrs], page: u32, per_page: u32) -> Vec<Attrs> {
        let start = ((page - 1) * per_page) as usize;
        records.iter().skip(start).take(per_page as usize).cloned().collect()
    }

    fn deployment_option_rejection() -> Error {
        Error::api(
            "remote error",
            json!({"errors": {"deployment_option": ["is not included in the list"]}}),
        )
    }
}

#[async_trait]
impl Remote for FakeRemote {
    async fn list_services(&self, page: u32, per_page: u32) -> Result<Vec<Attrs>> {
        self.track("list_services")?;
        self.with_state(|state| Ok(Self::page(&state.services, page, per_page)))
    }

    async fn show_service(&self, id: u64) -> Result<Attrs> {
        self.track("show_service")?;
        self.with_state(|state| {
            state
                .services
                .iter()
                .find(|svc| id_of(svc) == id)
                .cloned()
                .ok_or(Error::NotFound)
        })
    }

    async fn create_service(&self, attrs: &Attrs) -> Result<Attrs> {
        self.track("create_service")?;
        self.with_state(|state| {
            if state.reject_deployment_option && attrs.contains_key("deployment_option") {
                return Err(Self::deployment_option_rejection());
            }

            let mut stored = attrs.clone();
            let id = Self::next_id(state);
            stored.insert("id".into(), json!(id));
            if state.suffix_created_system_names {
                if let Some(name) = stored.get("system_name").and_then(Value::as_str) {
                    let suffixed = format!("{name}.{id}");
                    stored.insert("system_name".into(), json!(suffixed));
                }
            }
            state.services.push(stored.clone());

            // The portal provisions a hits metric and a default catch-all
            // mapping rule on every new service.
            let hits_id = Self::next_id(state);
            state.metrics.entry(id).or_default().push(obj(json!({
                "id": hits_id,
                "system_name": "hits",
                "friendly_name": "Hits",
                "unit": "hit",
                "parent_id": null,
            })));
            let rule_id = Self::next_id(state);
            state.mapping_rules.entry(id).or_default().push(obj(json!({
                "id": rule_id,
                "pattern": "/",
                "http_method": "GET",
                "delta": 1,
                "metric_id": hits_id,
            })));

            Ok(stored)
        })
    }

    async fn update_service(&self, id: u64, attrs: &Attrs) -> Result<Attrs> {
        self.track("update_service")?;
        self.with_state(|state| {
            if state.reject_deployment_option && attrs.contains_key("deployment_option") {
                return Err(Self::deployment_option_rejection());
            }
            let svc = state
                .services
                .iter_mut()
                .find(|svc| id_of(svc) == id)
                .ok_or(Error::NotFound)?;
            for (key, value) in attrs {
                svc.insert(key.clone(), value.clone());
            }
            Ok(svc.clone())
        })
    }

    async fn delete_service(&self, id: u64) -> Result<()> {
        self.track("delete_service")?;
        self.with_state(|state| {
            let before = state.services.len();
            state.services.retain(|svc| id_of(svc) != id);
            if state.services.len() == before {
                return Err(Error::NotFound);
            }
            Ok(())
        })
    }

    async fn show_proxy(&self, service_id: u64) -> Result<Attrs> {
        self.track("show_proxy")?;
        self.with_state(|state| Ok(state.proxies.get(&service_id).cloned().unwrap_or_default()))
    }

    async fn update_proxy(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs> {
        self.track("update_proxy")?;
        self.with_state(|state| {
            let proxy = state.proxies.entry(service_id).or_default();
            for (key, value) in attrs {
                proxy.insert(key.clone(), value.clone());
            }
            Ok(proxy.clone())
        })
    }

    async fn list_metrics(&self, service_id: u64) -> Result<Vec<Attrs>> {
        self.track("list_metrics")?;
        self.with_state(|state| Ok(state.metrics.get(&service_id).cloned().unwrap_or_default()))
    }

    async fn show_metric(&self, service_id: u64, id: u64) -> Result<Attrs> {
        self.track("show_metric")?;
        self.with_state(|state| {
            state
                .metrics
                .get(&service_id)
                .and_then(|metrics| metrics.iter().find(|m| id_of(m) == id))
                .cloned()
                .ok_or(Error::NotFound)
        })
    }

    async fn create_metric(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs> {
        self.track("create_metric")?;
        self.with_state(|state| {
            let mut stored = attrs.clone();
            let id = Self::next_id(state);
            stored.insert("id".into(), json!(id));
            stored.insert("parent_id".into(), Value::Null);
            if state.suffix_created_system_names {
                if let Some(name) = stored.get("system_name").and_then(Value::as_str) {
                    let suffixed = format!("{name}.{id}");
                    stored.insert("system_name".into(), json!(suffixed));
                }
            }
            state.metrics.entry(service_id).or_default().push(stored.clone());
            Ok(stored)
        })
    }

    async fn list_methods(&self, service_id: u64, hits_id: u64) -> Result<Vec<Attrs>> {
        self.track("list_methods")?;
        self.with_state(|state| {
            Ok(state
                .metrics
                .get(&service_id)
                .map(|metrics| {
                    metrics
                        .iter()
                        .filter(|m| m.get("parent_id").and_then(Value::as_u64) == Some(hits_id))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default())
        })
    }

    async fn show_method(&self, service_id: u64, _hits_id: u64, id: u64) -> Result<Attrs> {
        self.track("show_method")?;
        self.with_state(|state| {
            state
                .metrics
                .get(&service_id)
                .and_then(|metrics| metrics.iter().find(|m| id_of(m) == id))
                .cloned()
                .ok_or(Error::NotFound)
        })
    }

    async fn create_method(&self, service_id: u64, hits_id: u64, attrs: &Attrs) -> Result<Attrs> {
        self.track("create_method")?;
        self.with_state(|state| {
            let mut stored = attrs.clone();
            let id = Self::next_id(state);
            stored.insert("id".into(), json!(id));
            stored.insert("parent_id".into(), json!(hits_id));
            state.metrics.entry(service_id).or_default().push(stored.clone());
            Ok(stored)
        })
    }

    async fn list_application_plans(&self, service_id: u64) -> Result<Vec<Attrs>> {
        self.track("list_application_plans")?;
        self.with_state(|state| Ok(state.plans.get(&service_id).cloned().unwrap_or_default()))
    }

    async fn create_application_plan(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs> {
        self.track("create_application_plan")?;
        self.with_state(|state| {
            let mut stored = attrs.clone();
            let id = Self::next_id(state);
            stored.insert("id".into(), json!(id));
            state.plans.entry(service_id).or_default().push(stored.clone());
            Ok(stored)
        })
    }

    async fn list_limits(&self, plan_id: u64) -> Result<Vec<Attrs>> {
        self.track("list_limits")?;
        self.with_state(|state| Ok(state.limits.get(&plan_id).cloned().unwrap_or_default()))
    }

    async fn create_limit(&self, plan_id: u64, metric_id: u64, attrs: &Attrs) -> Result<Attrs> {
        self.track("create_limit")?;
        self.with_state(|state| {
            let mut stored = attrs.clone();
            let id = Self::next_id(state);
            stored.insert("id".into(), json!(id));
            stored.insert("metric_id".into(), json!(metric_id));
            stored.insert("plan_id".into(), json!(plan_id));
            state.limits.entry(plan_id).or_default().push(stored.clone());
            Ok(stored)
        })
    }

    async fn list_mapping_rules(&self, service_id: u64) -> Result<Vec<Attrs>> {
        self.track("list_mapping_rules")?;
        self.with_state(|state| {
            Ok(state.mapping_rules.get(&service_id).cloned().unwrap_or_default())
        })
    }

    async fn create_mapping_rule(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs> {
        self.track("create_mapping_rule")?;
        self.with_state(|state| {
            let mut stored = attrs.clone();
            let id = Self::next_id(state);
            stored.insert("id".into(), json!(id));
            state.mapping_rules.entry(service_id).or_default().push(stored.clone());
            Ok(stored)
        })
    }

    async fn delete_mapping_rule(&self, service_id: u64, rule_id: u64) -> Result<()> {
        self.track("delete_mapping_rule")?;
        self.with_state(|state| {
            let rules = state.mapping_rules.entry(service_id).or_default();
            let before = rules.len();
            rules.retain(|rule| id_of(rule) != rule_id);
            if rules.len() == before {
                return Err(Error::NotFound);
            }
            Ok(())
        })
    }

    async fn list_backends(&self, page: u32, per_page: u32) -> Result<Vec<Attrs>> {
        self.track("list_backends")?;
        self.with_state(|state| Ok(Self::page(&state.backends, page, per_page)))
    }

    async fn show_backend(&self, id: u64) -> Result<Attrs> {
        self.track("show_backend")?;
        self.with_state(|state| {
            state
                .backends
                .iter()
                .find(|b| id_of(b) == id)
                .cloned()
                .ok_or(Error::NotFound)
        })
    }

    async fn list_backend_usages(&self, service_id: u64) -> Result<Vec<Attrs>> {
        self.track("list_backend_usages")?;
        self.with_state(|state| {
            Ok(state.backend_usages.get(&service_id).cloned().unwrap_or_default())
        })
    }

    async fn list_backend_metrics(&self, backend_id: u64) -> Result<Vec<Attrs>> {
        self.track("list_backend_metrics")?;
        self.with_state(|state| {
            Ok(state.backend_metrics.get(&backend_id).cloned().unwrap_or_default())
        })
    }

    async fn list_backend_methods(&self, backend_id: u64, hits_id: u64) -> Result<Vec<Attrs>> {
        self.track("list_backend_methods")?;
        self.with_state(|state| {
            Ok(state
                .backend_metrics
                .get(&backend_id)
                .map(|metrics| {
                    metrics
                        .iter()
                        .filter(|m| m.get("parent_id").and_then(Value::as_u64) == Some(hits_id))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default())
        })
    }
}
