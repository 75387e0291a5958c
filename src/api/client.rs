//
//  apim-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Admin API
//!
//! [`AdminClient`] is the production implementation of the [`Remote`] seam.
//! It talks to an instance's administrative REST API, authenticating with an
//! access token embedded in the remote URL:
//!
//! ```text
//! http[s]://<access_token>@<admin-portal-host>
//! ```
//!
//! ## Response classification
//!
//! The admin portal reports failures as JSON bodies carrying an error marker
//! (an `errors` or `error` key), sometimes with a 2xx status. The marker is
//! authoritative: any body carrying one becomes
//! [`Error::Api`](crate::Error::Api) with the payload preserved verbatim.
//! HTTP 404 becomes the typed [`Error::NotFound`](crate::Error::NotFound)
//! so the entity resolver can branch on it.
//!
//! ## Envelopes
//!
//! The admin API wraps records in single-key envelopes
//! (`{"service": {...}}`) and collections in keyed lists
//! (`{"services": [{"service": {...}}, ...]}`). The client unwraps both
//! shapes and hands plain attribute bags to the entity layer. A `null` list
//! body is the natural end of data, not an error.

use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use url::Url;

use async_trait::async_trait;

use crate::api::remote::{Attrs, Remote};
use crate::error::{Error, Result};

/// Returns `true` when a response body carries the admin API error marker.
fn has_error_marker(body: &Value) -> bool {
    body.get("errors").is_some() || body.get("error").is_some()
}

/// Extracts an attribute bag from a possibly enveloped record value.
fn record_attrs(value: Value, kind: &str) -> Result<Attrs> {
    match value {
        Value::Object(mut map) => match map.remove(kind) {
            Some(inner) => Ok(serde_json::from_value(inner)?),
            // Some deployments answer without the envelope.
            None => Ok(map),
        },
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Extracts a record list from a possibly enveloped collection value.
///
/// Accepts `{"<list_key>": [...]}`, a bare array, or `null` (empty).
fn list_attrs(value: Value, list_key: &str, item_key: &str) -> Result<Vec<Attrs>> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(list_key) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => return Ok(Vec::new()),
            Some(other) => return Ok(vec![serde_json::from_value(other)?]),
        },
        other => return Ok(vec![serde_json::from_value(other)?]),
    };

    items
        .into_iter()
        .map(|item| record_attrs(item, item_key))
        .collect()
}

/// HTTP client for one admin portal instance.
///
/// The client is read-shared (behind an `Arc`) across every entity handle
/// and copy task of an invocation and never mutated after construction.
///
/// # Example
///
/// ```rust,no_run
/// use apim_cli::api::AdminClient;
///
/// let client = AdminClient::from_remote_url("https://secret@admin.example.com", false)?;
/// assert_eq!(client.endpoint(), "https://admin.example.com");
/// # Ok::<(), apim_cli::Error>(())
/// ```
pub struct AdminClient {
    http: Client,
    endpoint: String,
    access_token: String,
}

impl AdminClient {
    /// Builds a client from a `http[s]://<access_token>@host` remote URL.
    ///
    /// `insecure` disables TLS certificate verification, for instances
    /// running with self-signed certificates.
    pub fn from_remote_url(raw: &str, insecure: bool) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| Error::RemoteUrl(format!("{raw}: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::RemoteUrl(format!(
                "{raw}: scheme must be http or https"
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| Error::RemoteUrl(format!("{raw}: missing host")))?;

        let access_token = url.username().to_string();
        if access_token.is_empty() {
            return Err(Error::RemoteUrl(format!(
                "{raw}: missing access token (expected http[s]://<token>@host)"
            )));
        }

        let endpoint = match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        };

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("apim/{}", crate::VERSION))
                .danger_accept_invalid_certs(insecure)
                .build()?,
            endpoint,
            access_token,
        })
    }

    /// Returns the instance endpoint (scheme://host[:port]), without the
    /// credential.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one admin API request and classifies the response.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Attrs>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.endpoint, path);
        let mut request = self
            .http
            .request(method, &url)
            .query(&[("access_token", self.access_token.as_str())])
            .query(query);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound);
        }

        let text = response.text().await?;
        let value: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            // Non-JSON bodies are kept as raw text in the error payload.
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if has_error_marker(&value) {
            return Err(Error::api("remote error", value));
        }

        if !status.is_success() {
            return Err(Error::api(
                "remote error",
                json!({ "status": status.as_u16(), "body": value }),
            ));
        }

        Ok(value)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.request(Method::GET, path, query, None).await
    }

    async fn post(&self, path: &str, body: &Attrs) -> Result<Value> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    async fn put(&self, path: &str, body: &Attrs) -> Result<Value> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    async fn patch(&self, path: &str, body: &Attrs) -> Result<Value> {
        self.request(Method::PATCH, path, &[], Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.request(Method::DELETE, path, &[], None).await?;
        Ok(())
    }
}

fn page_query(page: u32, per_page: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("per_page", per_page.to_string())]
}

#[async_trait]
impl Remote for AdminClient {
    async fn list_services(&self, page: u32, per_page: u32) -> Result<Vec<Attrs>> {
        let body = self
            .get("/admin/api/services.json", &page_query(page, per_page))
            .await?;
        list_attrs(body, "services", "service")
    }

    async fn show_service(&self, id: u64) -> Result<Attrs> {
        let body = self.get(&format!("/admin/api/services/{id}.json"), &[]).await?;
        record_attrs(body, "service")
    }

    async fn create_service(&self, attrs: &Attrs) -> Result<Attrs> {
        let body = self.post("/admin/api/services.json", attrs).await?;
        record_attrs(body, "service")
    }

    async fn update_service(&self, id: u64, attrs: &Attrs) -> Result<Attrs> {
        let body = self
            .put(&format!("/admin/api/services/{id}.json"), attrs)
            .await?;
        record_attrs(body, "service")
    }

    async fn delete_service(&self, id: u64) -> Result<()> {
        self.delete(&format!("/admin/api/services/{id}.json")).await
    }

    async fn show_proxy(&self, service_id: u64) -> Result<Attrs> {
        let body = self
            .get(&format!("/admin/api/services/{service_id}/proxy.json"), &[])
            .await?;
        record_attrs(body, "proxy")
    }

    async fn update_proxy(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs> {
        let body = self
            .patch(&format!("/admin/api/services/{service_id}/proxy.json"), attrs)
            .await?;
        record_attrs(body, "proxy")
    }

    async fn list_metrics(&self, service_id: u64) -> Result<Vec<Attrs>> {
        let body = self
            .get(&format!("/admin/api/services/{service_id}/metrics.json"), &[])
            .await?;
        list_attrs(body, "metrics", "metric")
    }

    async fn show_metric(&self, service_id: u64, id: u64) -> Result<Attrs> {
        let body = self
            .get(
                &format!("/admin/api/services/{service_id}/metrics/{id}.json"),
                &[],
            )
            .await?;
        record_attrs(body, "metric")
    }

    async fn create_metric(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs> {
        let body = self
            .post(&format!("/admin/api/services/{service_id}/metrics.json"), attrs)
            .await?;
        record_attrs(body, "metric")
    }

    async fn list_methods(&self, service_id: u64, hits_id: u64) -> Result<Vec<Attrs>> {
        let body = self
            .get(
                &format!("/admin/api/services/{service_id}/metrics/{hits_id}/methods.json"),
                &[],
            )
            .await?;
        list_attrs(body, "methods", "method")
    }

    async fn show_method(&self, service_id: u64, hits_id: u64, id: u64) -> Result<Attrs> {
        let body = self
            .get(
                &format!(
                    "/admin/api/services/{service_id}/metrics/{hits_id}/methods/{id}.json"
                ),
                &[],
            )
            .await?;
        record_attrs(body, "method")
    }

    async fn create_method(&self, service_id: u64, hits_id: u64, attrs: &Attrs) -> Result<Attrs> {
        let body = self
            .post(
                &format!("/admin/api/services/{service_id}/metrics/{hits_id}/methods.json"),
                attrs,
            )
            .await?;
        record_attrs(body, "method")
    }

    async fn list_application_plans(&self, service_id: u64) -> Result<Vec<Attrs>> {
        let body = self
            .get(
                &format!("/admin/api/services/{service_id}/application_plans.json"),
                &[],
            )
            .await?;
        list_attrs(body, "plans", "application_plan")
    }

    async fn create_application_plan(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs> {
        let body = self
            .post(
                &format!("/admin/api/services/{service_id}/application_plans.json"),
                attrs,
            )
            .await?;
        record_attrs(body, "application_plan")
    }

    async fn list_limits(&self, plan_id: u64) -> Result<Vec<Attrs>> {
        let body = self
            .get(
                &format!("/admin/api/application_plans/{plan_id}/limits.json"),
                &[],
            )
            .await?;
        list_attrs(body, "limits", "limit")
    }

    async fn create_limit(&self, plan_id: u64, metric_id: u64, attrs: &Attrs) -> Result<Attrs> {
        let body = self
            .post(
                &format!("/admin/api/application_plans/{plan_id}/metrics/{metric_id}/limits.json"),
                attrs,
            )
            .await?;
        record_attrs(body, "limit")
    }

    async fn list_mapping_rules(&self, service_id: u64) -> Result<Vec<Attrs>> {
        let body = self
            .get(
                &format!("/admin/api/services/{service_id}/proxy/mapping_rules.json"),
                &[],
            )
            .await?;
        list_attrs(body, "mapping_rules", "mapping_rule")
    }

    async fn create_mapping_rule(&self, service_id: u64, attrs: &Attrs) -> Result<Attrs> {
        let body = self
            .post(
                &format!("/admin/api/services/{service_id}/proxy/mapping_rules.json"),
                attrs,
            )
            .await?;
        record_attrs(body, "mapping_rule")
    }

    async fn delete_mapping_rule(&self, service_id: u64, rule_id: u64) -> Result<()> {
        self.delete(&format!(
            "/admin/api/services/{service_id}/proxy/mapping_rules/{rule_id}.json"
        ))
        .await
    }

    async fn list_backends(&self, page: u32, per_page: u32) -> Result<Vec<Attrs>> {
        let body = self
            .get("/admin/api/backend_apis.json", &page_query(page, per_page))
            .await?;
        list_attrs(body, "backend_apis", "backend_api")
    }

    async fn show_backend(&self, id: u64) -> Result<Attrs> {
        let body = self
            .get(&format!("/admin/api/backend_apis/{id}.json"), &[])
            .await?;
        record_attrs(body, "backend_api")
    }

    async fn list_backend_usages(&self, service_id: u64) -> Result<Vec<Attrs>> {
        let body = self
            .get(
                &format!("/admin/api/services/{service_id}/backend_usages.json"),
                &[],
            )
            .await?;
        list_attrs(body, "backend_usages", "backend_usage")
    }

    async fn list_backend_metrics(&self, backend_id: u64) -> Result<Vec<Attrs>> {
        let body = self
            .get(&format!("/admin/api/backend_apis/{backend_id}/metrics.json"), &[])
            .await?;
        list_attrs(body, "metrics", "metric")
    }

    async fn list_backend_methods(&self, backend_id: u64, hits_id: u64) -> Result<Vec<Attrs>> {
        let body = self
            .get(
                &format!(
                    "/admin/api/backend_apis/{backend_id}/metrics/{hits_id}/methods.json"
                ),
                &[],
            )
            .await?;
        list_attrs(body, "methods", "method")
    }
}
