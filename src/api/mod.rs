//
//  apim-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Admin API Layer
//!
//! This module provides the transport seam between the synchronization core
//! and an instance's administrative REST API.
//!
//! ## Architecture
//!
//! - [`remote`]: the [`Remote`] trait — per-entity-kind list/show/create/
//!   update/delete operations the core depends on
//! - [`client`]: [`AdminClient`], the reqwest-backed production
//!   implementation, including remote-URL credential parsing, envelope
//!   unwrapping, and error-marker classification
//! - [`pagination`]: [`Pager`], the lazy page-by-page enumerator for
//!   collections the portal paginates
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use apim_cli::api::{AdminClient, RemoteHandle};
//!
//! let remote: RemoteHandle =
//!     Arc::new(AdminClient::from_remote_url("https://secret@admin.example.com", false)?);
//! # Ok::<(), apim_cli::Error>(())
//! ```
//!
//! Every entity operation holds a [`RemoteHandle`] (an `Arc<dyn Remote>`);
//! the handle is read-shared across one command invocation and never
//! mutated.

/// Production HTTP client for the admin API.
pub mod client;

/// Lazy paginated-collection enumerator.
pub mod pagination;

/// Transport trait the synchronization core is written against.
pub mod remote;

#[cfg(test)]
pub(crate) mod fake;

pub use client::AdminClient;
pub use pagination::{Pager, MAX_PER_PAGE};
pub use remote::{Attrs, Remote, RemoteHandle};
