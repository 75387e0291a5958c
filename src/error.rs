//
//  apim-cli
//  error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Error Types
//!
//! This module defines the typed error taxonomy shared by the API client,
//! the entity layer, and the copy pipeline.
//!
//! ## Taxonomy
//!
//! | Variant | Meaning | Fatal? |
//! |---------|---------|--------|
//! | [`Error::InvalidId`] | A reference is structurally not a usable id (zero) | no inside `find`, yes elsewhere |
//! | [`Error::NotFound`] | The remote confirmed no such record | converted to `None` by the resolver |
//! | [`Error::Api`] | The remote answered with an error payload | yes |
//! | [`Error::Invariant`] | A domain invariant does not hold (e.g. missing `hits`) | yes |
//! | [`Error::Transport`] | Network-level failure | yes |
//! | [`Error::Decode`] | The response body is not the JSON shape we expect | yes |
//!
//! Remote error payloads are preserved verbatim in [`Error::Api`] so the
//! operator sees exactly what the admin portal reported. The entity layer
//! attaches the operation context ("service not created", "metric list not
//! read", ...) via [`Error::with_context`].

use serde_json::Value;
use thiserror::Error;

/// Convenient result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the API client, entities, and copy tasks.
#[derive(Debug, Error)]
pub enum Error {
    /// A supplied id is structurally not a valid identifier (zero).
    ///
    /// Inside the resolver this triggers the system-name fallback; on any
    /// mutation path that expects an already-resolved id it is fatal.
    #[error("entity id must be a positive integer")]
    InvalidId,

    /// The remote confirmed the record does not exist (HTTP 404).
    ///
    /// `find`/`find_by_system_name` never surface this variant; they return
    /// `Ok(None)` instead. It only escapes from paths that require the
    /// record to exist.
    #[error("remote entity not found")]
    NotFound,

    /// The remote answered with an error payload.
    ///
    /// The payload is whatever JSON the admin portal returned, kept verbatim
    /// for operator diagnosis. Presence of an error marker in the body is
    /// authoritative regardless of the HTTP status code.
    #[error("{context}: {payload}")]
    Api {
        /// Operation description, e.g. "service not created".
        context: String,
        /// Raw error payload from the remote.
        payload: Value,
    },

    /// A domain invariant does not hold, e.g. a service without its
    /// mandatory `hits` metric.
    #[error("{0}")]
    Invariant(String),

    /// A remote URL that could not be parsed into endpoint + credential.
    #[error("invalid remote url: {0}")]
    RemoteUrl(String),

    /// Network-level failure from the HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded as the expected JSON shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Builds an [`Error::Api`] from an operation context and a raw payload.
    pub fn api(context: impl Into<String>, payload: Value) -> Self {
        Self::Api {
            context: context.into(),
            payload,
        }
    }

    /// Replaces the operation context of an [`Error::Api`].
    ///
    /// The client layer classifies responses without knowing which entity
    /// operation asked for them; entities use this to attach the message the
    /// operator should read. Every other variant passes through unchanged,
    /// in particular [`Error::NotFound`] so the resolver can still branch
    /// on it.
    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::Api { payload, .. } => Self::Api {
                context: context.to_string(),
                payload,
            },
            other => other,
        }
    }

    /// Returns `true` for the typed "no such record" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
