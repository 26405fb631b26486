// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for arm-client

use thiserror::Error;

/// Errors that can occur when talking to the ARM control plane
#[derive(Error, Debug)]
pub enum ArmError {
    /// No usable credential could be found or acquired
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// Transport-level failure (connect, TLS, timeout, body decode)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// ARM rejected the request and returned an error document
    #[error("ARM error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// A role assignment for (principal, role, scope) already exists.
    ///
    /// Split out from [`ArmError::Api`] so callers that race with a
    /// concurrent grant can treat the conflict as idempotent success.
    #[error("Role assignment already exists at {scope}")]
    AssignmentExists { scope: String },

    /// The requested role is not in the built-in role catalog
    #[error("Unknown role definition: {0}")]
    UnknownRole(String),
}
