// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Credential resolution for ARM requests.
//!
//! ARM authenticates with an OAuth2 bearer token. This module resolves one
//! from, in order:
//!
//! 1. An explicit token handed in by the caller (CLI flag)
//! 2. The `ARM_ACCESS_TOKEN` environment variable
//! 3. The Azure CLI session (`az account get-access-token`)
//!
//! Token refresh is out of scope; a run borrows whatever session the
//! operator already has.

use serde::Deserialize;

use crate::error::ArmError;

/// Environment variable consulted for a pre-acquired bearer token
pub const TOKEN_ENV_VAR: &str = "ARM_ACCESS_TOKEN";

/// Where a bearer token should come from
#[derive(Debug, Clone)]
pub enum TokenSource {
    /// Use this token verbatim
    Static(String),
    /// Check `ARM_ACCESS_TOKEN`, then fall back to the Azure CLI
    Ambient,
}

impl TokenSource {
    /// Resolve the source to a concrete bearer token.
    ///
    /// Fails with [`ArmError::NotAuthenticated`] when no credential can be
    /// found; callers treat that as fatal before any control-plane call.
    pub async fn resolve(&self) -> Result<String, ArmError> {
        match self {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::Ambient => {
                if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
                    && !token.trim().is_empty()
                {
                    tracing::debug!("using bearer token from {}", TOKEN_ENV_VAR);
                    return Ok(token.trim().to_string());
                }
                azure_cli_token().await
            }
        }
    }
}

/// Subset of `az account get-access-token -o json` output
#[derive(Deserialize)]
struct AzTokenOutput {
    #[serde(rename = "accessToken")]
    access_token: String,
}

/// Borrow a token from the operator's Azure CLI session
async fn azure_cli_token() -> Result<String, ArmError> {
    let output = tokio::process::Command::new("az")
        .args(["account", "get-access-token", "--output", "json"])
        .output()
        .await
        .map_err(|e| {
            ArmError::NotAuthenticated(format!(
                "no {} set and the Azure CLI could not be run: {}",
                TOKEN_ENV_VAR, e
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ArmError::NotAuthenticated(format!(
            "az account get-access-token failed: {}",
            stderr.trim()
        )));
    }

    let parsed: AzTokenOutput = serde_json::from_slice(&output.stdout).map_err(|e| {
        ArmError::NotAuthenticated(format!("unexpected az token output: {}", e))
    })?;

    tracing::debug!("using bearer token from the Azure CLI session");
    Ok(parsed.access_token)
}
