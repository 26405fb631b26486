// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Azure Resource Manager (ARM) Client Library
//!
//! This client provides typed access to the two slivers of ARM that AOBO
//! tooling needs: the subscriptions API and the authorization (role
//! assignment) API. It is hand-written rather than generated; the surface
//! is four calls and the ARM OpenAPI corpus is not worth the machinery.
//!
//! ## Usage
//!
//! ```ignore
//! use arm_client::{ArmApi, ArmClient, TokenSource};
//!
//! let client = ArmClient::new(TokenSource::Ambient).await?;
//!
//! for sub in client.list_subscriptions().await? {
//!     println!("{} {}", sub.id, sub.display_name);
//! }
//! ```
//!
//! Consumers should depend on the [`ArmApi`] trait, not the concrete
//! [`ArmClient`], so batch logic stays testable without a live tenant.

pub mod auth;
pub mod error;
pub mod types;

use async_trait::async_trait;
use uuid::Uuid;

pub use auth::{TOKEN_ENV_VAR, TokenSource};
pub use error::ArmError;
pub use types::{
    PrincipalType, RoleAssignment, RoleAssignmentProperties, Subscription, SubscriptionState,
    builtin_role_definition,
};

use types::{ArmErrorResponse, ArmList};

/// Default ARM endpoint (public cloud)
pub const DEFAULT_ARM_URL: &str = "https://management.azure.com";

const SUBSCRIPTIONS_API_VERSION: &str = "2022-12-01";
const AUTHORIZATION_API_VERSION: &str = "2022-04-01";

/// The ARM capabilities consumed by AOBO tooling.
///
/// Mirrors the pattern used for other service seams in this repo: an
/// async trait over the external collaborator with one concrete client
/// and in-memory fakes in tests.
#[async_trait]
pub trait ArmApi: Send + Sync {
    /// List every subscription the current credential can see
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ArmError>;

    /// Fetch one subscription; `Ok(None)` when it does not exist or the
    /// credential cannot see it
    async fn get_subscription(&self, id: Uuid) -> Result<Option<Subscription>, ArmError>;

    /// Find an existing assignment of `role_name` to `principal_id` at
    /// `scope`, if any
    async fn find_role_assignment(
        &self,
        principal_id: Uuid,
        scope: &str,
        role_name: &str,
    ) -> Result<Option<RoleAssignment>, ArmError>;

    /// Create a role assignment binding `principal_id` to `role_name` at
    /// `scope`
    async fn create_role_assignment(
        &self,
        principal_id: Uuid,
        role_name: &str,
        scope: &str,
        principal_type: PrincipalType,
    ) -> Result<RoleAssignment, ArmError>;
}

/// Concrete ARM client backed by `reqwest`
#[derive(Clone)]
pub struct ArmClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ArmClient {
    /// Create a client against the public-cloud ARM endpoint
    pub async fn new(token_source: TokenSource) -> Result<Self, ArmError> {
        Self::with_base_url(DEFAULT_ARM_URL, token_source).await
    }

    /// Create a client against a specific ARM endpoint (sovereign clouds,
    /// test stubs)
    pub async fn with_base_url(
        base_url: &str,
        token_source: TokenSource,
    ) -> Result<Self, ArmError> {
        let token = token_source.resolve().await?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!("aobo-arm-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Convert a non-success response into an [`ArmError`]
    async fn api_error(response: reqwest::Response) -> ArmError {
        let status = response.status().as_u16();
        let (code, message) = match response.json::<ArmErrorResponse>().await {
            Ok(doc) => (doc.error.code, doc.error.message),
            Err(_) => (String::new(), String::new()),
        };
        ArmError::Api {
            status,
            code,
            message,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ArmError> {
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ArmApi for ArmClient {
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ArmError> {
        let mut url = format!(
            "{}/subscriptions?api-version={}",
            self.base_url, SUBSCRIPTIONS_API_VERSION
        );
        let mut subscriptions = Vec::new();
        loop {
            let page: ArmList<Subscription> = self.get_json(&url).await?;
            subscriptions.extend(page.value);
            match page.next_link {
                Some(next) => url = next,
                None => break,
            }
        }
        tracing::debug!(count = subscriptions.len(), "listed subscriptions");
        Ok(subscriptions)
    }

    async fn get_subscription(&self, id: Uuid) -> Result<Option<Subscription>, ArmError> {
        let url = format!(
            "{}/subscriptions/{}?api-version={}",
            self.base_url, id, SUBSCRIPTIONS_API_VERSION
        );
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;
        match response.status().as_u16() {
            404 => Ok(None),
            s if (200..300).contains(&s) => Ok(Some(response.json().await?)),
            _ => Err(Self::api_error(response).await),
        }
    }

    async fn find_role_assignment(
        &self,
        principal_id: Uuid,
        scope: &str,
        role_name: &str,
    ) -> Result<Option<RoleAssignment>, ArmError> {
        let definition_id = builtin_role_definition(role_name)
            .ok_or_else(|| ArmError::UnknownRole(role_name.to_string()))?;
        let filter = format!("principalId eq '{}'", principal_id);
        let mut url = format!(
            "{}{}/providers/Microsoft.Authorization/roleAssignments?api-version={}&$filter={}",
            self.base_url,
            scope,
            AUTHORIZATION_API_VERSION,
            urlencoding::encode(&filter),
        );
        // The filter is principal-only; the role match happens here. A
        // principal rarely holds more than a handful of roles at one scope
        // so the page loop is usually a single round trip.
        loop {
            let page: ArmList<RoleAssignment> = self.get_json(&url).await?;
            for assignment in page.value {
                if assignment
                    .properties
                    .role_definition_id
                    .ends_with(definition_id)
                {
                    return Ok(Some(assignment));
                }
            }
            match page.next_link {
                Some(next) => url = next,
                None => return Ok(None),
            }
        }
    }

    async fn create_role_assignment(
        &self,
        principal_id: Uuid,
        role_name: &str,
        scope: &str,
        principal_type: PrincipalType,
    ) -> Result<RoleAssignment, ArmError> {
        let definition_id = builtin_role_definition(role_name)
            .ok_or_else(|| ArmError::UnknownRole(role_name.to_string()))?;
        // Role assignment names are caller-chosen GUIDs
        let assignment_name = Uuid::new_v4();
        let url = format!(
            "{}{}/providers/Microsoft.Authorization/roleAssignments/{}?api-version={}",
            self.base_url, scope, assignment_name, AUTHORIZATION_API_VERSION
        );
        let body = serde_json::json!({
            "properties": {
                "roleDefinitionId": format!(
                    "{}/providers/Microsoft.Authorization/roleDefinitions/{}",
                    scope, definition_id
                ),
                "principalId": principal_id,
                "principalType": principal_type,
            }
        });

        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        if response.status().as_u16() == 409 {
            // Lost a race with another grant of the same role; callers
            // fold this into their already-assigned path.
            return Err(ArmError::AssignmentExists {
                scope: scope.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        let created: RoleAssignment = response.json().await?;
        tracing::debug!(
            scope,
            role = role_name,
            assignment = %created.name,
            "created role assignment"
        );
        Ok(created)
    }
}
