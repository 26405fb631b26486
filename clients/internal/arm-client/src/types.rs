// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Wire types for the ARM subscriptions and authorization APIs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Administrative state of a subscription.
///
/// ARM reports `Enabled` for usable subscriptions; we surface that as
/// `Active`. Anything we do not recognize (Warned, PastDue, Deleted,
/// future states) is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum SubscriptionState {
    Active,
    Disabled,
    #[serde(untagged)]
    Other(String),
}

impl<'de> Deserialize<'de> for SubscriptionState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "Enabled" | "Active" => SubscriptionState::Active,
            "Disabled" => SubscriptionState::Disabled,
            _ => SubscriptionState::Other(raw),
        })
    }
}

impl std::fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionState::Active => write!(f, "Active"),
            SubscriptionState::Disabled => write!(f, "Disabled"),
            SubscriptionState::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A subscription as returned by the ARM subscriptions API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(rename = "subscriptionId")]
    pub id: Uuid,
    pub display_name: String,
    pub state: SubscriptionState,
}

impl Subscription {
    /// The ARM resource scope this subscription grants live at
    pub fn scope(&self) -> String {
        format!("/subscriptions/{}", self.id)
    }
}

/// Principal type hint passed when creating a role assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipalType {
    User,
    Group,
    ServicePrincipal,
}

/// Properties of an existing or newly created role assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignmentProperties {
    pub role_definition_id: String,
    pub principal_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_type: Option<PrincipalType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// A role assignment resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub id: String,
    pub name: String,
    pub properties: RoleAssignmentProperties,
}

/// Paged list envelope used by ARM collection endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct ArmList<T> {
    pub value: Vec<T>,
    #[serde(rename = "nextLink")]
    pub next_link: Option<String>,
}

/// ARM error document: `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ArmErrorResponse {
    pub error: ArmErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArmErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Look up the definition identifier of an Azure built-in role.
///
/// Only the roles this tooling hands out are listed; the identifiers are
/// fixed across all tenants.
pub fn builtin_role_definition(role_name: &str) -> Option<&'static str> {
    match role_name {
        "Owner" => Some("8e3af657-a8ff-443c-a75c-2fe8c4bcb635"),
        "Contributor" => Some("b24988ac-6180-42a0-ab88-20f7382dd24c"),
        "Reader" => Some("acdd72a7-3385-48ef-bd42-f606fba81ae7"),
        _ => None,
    }
}
