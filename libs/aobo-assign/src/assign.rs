// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! The idempotent apply loop.
//!
//! One subscription is fully processed before the next begins, and every
//! subscription yields exactly one outcome. Per-scope problems are data,
//! not errors: a failed create call is recorded and the loop advances.
//! There is no retry policy: operators re-run the whole batch, and the
//! pre-create idempotency check makes re-runs safe.

use arm_client::{ArmApi, ArmError, PrincipalType, Subscription, SubscriptionState};
use serde::Serialize;
use uuid::Uuid;

use crate::ROLE_NAME;
use crate::region::Principal;

/// What happened to one subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssignmentOutcome {
    /// A new Owner assignment was created
    Assigned,
    /// The principal already held Owner at this scope; nothing written
    AlreadyAssigned,
    /// Administrative state other than Active or Disabled; nothing attempted
    Skipped { reason: String },
    /// Subscription is disabled; nothing attempted
    Disabled,
    /// The create call failed; recorded, loop continued
    Failed { error: String },
}

impl std::fmt::Display for AssignmentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentOutcome::Assigned => write!(f, "assigned"),
            AssignmentOutcome::AlreadyAssigned => write!(f, "already assigned"),
            AssignmentOutcome::Skipped { reason } => write!(f, "skipped ({})", reason),
            AssignmentOutcome::Disabled => write!(f, "disabled"),
            AssignmentOutcome::Failed { error } => write!(f, "FAILED: {}", error),
        }
    }
}

/// One subscription's outcome, with enough identity to render a row
#[derive(Debug, Clone, Serialize)]
pub struct ScopeResult {
    pub subscription_id: Uuid,
    pub display_name: String,
    #[serde(flatten)]
    pub outcome: AssignmentOutcome,
}

/// Ensure `principal` holds Owner on one subscription.
///
/// State gate, then idempotency check, then create. Every error from the
/// control plane is converted into an outcome here; this function does
/// not fail.
pub async fn ensure_role_assignment(
    api: &dyn ArmApi,
    principal: &Principal,
    subscription: &Subscription,
) -> AssignmentOutcome {
    match &subscription.state {
        SubscriptionState::Active => {}
        SubscriptionState::Disabled => return AssignmentOutcome::Disabled,
        SubscriptionState::Other(state) => {
            return AssignmentOutcome::Skipped {
                reason: format!("subscription state is {}", state),
            };
        }
    }

    let scope = subscription.scope();

    match api
        .find_role_assignment(principal.object_id, &scope, ROLE_NAME)
        .await
    {
        Ok(Some(_)) => return AssignmentOutcome::AlreadyAssigned,
        Ok(None) => {}
        Err(e) => {
            return AssignmentOutcome::Failed {
                error: format!("checking existing assignment: {}", e),
            };
        }
    }

    match api
        .create_role_assignment(principal.object_id, ROLE_NAME, &scope, PrincipalType::Group)
        .await
    {
        Ok(_) => AssignmentOutcome::Assigned,
        // Raced with a concurrent grant between check and create
        Err(ArmError::AssignmentExists { .. }) => AssignmentOutcome::AlreadyAssigned,
        Err(e) => AssignmentOutcome::Failed {
            error: e.to_string(),
        },
    }
}

/// Run the apply loop over every resolved subscription, in order
pub async fn apply_assignments(
    api: &dyn ArmApi,
    principal: &Principal,
    subscriptions: &[Subscription],
) -> Vec<ScopeResult> {
    let mut results = Vec::with_capacity(subscriptions.len());
    for subscription in subscriptions {
        let outcome = ensure_role_assignment(api, principal, subscription).await;
        tracing::debug!(
            subscription = %subscription.id,
            outcome = %outcome,
            "processed subscription"
        );
        results.push(ScopeResult {
            subscription_id: subscription.id,
            display_name: subscription.display_name.clone(),
            outcome,
        });
    }
    results
}
