// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resolution of validated subscription ids against the control plane.

use arm_client::{ArmApi, Subscription};
use uuid::Uuid;

/// Resolve each id to a live subscription record.
///
/// Ids that do not resolve (not found, inaccessible, or a failed lookup
/// call) are warned about and dropped. This stage never aborts the run;
/// the caller decides what an empty result means.
pub async fn resolve_subscriptions(api: &dyn ArmApi, ids: &[Uuid]) -> Vec<Subscription> {
    let mut resolved = Vec::with_capacity(ids.len());
    for id in ids {
        match api.get_subscription(*id).await {
            Ok(Some(subscription)) => resolved.push(subscription),
            Ok(None) => {
                tracing::warn!("subscription {} not found or not accessible, skipping", id);
            }
            Err(e) => {
                tracing::warn!("failed to look up subscription {}: {}, skipping", id, e);
            }
        }
    }
    resolved
}
