// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Apply-loop tests against an in-memory fake control plane.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use uuid::{Uuid, uuid};

use arm_client::{
    ArmApi, ArmError, PrincipalType, RoleAssignment, RoleAssignmentProperties, Subscription,
    SubscriptionState,
};
use aobo_assign::{
    AssignmentOutcome, Region, apply_assignments, ensure_role_assignment,
    resolve::resolve_subscriptions,
};

const SUB_A: Uuid = uuid!("11111111-1111-1111-1111-111111111111");
const SUB_B: Uuid = uuid!("22222222-2222-2222-2222-222222222222");
const SUB_C: Uuid = uuid!("33333333-3333-3333-3333-333333333333");

fn subscription(id: Uuid, name: &str, state: SubscriptionState) -> Subscription {
    Subscription {
        id,
        display_name: name.to_string(),
        state,
    }
}

fn assignment(principal_id: Uuid, scope: &str) -> RoleAssignment {
    RoleAssignment {
        id: format!(
            "{}/providers/Microsoft.Authorization/roleAssignments/{}",
            scope,
            Uuid::new_v4()
        ),
        name: Uuid::new_v4().to_string(),
        properties: RoleAssignmentProperties {
            role_definition_id: format!(
                "{}/providers/Microsoft.Authorization/roleDefinitions/8e3af657-a8ff-443c-a75c-2fe8c4bcb635",
                scope
            ),
            principal_id,
            principal_type: Some(PrincipalType::Group),
            scope: Some(scope.to_string()),
        },
    }
}

/// In-memory stand-in for ARM. Owner grants live in `owners`, keyed by
/// subscription id; create calls are recorded for call-count assertions.
struct FakeArm {
    subscriptions: Vec<Subscription>,
    owners: Mutex<HashSet<Uuid>>,
    create_calls: Mutex<Vec<Uuid>>,
    fail_create_for: HashSet<Uuid>,
}

impl FakeArm {
    fn new(subscriptions: Vec<Subscription>) -> Self {
        Self {
            subscriptions,
            owners: Mutex::new(HashSet::new()),
            create_calls: Mutex::new(Vec::new()),
            fail_create_for: HashSet::new(),
        }
    }

    fn with_existing_owner(self, id: Uuid) -> Self {
        self.owners.lock().unwrap().insert(id);
        self
    }

    fn failing_create_for(mut self, id: Uuid) -> Self {
        self.fail_create_for.insert(id);
        self
    }

    fn create_call_count(&self) -> usize {
        self.create_calls.lock().unwrap().len()
    }
}

fn scope_subscription_id(scope: &str) -> Uuid {
    scope
        .strip_prefix("/subscriptions/")
        .and_then(|raw| Uuid::try_parse(raw).ok())
        .unwrap()
}

#[async_trait]
impl ArmApi for FakeArm {
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ArmError> {
        Ok(self.subscriptions.clone())
    }

    async fn get_subscription(&self, id: Uuid) -> Result<Option<Subscription>, ArmError> {
        Ok(self.subscriptions.iter().find(|s| s.id == id).cloned())
    }

    async fn find_role_assignment(
        &self,
        principal_id: Uuid,
        scope: &str,
        _role_name: &str,
    ) -> Result<Option<RoleAssignment>, ArmError> {
        let id = scope_subscription_id(scope);
        if self.owners.lock().unwrap().contains(&id) {
            Ok(Some(assignment(principal_id, scope)))
        } else {
            Ok(None)
        }
    }

    async fn create_role_assignment(
        &self,
        principal_id: Uuid,
        _role_name: &str,
        scope: &str,
        _principal_type: PrincipalType,
    ) -> Result<RoleAssignment, ArmError> {
        let id = scope_subscription_id(scope);
        self.create_calls.lock().unwrap().push(id);
        if self.fail_create_for.contains(&id) {
            return Err(ArmError::Api {
                status: 403,
                code: "AuthorizationFailed".to_string(),
                message: "does not have authorization".to_string(),
            });
        }
        self.owners.lock().unwrap().insert(id);
        Ok(assignment(principal_id, scope))
    }
}

#[tokio::test]
async fn assigns_active_subscriptions() {
    let arm = FakeArm::new(vec![
        subscription(SUB_A, "Customer A", SubscriptionState::Active),
        subscription(SUB_B, "Customer B", SubscriptionState::Active),
    ]);
    let principal = Region::Au.principal();

    let results = apply_assignments(&arm, &principal, &arm.subscriptions).await;

    assert_eq!(results.len(), 2);
    assert!(
        results
            .iter()
            .all(|r| r.outcome == AssignmentOutcome::Assigned)
    );
    assert_eq!(arm.create_call_count(), 2);
}

#[tokio::test]
async fn disabled_subscription_never_reaches_create() {
    let arm = FakeArm::new(vec![
        subscription(SUB_A, "Customer A", SubscriptionState::Disabled),
        subscription(SUB_B, "Customer B", SubscriptionState::Active),
    ]);
    let principal = Region::Au.principal();

    let results = apply_assignments(&arm, &principal, &arm.subscriptions).await;

    assert_eq!(results[0].outcome, AssignmentOutcome::Disabled);
    assert_eq!(results[1].outcome, AssignmentOutcome::Assigned);
    // Only the active subscription was written to
    assert_eq!(arm.create_call_count(), 1);
}

#[tokio::test]
async fn unknown_state_is_skipped_with_reason() {
    let arm = FakeArm::new(vec![subscription(
        SUB_A,
        "Customer A",
        SubscriptionState::Other("Warned".to_string()),
    )]);
    let principal = Region::Au.principal();

    let outcome = ensure_role_assignment(&arm, &principal, &arm.subscriptions[0]).await;

    assert_eq!(
        outcome,
        AssignmentOutcome::Skipped {
            reason: "subscription state is Warned".to_string()
        }
    );
    assert_eq!(arm.create_call_count(), 0);
}

#[tokio::test]
async fn existing_assignment_short_circuits() {
    let arm = FakeArm::new(vec![subscription(
        SUB_A,
        "Customer A",
        SubscriptionState::Active,
    )])
    .with_existing_owner(SUB_A);
    let principal = Region::Au.principal();

    let outcome = ensure_role_assignment(&arm, &principal, &arm.subscriptions[0]).await;

    assert_eq!(outcome, AssignmentOutcome::AlreadyAssigned);
    assert_eq!(arm.create_call_count(), 0);
}

#[tokio::test]
async fn one_failure_does_not_block_subsequent_scopes() {
    let arm = FakeArm::new(vec![
        subscription(SUB_A, "Customer A", SubscriptionState::Active),
        subscription(SUB_B, "Customer B", SubscriptionState::Active),
        subscription(SUB_C, "Customer C", SubscriptionState::Active),
    ])
    .failing_create_for(SUB_A);
    let principal = Region::Au.principal();

    let results = apply_assignments(&arm, &principal, &arm.subscriptions).await;

    assert!(matches!(
        results[0].outcome,
        AssignmentOutcome::Failed { .. }
    ));
    assert_eq!(results[1].outcome, AssignmentOutcome::Assigned);
    assert_eq!(results[2].outcome, AssignmentOutcome::Assigned);
}

#[tokio::test]
async fn second_run_is_idempotent() {
    let arm = FakeArm::new(vec![
        subscription(SUB_A, "Customer A", SubscriptionState::Active),
        subscription(SUB_B, "Customer B", SubscriptionState::Active),
    ]);
    let principal = Region::Au.principal();

    let first = apply_assignments(&arm, &principal, &arm.subscriptions).await;
    assert!(
        first
            .iter()
            .all(|r| r.outcome == AssignmentOutcome::Assigned)
    );

    let second = apply_assignments(&arm, &principal, &arm.subscriptions).await;
    assert!(
        second
            .iter()
            .all(|r| r.outcome == AssignmentOutcome::AlreadyAssigned)
    );
    // No additional writes on the second pass
    assert_eq!(arm.create_call_count(), 2);
}

#[tokio::test]
async fn create_conflict_counts_as_already_assigned() {
    struct ConflictingArm;

    #[async_trait]
    impl ArmApi for ConflictingArm {
        async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ArmError> {
            Ok(vec![])
        }
        async fn get_subscription(&self, _id: Uuid) -> Result<Option<Subscription>, ArmError> {
            Ok(None)
        }
        async fn find_role_assignment(
            &self,
            _principal_id: Uuid,
            _scope: &str,
            _role_name: &str,
        ) -> Result<Option<RoleAssignment>, ArmError> {
            // Nothing found, but a concurrent grant lands before ours
            Ok(None)
        }
        async fn create_role_assignment(
            &self,
            _principal_id: Uuid,
            _role_name: &str,
            scope: &str,
            _principal_type: PrincipalType,
        ) -> Result<RoleAssignment, ArmError> {
            Err(ArmError::AssignmentExists {
                scope: scope.to_string(),
            })
        }
    }

    let principal = Region::Au.principal();
    let sub = subscription(SUB_A, "Customer A", SubscriptionState::Active);

    let outcome = ensure_role_assignment(&ConflictingArm, &principal, &sub).await;
    assert_eq!(outcome, AssignmentOutcome::AlreadyAssigned);
}

#[tokio::test]
async fn resolution_drops_unknown_ids() {
    let arm = FakeArm::new(vec![subscription(
        SUB_A,
        "Customer A",
        SubscriptionState::Active,
    )]);

    let resolved = resolve_subscriptions(&arm, &[SUB_A, SUB_B]).await;

    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, SUB_A);
}
