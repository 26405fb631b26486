// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Aggregate run report: a pure fold over the per-scope outcomes.

use serde::Serialize;

use crate::assign::{AssignmentOutcome, ScopeResult};
use crate::region::{Principal, Region};

/// Outcome tallies for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub region: Region,
    pub principal: Principal,
    pub total: usize,
    pub assigned: usize,
    pub already_assigned: usize,
    pub skipped: usize,
    pub disabled: usize,
    pub failed: usize,
}

impl Report {
    /// Fold the outcome sequence into tallies
    pub fn from_results(region: Region, results: &[ScopeResult]) -> Self {
        let mut report = Report {
            region,
            principal: region.principal(),
            total: results.len(),
            assigned: 0,
            already_assigned: 0,
            skipped: 0,
            disabled: 0,
            failed: 0,
        };
        for result in results {
            match &result.outcome {
                AssignmentOutcome::Assigned => report.assigned += 1,
                AssignmentOutcome::AlreadyAssigned => report.already_assigned += 1,
                AssignmentOutcome::Skipped { .. } => report.skipped += 1,
                AssignmentOutcome::Disabled => report.disabled += 1,
                AssignmentOutcome::Failed { .. } => report.failed += 1,
            }
        }
        report
    }

    /// True when at least one create call failed.
    ///
    /// Exit-code policy: a run that reaches the apply loop exits non-zero
    /// iff this returns true. Skips and disabled subscriptions are normal
    /// outcomes, not failures.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
