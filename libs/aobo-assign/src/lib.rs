// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Batch AOBO role assignment library.
//!
//! Grants a regional foreign security group "Owner" access to a set of
//! subscriptions, on behalf of a service provider (the AOBO delegated
//! administration model). The pipeline is:
//!
//! 1. **Input**: subscription identifiers from a line-delimited or
//!    tabular file ([`input`]), or the full accessible set from the
//!    control plane.
//! 2. **Validation & resolution**: strict UUID shape check, dedup, and
//!    per-identifier lookup against ARM ([`input`], [`resolve`]).
//! 3. **Apply loop**: sequential, idempotent ensure-assignment per
//!    subscription; one failure never blocks the rest ([`assign`]).
//! 4. **Report**: a pure fold over the per-scope outcomes ([`report`]).
//!
//! Nothing in this crate performs interactive I/O; prompting and output
//! formatting belong to the CLI. All control-plane access goes through
//! the [`arm_client::ArmApi`] trait so the loop is testable against an
//! in-memory fake.

pub mod assign;
pub mod error;
pub mod input;
pub mod region;
pub mod report;
pub mod resolve;

pub use assign::{AssignmentOutcome, ScopeResult, apply_assignments, ensure_role_assignment};
pub use error::SetupError;
pub use region::{Principal, Region};
pub use report::Report;

/// The role this tooling hands out. Fixed; AOBO grants are Owner grants.
pub const ROLE_NAME: &str = "Owner";
