// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Setup-time error taxonomy.
//!
//! Everything here aborts a run before any mutation is attempted.
//! Per-scope problems inside the apply loop are never errors; they are
//! recorded as [`crate::AssignmentOutcome`] values and the loop advances.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems detected before the apply loop starts
#[derive(Error, Debug)]
pub enum SetupError {
    /// The input file could not be read
    #[error("Failed to read input file '{}': {source}", path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file extension is not one of the recognized formats
    #[error(
        "Unsupported input file format '{0}': expected a .txt (one id per line) or .csv file"
    )]
    UnsupportedFormat(String),

    /// A tabular input file has no recognizable subscription-id column
    #[error("No subscription id column found (looked for Id, SubscriptionId, or SubId)")]
    NoIdColumn,

    /// Every extracted identifier was malformed or unresolvable
    #[error("Input file contained no valid, accessible subscription ids")]
    NoValidInput,
}
