// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Subscription-id extraction from operator-supplied files.
//!
//! Two formats are recognized, keyed off the file extension:
//!
//! - `.txt`: one identifier per non-blank line, whitespace-trimmed
//! - `.csv`: a header row is scanned case-insensitively for an id
//!   column (`Id`, `SubscriptionId`, `SubId` and spacing/underscore
//!   variants thereof); values come from that column
//!
//! Extraction returns raw candidate strings; [`validate_candidates`]
//! applies the strict UUID shape check and dedup. Malformed entries are
//! dropped with a warning, never a hard error; a single bad row in a
//! 200-subscription import must not abort the batch.

use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

use crate::error::SetupError;

/// Extract raw candidate identifiers from `path` according to its format
pub fn extract_candidates(path: &Path) -> Result<Vec<String>, SetupError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let content = std::fs::read_to_string(path).map_err(|source| SetupError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;

    match extension.as_str() {
        "txt" => Ok(extract_lines(&content)),
        "csv" => extract_tabular(&content),
        _ => Err(SetupError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}

/// Line-delimited format: every non-blank line is a candidate
fn extract_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tabular format: locate the id column in the header row, then collect
/// that column from every data row
fn extract_tabular(content: &str) -> Result<Vec<String>, SetupError> {
    let mut lines = content.lines();
    let header = lines.next().unwrap_or_default();

    let id_column = split_row(header)
        .iter()
        .position(|cell| is_id_header(cell))
        .ok_or(SetupError::NoIdColumn)?;

    let mut candidates = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let row = split_row(line);
        if let Some(value) = row.get(id_column)
            && !value.is_empty()
        {
            candidates.push(value.clone());
        }
    }
    Ok(candidates)
}

/// Split a CSV row on commas, trimming whitespace and surrounding quotes.
///
/// Deliberately simple: exported subscription lists do not contain
/// embedded commas or escaped quotes.
fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|cell| cell.trim().trim_matches('"').trim().to_string())
        .collect()
}

/// Does this header cell name the subscription-id column?
///
/// Matches `id`, `subid`, and `subscriptionid` case-insensitively, after
/// stripping spaces and underscores ("Subscription Id", "sub_id", ...).
fn is_id_header(cell: &str) -> bool {
    let normalized: String = cell
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();
    matches!(normalized.as_str(), "id" | "subid" | "subscriptionid")
}

/// Parse a subscription id in strict `8-4-4-4-12` hyphenated form.
///
/// `Uuid::parse_str` also accepts braced, simple, and urn forms; imports
/// carrying those almost always indicate a mangled export, so they are
/// rejected here.
pub fn parse_subscription_id(raw: &str) -> Option<Uuid> {
    let bytes = raw.as_bytes();
    if bytes.len() != 36 {
        return None;
    }
    for (i, b) in bytes.iter().enumerate() {
        match i {
            8 | 13 | 18 | 23 => {
                if *b != b'-' {
                    return None;
                }
            }
            _ => {
                if !b.is_ascii_hexdigit() {
                    return None;
                }
            }
        }
    }
    Uuid::try_parse(raw).ok()
}

/// Shape-check and dedup raw candidates, preserving first-seen order.
///
/// Violations are warned about and dropped; this stage never fails the
/// run on an individual identifier.
pub fn validate_candidates(candidates: &[String]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    let mut valid = Vec::new();
    for raw in candidates {
        let trimmed = raw.trim();
        match parse_subscription_id(trimmed) {
            Some(id) => {
                if seen.insert(id) {
                    valid.push(id);
                }
            }
            None => {
                tracing::warn!("ignoring malformed subscription id '{}'", trimmed);
            }
        }
    }
    valid
}
