// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Table and JSON output formatting

use comfy_table::{Table, presets::NOTHING};
use serde::Serialize;

use aobo_assign::{Report, ScopeResult};
use arm_client::Subscription;

/// Create a new table with headers
fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(headers);
    table
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print the resolved target set before anything is applied
pub fn print_targets(subscriptions: &[Subscription]) {
    let mut table = create_table(&["SUBSCRIPTION", "NAME", "STATE"]);
    for sub in subscriptions {
        table.add_row(vec![
            &sub.id.to_string(),
            &sub.display_name,
            &sub.state.to_string(),
        ]);
    }
    println!("{table}");
}

/// Print per-subscription outcomes followed by the summary block
pub fn print_results(results: &[ScopeResult], report: &Report) {
    let mut table = create_table(&["SUBSCRIPTION", "NAME", "OUTCOME"]);
    for result in results {
        table.add_row(vec![
            &result.subscription_id.to_string(),
            &result.display_name,
            &result.outcome.to_string(),
        ]);
    }
    println!("{table}");

    println!();
    println!("Summary:");
    println!(
        "  Principal:        {} ({})",
        report.principal.description, report.principal.object_id
    );
    println!("  Subscriptions:    {}", report.total);
    println!("  Assigned:         {}", report.assigned);
    println!("  Already assigned: {}", report.already_assigned);
    if report.skipped > 0 {
        println!("  Skipped:          {}", report.skipped);
    }
    if report.disabled > 0 {
        println!("  Disabled:         {}", report.disabled);
    }
    println!("  Failed:           {}", report.failed);
}
