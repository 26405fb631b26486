// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! aobo - grant regional AOBO Owner access across Azure subscriptions
//!
//! Resolves a target set of subscriptions (from a file or from the full
//! accessible set), selects the regional security group, and idempotently
//! ensures an Owner role assignment on each one. Exit status is 0 only if
//! the run completed with zero failed assignments.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;

use aobo_assign::{Region, Report, SetupError, apply_assignments, input, resolve};
use arm_client::{ArmApi, ArmClient, Subscription, TokenSource};

mod output;

#[derive(Parser)]
#[command(
    name = "aobo",
    version,
    about = "Grant regional AOBO Owner access across Azure subscriptions",
    long_about = "Grants a regional delegated-administration security group Owner access \
                  to a set of Azure subscriptions, idempotently and one at a time."
)]
struct Cli {
    /// Subscription list file (.txt, one id per line, or .csv with an id column).
    /// Without this, every accessible subscription is targeted.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Region whose security group receives Owner (prompted if omitted)
    #[arg(short, long, env = "AOBO_REGION")]
    region: Option<Region>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y', visible_alias = "yes")]
    force: bool,

    /// Show the target set without making changes
    #[arg(long, short = 'n')]
    dry_run: bool,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// ARM endpoint override
    #[arg(long, env = "ARM_URL", default_value = arm_client::DEFAULT_ARM_URL)]
    url: String,

    /// Bearer token (default: ARM_ACCESS_TOKEN, then the Azure CLI session)
    #[arg(long, env = arm_client::TOKEN_ENV_VAR, hide_env_values = true)]
    token: Option<String>,
}

impl Cli {
    fn token_source(&self) -> TokenSource {
        match &self.token {
            Some(token) => TokenSource::Static(token.clone()),
            None => TokenSource::Ambient,
        }
    }

    /// Region from the flag, or an interactive pick when on a terminal
    fn resolve_region(&self) -> Result<Region> {
        if let Some(region) = self.region {
            return Ok(region);
        }
        if !std::io::stdin().is_terminal() {
            bail!("no region given; pass --region (AU, NZ, HK, SG)");
        }
        let labels: Vec<String> = Region::ALL
            .iter()
            .map(|r| format!("{} - {}", r.code(), r.principal().description))
            .collect();
        let picked = dialoguer::Select::new()
            .with_prompt("Region to grant Owner for")
            .items(&labels)
            .default(0)
            .interact()
            .context("region selection failed")?;
        Ok(Region::ALL[picked])
    }
}

/// Resolve the target subscription set.
///
/// File-sourced ids are shape-checked before the client is even built, so
/// bad input fails fast without touching the control plane; resolution
/// against ARM then drops anything unknown. An empty file-sourced set is
/// fatal. Without a file, the full accessible set is used as-is.
async fn resolve_targets(
    api: &dyn ArmApi,
    file_ids: Option<Vec<uuid::Uuid>>,
) -> Result<Vec<Subscription>> {
    match file_ids {
        Some(ids) => {
            let resolved = resolve::resolve_subscriptions(api, &ids).await;
            if resolved.is_empty() {
                return Err(SetupError::NoValidInput.into());
            }
            Ok(resolved)
        }
        None => {
            let all = api
                .list_subscriptions()
                .await
                .context("listing accessible subscriptions")?;
            if all.is_empty() {
                bail!("the current credential cannot see any subscriptions");
            }
            Ok(all)
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    // Parse and shape-check the input file before prompting or
    // authenticating; malformed input should fail immediately.
    let file_ids = match &cli.file {
        Some(path) => {
            let candidates = input::extract_candidates(path)?;
            let ids = input::validate_candidates(&candidates);
            if ids.is_empty() {
                return Err(SetupError::NoValidInput.into());
            }
            Some(ids)
        }
        None => None,
    };

    let region = cli.resolve_region()?;
    let principal = region.principal();

    let client = ArmClient::with_base_url(&cli.url, cli.token_source())
        .await
        .context("authenticating to ARM")?;

    let targets = resolve_targets(&client, file_ids).await?;

    if !cli.json {
        println!(
            "Granting Owner to {} ({}) on {} subscription(s):",
            principal.description,
            principal.object_id,
            targets.len()
        );
        output::print_targets(&targets);
        println!();
    }

    if cli.dry_run {
        if cli.json {
            output::print_json(&serde_json::json!({
                "dry_run": true,
                "region": region,
                "principal": principal,
                "targets": targets,
            }))?;
        } else {
            println!("[dry-run] no changes made.");
        }
        return Ok(true);
    }

    if !cli.force {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Assign Owner on {} subscription(s)?",
                targets.len()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(true);
        }
    }

    let results = apply_assignments(&client, &principal, &targets).await;
    let report = Report::from_results(region, &results);

    if cli.json {
        output::print_json(&serde_json::json!({
            "results": results,
            "summary": report,
        }))?;
    } else {
        output::print_results(&results, &report);
    }

    Ok(!report.has_failures())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Dropped-identifier warnings from the input stage must be visible on
    // a default run; --verbose adds the debug-level call tracing.
    let filter = if cli.verbose {
        "aobo=debug,aobo_assign=debug,arm_client=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        // Per-scope failures: the summary was printed, all scopes were
        // attempted, but the run as a whole did not fully succeed.
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("aobo: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
