//! modup - Interactive Go module upgrader CLI
//!
//! Workflow: list outdated modules via `go list`, classify each upgrade by
//! semver severity, resolve a changelog link per module, let the operator
//! pick the upgrades to apply, then run `go get` for each selection.

use clap::Parser;
use modup::changelog::{ChangelogResolver, GithubSearchClient};
use modup::cli::CliArgs;
use modup::error::ChangelogError;
use modup::executor::SystemExecutor;
use modup::listing::{Lister, ListingParser};
use modup::output::{write_table, OutputConfig};
use modup::progress::Progress;
use modup::prompt::{InteractivePrompter, Prompter};
use modup::upgrade::Upgrader;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Short table note for a failed changelog lookup
fn resolution_note(error: &ChangelogError) -> &'static str {
    match error {
        ChangelogError::UnresolvableIdentity { .. } => "no github repository",
        ChangelogError::Transport { .. } => "lookup failed",
        ChangelogError::NotFound { .. } => "no changelog found",
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("modup v{}", env!("CARGO_PKG_VERSION"));
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let output_config = OutputConfig::from_cli(args.no_color);
    let mut progress = Progress::new(!args.quiet);

    // Discover and classify outdated modules
    let mut lister = Lister::new(SystemExecutor::new()).with_go_bin(args.go_bin.as_str());
    if let Some(pattern) = &args.module_pattern {
        lister = lister.with_parser(ListingParser::with_pattern(pattern)?);
    }

    progress.spinner("Listing modules...");
    let listing_result = lister.list_updates();
    progress.finish();
    let modules = listing_result?;

    if modules.is_empty() {
        if !args.quiet {
            println!("All modules are up to date.");
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Resolve changelogs sequentially, in listing order. Failures here never
    // abort the run; the table shows a note instead of a link.
    let client = GithubSearchClient::with_timeout(args.search_timeout())?;
    let resolver = ChangelogResolver::new(client);

    progress.start(modules.len() as u64, "Resolving changelogs");
    let mut changelogs: Vec<Result<String, String>> = Vec::with_capacity(modules.len());
    let mut resolution_failures = 0usize;
    for module in &modules {
        match resolver.resolve(module).await {
            Ok(url) => changelogs.push(Ok(url)),
            Err(e) => {
                if args.verbose {
                    eprintln!("changelog lookup for {}: {}", module.name, e);
                }
                resolution_failures += 1;
                changelogs.push(Err(resolution_note(&e).to_string()));
            }
        }
        progress.inc();
    }
    progress.finish();

    let mut stdout = io::stdout().lock();
    write_table(&mut stdout, &modules, &changelogs, &output_config)?;
    stdout.flush()?;
    drop(stdout);

    // Select which upgrades to apply
    let chosen_indices: Vec<usize> = if args.all {
        (0..modules.len()).collect()
    } else {
        InteractivePrompter::new(output_config).select(&modules)?
    };

    if chosen_indices.is_empty() {
        if !args.quiet {
            println!("Nothing to upgrade.");
        }
        return Ok(exit_code_for(resolution_failures));
    }

    let selected: Vec<_> = chosen_indices
        .into_iter()
        .map(|index| modules[index].clone())
        .collect();

    // Apply the upgrades, in selection order
    let upgrader = Upgrader::new(SystemExecutor::new()).with_go_bin(args.go_bin.as_str());

    if args.dry_run {
        for module in &selected {
            println!("would run: {}", upgrader.command_for(module));
        }
        return Ok(exit_code_for(resolution_failures));
    }

    upgrader.upgrade_all(&selected, |module| {
        if args.verbose {
            eprintln!("ran: {}", upgrader.command_for(module));
        }
        if !args.quiet {
            println!("upgraded {} to {}", module.name, module.to);
        }
    })?;

    Ok(exit_code_for(resolution_failures))
}

/// Exit 0 on a clean run, 2 when some changelog lookups failed
fn exit_code_for(resolution_failures: usize) -> ExitCode {
    if resolution_failures > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
