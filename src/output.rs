//! Human-readable output for classified modules
//!
//! This module provides:
//! - An explicit `OutputConfig` carrying the color/verbosity decisions, so
//!   no presentation state lives in a process-wide switch
//! - Severity-colored labels (major=red, minor=yellow, patch=green)
//! - The module table shown before the selection prompt

use crate::domain::{ModuleUpdate, UpgradeKind};
use colored::Colorize;
use std::io::{self, Write};

/// Presentation configuration, passed explicitly to every rendering function
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Whether to emit ANSI colors
    pub color: bool,
}

impl OutputConfig {
    /// Build the configuration from CLI options
    pub fn from_cli(no_color: bool) -> Self {
        Self { color: !no_color }
    }
}

/// Severity label, colored per the config
pub fn kind_label(kind: UpgradeKind, config: &OutputConfig) -> String {
    if !config.color {
        return kind.label().to_string();
    }
    match kind {
        UpgradeKind::Major => kind.label().red().bold().to_string(),
        UpgradeKind::Minor => kind.label().yellow().to_string(),
        UpgradeKind::Patch => kind.label().green().to_string(),
        UpgradeKind::None => kind.label().dimmed().to_string(),
    }
}

/// One prompt/table line for a module, colored by severity
pub fn module_label(module: &ModuleUpdate, config: &OutputConfig) -> String {
    let text = format!("{} {} -> {}", module.name, module.from, module.to);
    if !config.color {
        return text;
    }
    match module.kind {
        UpgradeKind::Major => text.red().to_string(),
        UpgradeKind::Minor => text.yellow().to_string(),
        UpgradeKind::Patch => text.green().to_string(),
        UpgradeKind::None => text.dimmed().to_string(),
    }
}

/// Writes the module table, one row per module with its changelog outcome.
///
/// `changelogs` is parallel to `modules`; `Err` holds the short note shown
/// in place of a link when resolution failed for that module.
pub fn write_table<W: Write>(
    writer: &mut W,
    modules: &[ModuleUpdate],
    changelogs: &[Result<String, String>],
    config: &OutputConfig,
) -> io::Result<()> {
    if modules.is_empty() {
        writeln!(writer, "All modules are up to date.")?;
        return Ok(());
    }

    let name_width = modules
        .iter()
        .map(|m| m.name.len())
        .max()
        .unwrap_or(0)
        .max("Module".len());

    writeln!(
        writer,
        "{:<name_width$}  {:<10}  {:<10}  {:<6}  Changelog",
        "Module", "Current", "Available", "Kind",
    )?;

    for (module, changelog) in modules.iter().zip(changelogs) {
        let link = match changelog {
            Ok(url) => url.clone(),
            Err(note) => {
                if config.color {
                    format!("- ({})", note).dimmed().to_string()
                } else {
                    format!("- ({})", note)
                }
            }
        };
        // Pad the severity column before coloring so the ANSI escape bytes
        // do not throw off the alignment.
        let padded_kind = format!("{:<6}", module.kind.label());
        let kind_cell = if config.color {
            match module.kind {
                UpgradeKind::Major => padded_kind.red().bold().to_string(),
                UpgradeKind::Minor => padded_kind.yellow().to_string(),
                UpgradeKind::Patch => padded_kind.green().to_string(),
                UpgradeKind::None => padded_kind.dimmed().to_string(),
            }
        } else {
            padded_kind
        };
        writeln!(
            writer,
            "{:<name_width$}  {:<10}  {:<10}  {}  {}",
            module.name,
            module.from.to_string(),
            module.to.to_string(),
            kind_cell,
            link,
        )?;
    }

    Ok(())
}
