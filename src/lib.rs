//! modup - Interactive Go module upgrader library
//!
//! This library provides the core functionality for discovering outdated Go
//! modules, classifying each upgrade by semantic-version severity, resolving
//! a best-effort changelog link per module, and applying the upgrades the
//! operator selects.

pub mod changelog;
pub mod cli;
pub mod domain;
pub mod error;
pub mod executor;
pub mod listing;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod upgrade;
