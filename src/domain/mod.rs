//! Core domain models for modup
//!
//! This module contains the fundamental types used throughout the application:
//! - Module update records parsed from the Go module listing
//! - Upgrade kind classification by semantic-version severity

mod module;
mod upgrade_kind;

pub use module::ModuleUpdate;
pub use upgrade_kind::UpgradeKind;
