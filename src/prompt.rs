//! Interactive upgrade selection
//!
//! Thin adapter over `inquire::MultiSelect`. The prompt takes its color
//! behavior from the explicit `OutputConfig` rather than any process-wide
//! state, and is hidden behind the `Prompter` trait so the run loop can be
//! driven by a scripted double in tests.

use crate::domain::ModuleUpdate;
use crate::error::AppError;
use crate::output::{module_label, OutputConfig};
use inquire::ui::RenderConfig;
use inquire::{InquireError, MultiSelect};

/// Asks the operator which modules to upgrade
pub trait Prompter {
    /// Returns the indices of the chosen modules, in selection order
    fn select(&self, modules: &[ModuleUpdate]) -> Result<Vec<usize>, AppError>;
}

/// Terminal prompter backed by inquire
pub struct InteractivePrompter {
    config: OutputConfig,
}

impl InteractivePrompter {
    /// Creates a prompter with the given presentation config
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }
}

impl Prompter for InteractivePrompter {
    fn select(&self, modules: &[ModuleUpdate]) -> Result<Vec<usize>, AppError> {
        let options: Vec<String> = modules
            .iter()
            .map(|module| module_label(module, &self.config))
            .collect();

        let render_config = if self.config.color {
            RenderConfig::default_colored()
        } else {
            RenderConfig::empty()
        };

        let selection = MultiSelect::new("Which modules do you want to upgrade?", options)
            .with_render_config(render_config)
            .raw_prompt();

        match selection {
            Ok(chosen) => Ok(chosen.into_iter().map(|option| option.index).collect()),
            // Abandoning the prompt means "upgrade nothing", not a failure
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                Ok(Vec::new())
            }
            Err(e) => Err(AppError::Prompt {
                message: e.to_string(),
            }),
        }
    }
}
