// src/application/service/mod.rs
// Application services

use std::sync::Arc;

use crate::application::dto::BuildOutcome;
use crate::domain::catalog::Catalog;
use crate::domain::model::IntermediateRepresentation;
use crate::domain::service::{IrValidator, SignalCompiler};

/// Validation and compilation of an IR already in hand.
pub trait IrPipelineService {
    /// Clarification check, validation, then compilation of both signal lists.
    fn process(&self, ir: &IntermediateRepresentation) -> BuildOutcome;
}

pub struct IrPipeline {
    validator: IrValidator,
    compiler: SignalCompiler,
}

impl IrPipeline {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            validator: IrValidator::new(catalog.clone()),
            compiler: SignalCompiler::new(catalog),
        }
    }
}

impl IrPipelineService for IrPipeline {
    fn process(&self, ir: &IntermediateRepresentation) -> BuildOutcome {
        if let Some(question) = ir.strategy.as_ref().and_then(|s| s.clarification()) {
            log::info!("Translator asked for clarification; skipping validation");
            return BuildOutcome::NeedsClarification {
                question: question.to_string(),
            };
        }

        let report = self.validator.validate(ir);
        if !report.is_valid() {
            log::warn!("IR failed validation:\n{}", report.summary());
            return BuildOutcome::ValidationFailed {
                errors: report.errors,
            };
        }

        let Some(strategy) = &ir.strategy else {
            return BuildOutcome::Failed {
                message: "Strategy is required".to_string(),
            };
        };

        let entry_signals = match self.compiler.compile(&strategy.entry_signals) {
            Ok(signals) => signals,
            Err(e) => {
                log::error!("Failed to compile entry signals: {}", e);
                return BuildOutcome::Failed {
                    message: e.to_string(),
                };
            }
        };
        let exit_signals = match self.compiler.compile(&strategy.exit_signals) {
            Ok(signals) => signals,
            Err(e) => {
                log::error!("Failed to compile exit signals: {}", e);
                return BuildOutcome::Failed {
                    message: e.to_string(),
                };
            }
        };

        log::info!(
            "Compiled {} entry and {} exit signal(s)",
            entry_signals.len(),
            exit_signals.len()
        );

        BuildOutcome::Compiled {
            entry_signals,
            exit_signals,
            settings: strategy.settings.clone(),
        }
    }
}
