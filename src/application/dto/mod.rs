// src/application/dto/mod.rs
// Data transfer objects returned by the application layer

pub mod parser;

use serde::Serialize;

use crate::domain::model::{CompiledSignal, StrategySettingsIr};
use crate::domain::service::ValidationError;

/// Result of one build attempt. Every path through the pipeline ends in one of
/// these; nothing is raised to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Status")]
pub enum BuildOutcome {
    /// The translator needs more information from the user.
    NeedsClarification {
        #[serde(rename = "Question")]
        question: String,
    },
    ValidationFailed {
        #[serde(rename = "Errors")]
        errors: Vec<ValidationError>,
    },
    Compiled {
        #[serde(rename = "EntrySignals")]
        entry_signals: Vec<CompiledSignal>,
        #[serde(rename = "ExitSignals")]
        exit_signals: Vec<CompiledSignal>,
        #[serde(rename = "Settings")]
        settings: Option<StrategySettingsIr>,
    },
    Failed {
        #[serde(rename = "Message")]
        message: String,
    },
}

impl BuildOutcome {
    pub fn is_compiled(&self) -> bool {
        matches!(self, BuildOutcome::Compiled { .. })
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            BuildOutcome::NeedsClarification { .. } => "needs clarification",
            BuildOutcome::ValidationFailed { .. } => "validation failed",
            BuildOutcome::Compiled { .. } => "compiled",
            BuildOutcome::Failed { .. } => "failed",
        }
    }
}
