// src/domain/repository/mod.rs
// Interfaces to collaborators outside the domain

use async_trait::async_trait;

use crate::domain::errors::TranslationResult;
use crate::domain::model::IntermediateRepresentation;

/// Natural-language to IR translation, backed by an external completion service.
#[async_trait]
pub trait StrategyTranslator {
    async fn translate(&self, text: &str) -> TranslationResult<IntermediateRepresentation>;
}
