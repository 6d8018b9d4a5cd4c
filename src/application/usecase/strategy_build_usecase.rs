// src/application/usecase/strategy_build_usecase.rs
// Natural-language strategy build use case

use std::sync::Arc;
use async_trait::async_trait;

use crate::application::dto::BuildOutcome;
use crate::application::service::IrPipelineService;
use crate::domain::model::IntermediateRepresentation;
use crate::domain::repository::StrategyTranslator;

/// Translate, validate and compile a strategy description.
#[async_trait]
pub trait StrategyBuildUseCase {
    async fn build(&self, text: &str) -> BuildOutcome;

    /// Validate and compile an IR that is already in hand.
    fn build_from_ir(&self, ir: &IntermediateRepresentation) -> BuildOutcome;
}

pub struct StrategyBuilder {
    translator: Arc<dyn StrategyTranslator + Send + Sync>,
    pipeline: Arc<dyn IrPipelineService + Send + Sync>,
}

impl StrategyBuilder {
    pub fn new(
        translator: Arc<dyn StrategyTranslator + Send + Sync>,
        pipeline: Arc<dyn IrPipelineService + Send + Sync>,
    ) -> Self {
        Self {
            translator,
            pipeline,
        }
    }
}

#[async_trait]
impl StrategyBuildUseCase for StrategyBuilder {
    async fn build(&self, text: &str) -> BuildOutcome {
        log::info!("Translating strategy description ({} chars)", text.len());

        let ir = match self.translator.translate(text).await {
            Ok(ir) => ir,
            Err(e) => {
                log::error!("Translation failed: {}", e);
                return BuildOutcome::Failed {
                    message: format!("Translation failed: {}", e),
                };
            }
        };

        self.build_from_ir(&ir)
    }

    fn build_from_ir(&self, ir: &IntermediateRepresentation) -> BuildOutcome {
        let outcome = self.pipeline.process(ir);
        log::info!("Strategy build finished: {}", outcome.label());
        outcome
    }
}
