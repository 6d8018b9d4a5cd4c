// src/adapter/coordinator.rs
// Wires configuration, catalog, translator and pipeline together

use std::sync::Arc;

use crate::application::dto::BuildOutcome;
use crate::application::service::{IrPipeline, IrPipelineService};
use crate::application::usecase::{StrategyBuildUseCase, StrategyBuilder};
use crate::config::Config;
use crate::domain::catalog::Catalog;
use crate::domain::errors::AppResult;
use crate::domain::model::IntermediateRepresentation;
use crate::domain::repository::StrategyTranslator;
use crate::infrastructure::translator::ChatCompletionTranslator;

pub struct StrategyCoordinator {
    config: Config,
    catalog: Arc<Catalog>,
    pipeline: Arc<IrPipeline>,
}

impl StrategyCoordinator {
    pub fn new(config: Config) -> Self {
        let catalog = Arc::new(Catalog::standard());
        let pipeline = Arc::new(IrPipeline::new(catalog.clone()));

        Self {
            config,
            catalog,
            pipeline,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Builder backed by the configured completion service.
    pub fn strategy_builder(&self) -> AppResult<StrategyBuilder> {
        let translator =
            ChatCompletionTranslator::new(self.config.translator.clone(), &self.catalog)?;
        Ok(self.strategy_builder_with(Arc::new(translator)))
    }

    pub fn strategy_builder_with(
        &self,
        translator: Arc<dyn StrategyTranslator + Send + Sync>,
    ) -> StrategyBuilder {
        StrategyBuilder::new(translator, self.pipeline.clone())
    }

    /// Full pipeline from natural language. Setup failures are reported as a
    /// `Failed` outcome like any other error.
    pub async fn build(&self, text: &str) -> BuildOutcome {
        match self.strategy_builder() {
            Ok(builder) => builder.build(text).await,
            Err(e) => {
                log::error!("Failed to set up translator: {}", e);
                BuildOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Validate and compile an IR that is already available.
    pub fn check(&self, ir: &IntermediateRepresentation) -> BuildOutcome {
        self.pipeline.process(ir)
    }
}
