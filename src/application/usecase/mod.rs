pub mod strategy_build_usecase;

// Re-export public API
pub use strategy_build_usecase::{StrategyBuildUseCase, StrategyBuilder};
