pub mod catalog;
pub mod errors;
pub mod model;
pub mod repository;
pub mod service;

// Re-export common types for convenience
pub use catalog::{ArgDefinition, ArgKind, Catalog, SignalCapability, SignalCategory};
pub use errors::{AppError, AppResult, CompileError, TranslationError};
pub use model::{
    ArgValue, CompiledSignal, IntermediateRepresentation, SignalNodeIr, StrategyIr,
    StrategySettingsIr, SUPPORTED_IR_VERSION,
};
pub use repository::StrategyTranslator;
pub use service::{IrValidator, SignalCompiler, ValidationError, ValidationResult};
