// src/domain/service/mod.rs
// Domain services: IR validation and compilation

pub mod compiler;
pub mod validator;

pub use compiler::SignalCompiler;
pub use validator::{IrValidator, ValidationError, ValidationResult};
