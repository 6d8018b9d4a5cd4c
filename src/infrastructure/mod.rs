pub mod translator;

pub use translator::ChatCompletionTranslator;
