// src/domain/model/mod.rs
// Strategy intermediate representation (IR)

pub mod compiled;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use compiled::{CompiledArg, CompiledSignal, LogicFields, SymbolRef};

/// The only IR version the validator accepts.
pub const SUPPORTED_IR_VERSION: &str = "1.0";

/// Versioned root of a translated strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IntermediateRepresentation {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub strategy: Option<StrategyIr>,
}

impl IntermediateRepresentation {
    pub fn new(strategy: StrategyIr) -> Self {
        Self {
            version: SUPPORTED_IR_VERSION.to_string(),
            strategy: Some(strategy),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StrategyIr {
    #[serde(default)]
    pub entry_signals: Vec<SignalNodeIr>,
    #[serde(default)]
    pub exit_signals: Vec<SignalNodeIr>,
    #[serde(default)]
    pub settings: Option<StrategySettingsIr>,
    /// A question for the user; when set the strategy is incomplete.
    #[serde(default)]
    pub clarification_request: Option<String>,
}

impl StrategyIr {
    /// The clarification text, if the translator asked for one.
    pub fn clarification(&self) -> Option<&str> {
        self.clarification_request
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// One node of a signal tree. Children bind positionally to the catalog's
/// child slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignalNodeIr {
    #[serde(default)]
    pub catalog_id: String,
    #[serde(default)]
    pub args: BTreeMap<String, ArgValue>,
    #[serde(default)]
    pub children: Vec<SignalNodeIr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule1_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule1_operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_op: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule2_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule2_operation: Option<String>,
}

impl SignalNodeIr {
    pub fn new(catalog_id: &str) -> Self {
        Self {
            catalog_id: catalog_id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_arg(mut self, key: &str, value: impl Into<ArgValue>) -> Self {
        self.args.insert(key.to_string(), value.into());
        self
    }

    pub fn with_child(mut self, child: SignalNodeIr) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_rule1(mut self, mode: &str, operation: &str) -> Self {
        self.rule1_mode = Some(mode.to_string());
        self.rule1_operation = Some(operation.to_string());
        self
    }

    pub fn with_rule2(mut self, mode: &str, operation: &str) -> Self {
        self.rule2_mode = Some(mode.to_string());
        self.rule2_operation = Some(operation.to_string());
        self
    }

    pub fn with_cross_op(mut self, cross_op: &str) -> Self {
        self.cross_op = Some(cross_op.to_string());
        self
    }
}

/// Pass-through strategy settings. Not interpreted by validation or compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StrategySettingsIr {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Fraction of equity per position
    #[serde(default)]
    pub position_size: Option<f64>,
    #[serde(default)]
    pub max_positions: Option<u32>,
    /// Maximum holding period in bars
    #[serde(default)]
    pub max_hold_bars: Option<u32>,
    #[serde(default)]
    pub entry_execution: Option<String>,
    #[serde(default)]
    pub exit_execution: Option<String>,
}

/// Scalar argument value as it appears in the IR.
///
/// Type checking happens in the validator; the IR accepts any scalar so a bad
/// type is reported as a validation error instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl ArgValue {
    /// Numeric value for integers and floats; `None` for everything else.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Integer(value) => Some(*value as f64),
            ArgValue::Float(value) => Some(*value),
            ArgValue::Bool(_) | ArgValue::Text(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        self.as_f64().is_some()
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgValue::Integer(value) => write!(f, "{}", value),
            ArgValue::Float(value) => write!(f, "{}", value),
            ArgValue::Bool(value) => write!(f, "{}", value),
            ArgValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Integer(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Integer(value.into())
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}
