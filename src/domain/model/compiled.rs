// src/domain/model/compiled.rs
//! Compiled signal tree handed to the downstream execution system.
//!
//! Field names and numeric encodings are an external contract; the serde
//! renames below are the wire format and must not drift.

use serde::Serialize;

/// Instrument placeholder attached to every compiled node.
pub const DEFAULT_SYMBOL: &str = "SPY";
/// Timeframe placeholder (minutes per bar) attached to every compiled node.
pub const DEFAULT_TIMEFRAME: u32 = 1440;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledSignal {
    #[serde(rename = "$type")]
    pub type_tag: String,
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Type")]
    pub type_code: u8,
    #[serde(rename = "Args", skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<CompiledArg>>,
    #[serde(rename = "Children", skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CompiledSignal>>,
    #[serde(flatten)]
    pub logic: Option<LogicFields>,
    #[serde(rename = "MktN")]
    pub market_count: u32,
    #[serde(rename = "Rqd")]
    pub required: bool,
    #[serde(rename = "SymbolId")]
    pub symbol_id: SymbolRef,
}

/// Argument record. The four value fields are identical at compile time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledArg {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Base")]
    pub base: f64,
    #[serde(rename = "BaseValue")]
    pub base_value: f64,
    #[serde(rename = "Last")]
    pub last: f64,
    #[serde(rename = "Min")]
    pub min: f64,
    #[serde(rename = "Max")]
    pub max: f64,
    #[serde(rename = "Step")]
    pub step: f64,
    // reserved, always 0
    #[serde(rename = "Kind")]
    pub kind: u8,
    #[serde(rename = "ValueKind")]
    pub value_kind: u8,
}

impl CompiledArg {
    pub fn new(key: &str, value: f64, min: f64, max: f64) -> Self {
        Self {
            key: key.to_string(),
            value,
            base: value,
            base_value: value,
            last: value,
            min,
            max,
            step: 0.0,
            kind: 0,
            value_kind: 0,
        }
    }
}

/// Operator and mode fields carried only by parametric/logic nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicFields {
    #[serde(rename = "R1Md")]
    pub rule1_mode: u8,
    #[serde(rename = "R1Op")]
    pub rule1_operation: Option<String>,
    #[serde(rename = "CrOp")]
    pub cross_op: u8,
    #[serde(rename = "R2Md")]
    pub rule2_mode: u8,
    #[serde(rename = "R2Op")]
    pub rule2_operation: Option<String>,
    #[serde(rename = "Entry")]
    pub entry: bool,
    #[serde(rename = "Exit")]
    pub exit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolRef {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Timeframe")]
    pub timeframe: u32,
}

impl Default for SymbolRef {
    fn default() -> Self {
        Self {
            name: DEFAULT_SYMBOL.to_string(),
            timeframe: DEFAULT_TIMEFRAME,
        }
    }
}
