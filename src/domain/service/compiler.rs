// src/domain/service/compiler.rs
// IR-to-signal compilation

use std::sync::Arc;

use crate::domain::catalog::{Catalog, SignalCapability, PARAMETRIC_ENCODING};
use crate::domain::errors::{CompileError, CompileResult};
use crate::domain::model::{CompiledArg, CompiledSignal, LogicFields, SignalNodeIr, SymbolRef};

/// Fallback bounds for argument records whose definition declares none.
const DEFAULT_ARG_MIN: f64 = 0.0;
const DEFAULT_ARG_MAX: f64 = 1_000_000.0;

/// Type code for any encoding missing from `TYPE_CODES`.
const DEFAULT_TYPE_CODE: u8 = 2;

const TYPE_CODES: &[(&str, u8)] = &[
    ("RawDataSignal", 2),
    ("SmaSignal", 2),
    ("EmaSignal", 2),
    ("RsiSignal", 2),
    ("RocSignal", 2),
    ("HighestSignal", 2),
    ("LowestSignal", 2),
    ("StdDevSignal", 2),
    ("LagSignal", 2),
    ("CorrelationSignal", 2),
    (PARAMETRIC_ENCODING, 7),
];

/// Arguments that contribute to a node's generated key.
const KEY_ARGS: &[&str] = &["Depth", "Length"];

/// Turns validated IR nodes into the downstream signal format.
///
/// Input is expected to have passed `IrValidator`; the only check performed
/// here is capability resolution.
pub struct SignalCompiler {
    catalog: Arc<Catalog>,
}

impl SignalCompiler {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn compile(&self, nodes: &[SignalNodeIr]) -> CompileResult<Vec<CompiledSignal>> {
        nodes.iter().map(|node| self.compile_node(node)).collect()
    }

    fn compile_node(&self, node: &SignalNodeIr) -> CompileResult<CompiledSignal> {
        let capability = self
            .catalog
            .lookup(&node.catalog_id)
            .ok_or_else(|| CompileError::UnknownCapability(node.catalog_id.clone()))?;

        let mut signal = CompiledSignal {
            type_tag: capability.encoding.to_string(),
            key: signal_key(capability, node),
            type_code: type_code(capability.encoding),
            args: None,
            children: None,
            logic: None,
            market_count: 1,
            required: false,
            symbol_id: SymbolRef::default(),
        };

        if !capability.args.is_empty() {
            signal.args = Some(compile_args(capability, node));
        }

        if !node.children.is_empty() {
            signal.children = Some(self.compile(&node.children)?);
        }

        if capability.is_parametric() {
            signal.logic = Some(LogicFields {
                rule1_mode: encode_mode(node.rule1_mode.as_deref()),
                rule1_operation: node.rule1_operation.clone(),
                cross_op: encode_cross_op(node.cross_op.as_deref()),
                rule2_mode: encode_mode(node.rule2_mode.as_deref()),
                rule2_operation: node.rule2_operation.clone(),
                // Exit-list signals carry the same flags as entry-list ones.
                entry: true,
                exit: false,
            });
        }

        log::debug!("Compiled {} as {}", node.catalog_id, signal.key);
        Ok(signal)
    }
}

pub fn type_code(encoding: &str) -> u8 {
    TYPE_CODES
        .iter()
        .find(|(name, _)| *name == encoding)
        .map(|(_, code)| *code)
        .unwrap_or(DEFAULT_TYPE_CODE)
}

/// Display name followed by the `Depth`/`Length` values the node supplies,
/// in key order, joined with `_`. Not guaranteed unique.
fn signal_key(capability: &SignalCapability, node: &SignalNodeIr) -> String {
    let mut parts = vec![capability.name.to_string()];
    parts.extend(
        node.args
            .iter()
            .filter(|(key, _)| KEY_ARGS.contains(&key.as_str()))
            .map(|(_, value)| value.to_string()),
    );
    parts.join("_")
}

fn compile_args(capability: &SignalCapability, node: &SignalNodeIr) -> Vec<CompiledArg> {
    capability
        .args
        .iter()
        .filter_map(|definition| {
            let value = node.args.get(definition.name)?;
            Some(CompiledArg::new(
                definition.name,
                value.as_f64().unwrap_or_default(),
                definition.min.unwrap_or(DEFAULT_ARG_MIN),
                definition.max.unwrap_or(DEFAULT_ARG_MAX),
            ))
        })
        .collect()
}

fn encode_mode(mode: Option<&str>) -> u8 {
    match mode {
        Some("Signal") => 0,
        _ => 1,
    }
}

fn encode_cross_op(cross_op: Option<&str>) -> u8 {
    match cross_op {
        Some("OFF") => 0,
        Some("AND") => 1,
        Some("OR") => 2,
        Some("XOR") => 3,
        Some("IF") => 4,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::compiled::{DEFAULT_SYMBOL, DEFAULT_TIMEFRAME};
    use proptest::prelude::*;
    use serde_json::json;

    fn compiler() -> SignalCompiler {
        SignalCompiler::new(Arc::new(Catalog::standard()))
    }

    fn close() -> SignalNodeIr {
        SignalNodeIr::new("raw.close")
    }

    fn sma(length: i64) -> SignalNodeIr {
        SignalNodeIr::new("sma").with_arg("Length", length).with_child(close())
    }

    fn compile_one(node: SignalNodeIr) -> CompiledSignal {
        compiler().compile(&[node]).unwrap().remove(0)
    }

    #[test]
    fn raw_field_compiles_to_bare_record() {
        let signal = compile_one(close());

        assert_eq!(signal.type_tag, "RawDataSignal");
        assert_eq!(signal.type_code, 2);
        assert_eq!(signal.key, "Close");
        assert!(signal.args.is_none());
        assert!(signal.children.is_none());
        assert!(signal.logic.is_none());
        assert_eq!(signal.market_count, 1);
        assert!(!signal.required);
        assert_eq!(signal.symbol_id.name, DEFAULT_SYMBOL);
        assert_eq!(signal.symbol_id.timeframe, DEFAULT_TIMEFRAME);
    }

    #[test]
    fn raw_field_wire_shape() {
        let value = serde_json::to_value(compile_one(close())).unwrap();

        assert_eq!(
            value,
            json!({
                "$type": "RawDataSignal",
                "Key": "Close",
                "Type": 2,
                "MktN": 1,
                "Rqd": false,
                "SymbolId": { "Name": "SPY", "Timeframe": 1440 }
            })
        );
    }

    #[test]
    fn indicator_compiles_args_and_children() {
        let signal = compile_one(sma(200));

        assert_eq!(signal.key, "Simple Moving Average_200");
        let args = signal.args.as_ref().unwrap();
        assert_eq!(args.len(), 1);
        let length = &args[0];
        assert_eq!(length.key, "Length");
        assert_eq!(
            (length.value, length.base, length.base_value, length.last),
            (200.0, 200.0, 200.0, 200.0)
        );
        assert_eq!(length.min, 1.0);
        assert_eq!(length.max, 5000.0);
        assert_eq!(length.step, 0.0);
        assert_eq!((length.kind, length.value_kind), (0, 0));

        let children = signal.children.as_ref().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].type_tag, "RawDataSignal");
    }

    #[test]
    fn arg_record_wire_shape() {
        let value = serde_json::to_value(compile_one(sma(20))).unwrap();

        assert_eq!(
            value["Args"][0],
            json!({
                "Key": "Length",
                "Value": 20.0,
                "Base": 20.0,
                "BaseValue": 20.0,
                "Last": 20.0,
                "Min": 1.0,
                "Max": 5000.0,
                "Step": 0.0,
                "Kind": 0,
                "ValueKind": 0
            })
        );
        assert_eq!(value["Children"][0]["Key"], "Close");
    }

    #[test]
    fn key_uses_depth_before_length() {
        let mut node = sma(14);
        node.args.insert("Depth".into(), 3.into());
        node.args.insert("Other".into(), 9.into());

        assert_eq!(compile_one(node).key, "Simple Moving Average_3_14");
    }

    #[test]
    fn key_formats_float_values_without_trailing_zero() {
        let node = SignalNodeIr::new("lag")
            .with_arg("Depth", 2.0)
            .with_child(close());

        assert_eq!(compile_one(node).key, "Lagged Value_2");
    }

    #[test]
    fn absent_optional_args_are_skipped_and_missing_bounds_default() {
        let bare = SignalNodeIr::new("parametric")
            .with_child(close())
            .with_child(close())
            .with_rule1("Signal", ">")
            .with_cross_op("OFF");
        assert_eq!(compile_one(bare).args, Some(Vec::new()));

        let with_value = SignalNodeIr::new("parametric")
            .with_arg("Value", 70)
            .with_child(close())
            .with_child(close())
            .with_rule1("Value", ">")
            .with_cross_op("OFF");
        let args = compile_one(with_value).args.unwrap();

        assert_eq!(args.len(), 1);
        assert_eq!(args[0].key, "Value");
        assert_eq!(args[0].min, DEFAULT_ARG_MIN);
        assert_eq!(args[0].max, DEFAULT_ARG_MAX);
    }

    #[test]
    fn parametric_fields_are_encoded() {
        let node = SignalNodeIr::new("parametric")
            .with_child(sma(50))
            .with_child(sma(200))
            .with_rule1("Signal", "CrossAbove")
            .with_rule2("Value", "<")
            .with_cross_op("XOR");

        let signal = compile_one(node);

        assert_eq!(signal.type_code, 7);
        assert_eq!(
            signal.logic,
            Some(LogicFields {
                rule1_mode: 0,
                rule1_operation: Some("CrossAbove".into()),
                cross_op: 3,
                rule2_mode: 1,
                rule2_operation: Some("<".into()),
                entry: true,
                exit: false,
            })
        );
    }

    #[test]
    fn parametric_wire_shape_keeps_field_order_and_nulls() {
        let node = SignalNodeIr::new("parametric")
            .with_child(close())
            .with_child(close())
            .with_rule1("Signal", ">")
            .with_cross_op("AND");

        let text = serde_json::to_string(&compile_one(node)).unwrap();

        assert!(text.contains(
            r#""R1Md":0,"R1Op":">","CrOp":1,"R2Md":1,"R2Op":null,"Entry":true,"Exit":false,"MktN":1"#
        ));
        assert!(text.starts_with(r#"{"$type":"ParametricSignal","Key":"Parametric Rule","Type":7"#));
    }

    #[test]
    fn cross_op_table() {
        let cases = [
            (Some("OFF"), 0),
            (Some("AND"), 1),
            (Some("OR"), 2),
            (Some("XOR"), 3),
            (Some("IF"), 4),
            (Some("and"), 0),
            (Some("NAND"), 0),
            (None, 0),
        ];
        for (input, expected) in cases {
            assert_eq!(encode_cross_op(input), expected, "{:?}", input);
        }
    }

    #[test]
    fn mode_encoding_treats_everything_but_signal_as_value() {
        assert_eq!(encode_mode(Some("Signal")), 0);
        assert_eq!(encode_mode(Some("Value")), 1);
        assert_eq!(encode_mode(Some("signal")), 1);
        assert_eq!(encode_mode(None), 1);
    }

    #[test]
    fn unknown_encodings_default_to_two() {
        assert_eq!(type_code("ParametricSignal"), 7);
        assert_eq!(type_code("SmaSignal"), 2);
        assert_eq!(type_code("SomethingNew"), 2);
    }

    #[test]
    fn unknown_capability_is_a_hard_failure() {
        let error = compiler()
            .compile(&[sma(10).with_child(SignalNodeIr::new("mystery"))])
            .unwrap_err();

        assert_eq!(error, CompileError::UnknownCapability("mystery".into()));
    }

    #[test]
    fn aliases_compile_to_the_canonical_encoding() {
        let signal = compile_one(SignalNodeIr::new("PRICE"));
        assert_eq!(signal.type_tag, "RawDataSignal");
        assert_eq!(signal.key, "Close");
    }

    fn arb_indicator() -> impl Strategy<Value = SignalNodeIr> {
        let ids = prop_oneof![Just("sma"), Just("ema"), Just("rsi"), Just("roc"), Just("stddev")];
        (ids, 2i64..500).prop_map(|(id, length)| {
            SignalNodeIr::new(id)
                .with_arg("Length", length)
                .with_child(SignalNodeIr::new("raw.close"))
        })
    }

    proptest! {
        #[test]
        fn compilation_is_deterministic(
            left in arb_indicator(),
            right in arb_indicator(),
            op in prop_oneof![Just("AND"), Just("OR"), Just("IF")],
        ) {
            let nodes = vec![SignalNodeIr::new("parametric")
                .with_child(left)
                .with_child(right)
                .with_rule1("Signal", ">")
                .with_cross_op(op)];

            let first = compiler().compile(&nodes).unwrap();
            let second = compiler().compile(&nodes).unwrap();

            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
            prop_assert_eq!(first, second);
        }
    }
}
