// src/domain/service/validator.rs
// Structural validation of strategy IR against the capability catalog

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::domain::catalog::{ArgKind, Catalog, SignalCapability};
use crate::domain::model::{IntermediateRepresentation, SignalNodeIr, SUPPORTED_IR_VERSION};

/// A single problem found in an IR tree, located by a dotted path such as
/// `EntrySignals[0].Children[1].Args.Length`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValidationError {
    pub message: String,
    pub path: String,
}

impl ValidationError {
    fn new(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every error gathered in one full walk, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// One `<path>: <message>` line per error.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct IrValidator {
    catalog: Arc<Catalog>,
}

impl IrValidator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Check an IR tree. Never fails; every problem becomes a `ValidationError`.
    pub fn validate(&self, ir: &IntermediateRepresentation) -> ValidationResult {
        let mut errors = Vec::new();

        if ir.version != SUPPORTED_IR_VERSION {
            errors.push(ValidationError::new(
                format!(
                    "Unsupported IR version '{}', expected '{}'",
                    ir.version, SUPPORTED_IR_VERSION
                ),
                "Version",
            ));
        }

        let Some(strategy) = &ir.strategy else {
            errors.push(ValidationError::new("Strategy is required", "Strategy"));
            return ValidationResult { errors };
        };

        for (index, node) in strategy.entry_signals.iter().enumerate() {
            self.validate_node(node, &format!("EntrySignals[{}]", index), &mut errors);
        }
        for (index, node) in strategy.exit_signals.iter().enumerate() {
            self.validate_node(node, &format!("ExitSignals[{}]", index), &mut errors);
        }

        log::debug!("IR validation finished with {} error(s)", errors.len());
        ValidationResult { errors }
    }

    fn validate_node(&self, node: &SignalNodeIr, path: &str, errors: &mut Vec<ValidationError>) {
        // An unknown node's subtree cannot be checked
        let Some(capability) = self.catalog.lookup(&node.catalog_id) else {
            errors.push(ValidationError::new(
                format!("Unknown signal catalog ID: {}", node.catalog_id),
                path,
            ));
            return;
        };

        check_args(capability, node, path, errors);

        if node.children.len() < capability.required_children {
            errors.push(ValidationError::new(
                format!(
                    "Signal '{}' requires {} child signal(s) but has {}",
                    node.catalog_id,
                    capability.required_children,
                    node.children.len()
                ),
                format!("{}.Children", path),
            ));
        }

        if capability.is_parametric() {
            check_parametric_fields(node, path, errors);
        }

        for (index, child) in node.children.iter().enumerate() {
            self.validate_node(child, &format!("{}.Children[{}]", path, index), errors);
        }
    }
}

fn check_args(
    capability: &SignalCapability,
    node: &SignalNodeIr,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    for definition in capability.required_args() {
        let Some(value) = node.args.get(definition.name) else {
            errors.push(ValidationError::new(
                format!(
                    "Missing required argument '{}' for signal '{}'",
                    definition.name, node.catalog_id
                ),
                format!("{}.Args", path),
            ));
            continue;
        };

        if definition.kind != ArgKind::Number {
            continue;
        }

        let arg_path = format!("{}.Args.{}", path, definition.name);
        let Some(number) = value.as_f64() else {
            errors.push(ValidationError::new(
                format!(
                    "Argument '{}' must be numeric, got '{}'",
                    definition.name, value
                ),
                arg_path,
            ));
            continue;
        };

        if let Some(min) = definition.min {
            if number < min {
                errors.push(ValidationError::new(
                    format!(
                        "Argument '{}' value {} is below minimum {}",
                        definition.name, number, min
                    ),
                    arg_path.clone(),
                ));
            }
        }
        if let Some(max) = definition.max {
            if number > max {
                errors.push(ValidationError::new(
                    format!(
                        "Argument '{}' value {} exceeds maximum {}",
                        definition.name, number, max
                    ),
                    arg_path,
                ));
            }
        }
    }
}

// Rule2Mode and Rule2Operation are compiled but intentionally not checked here.
fn check_parametric_fields(node: &SignalNodeIr, path: &str, errors: &mut Vec<ValidationError>) {
    match non_empty(&node.rule1_mode) {
        None => errors.push(ValidationError::new(
            "Rule1Mode is required for parametric signals",
            format!("{}.Rule1Mode", path),
        )),
        Some("Signal") | Some("Value") => {}
        Some(other) => errors.push(ValidationError::new(
            format!("Rule1Mode must be 'Signal' or 'Value', got '{}'", other),
            format!("{}.Rule1Mode", path),
        )),
    }

    if non_empty(&node.rule1_operation).is_none() {
        errors.push(ValidationError::new(
            "Rule1Operation is required for parametric signals",
            format!("{}.Rule1Operation", path),
        ));
    }

    if non_empty(&node.cross_op).is_none() {
        errors.push(ValidationError::new(
            "CrossOp is required for parametric signals",
            format!("{}.CrossOp", path),
        ));
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
