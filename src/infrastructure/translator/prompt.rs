// src/infrastructure/translator/prompt.rs
// System instructions sent with every translation request

use crate::domain::catalog::Catalog;
use crate::domain::model::SUPPORTED_IR_VERSION;

const IR_SHAPE: &str = r#"{
  "Version": "<version>",
  "Strategy": {
    "EntrySignals": [ <SignalNode>, ... ],
    "ExitSignals": [ <SignalNode>, ... ],
    "Settings": {
      "Symbol": "SPY",
      "Timeframe": "1D",
      "StartDate": "2020-01-01",
      "EndDate": "2024-12-31",
      "PositionSize": 0.1,
      "MaxPositions": 1,
      "MaxHoldBars": 20,
      "EntryExecution": "NextBarOpen",
      "ExitExecution": "NextBarOpen"
    },
    "ClarificationRequest": null
  }
}

<SignalNode> is:
{
  "CatalogId": "<ID from the catalog>",
  "Args": { "<ArgName>": <number> },
  "Children": [ <SignalNode>, ... ],
  "Rule1Mode": "Signal" | "Value",
  "Rule1Operation": "<comparison, e.g. >, <, CrossAbove, CrossBelow>",
  "CrossOp": "OFF" | "AND" | "OR" | "XOR" | "IF",
  "Rule2Mode": "Signal" | "Value",
  "Rule2Operation": "<comparison>"
}"#;

/// Build the system message: task rules, the catalog, and the exact IR shape.
pub fn system_prompt(catalog: &Catalog) -> String {
    format!(
        "You translate natural-language trading strategy descriptions into a JSON \
intermediate representation. Respond with a single JSON object and nothing else.

Rules:
- \"Version\" must be \"{version}\".
- Use only signals from the catalog below, referenced by ID in \"CatalogId\".
- Indicators take their source series as children; raw market data fields take no children.
- Every indicator needs its \"Length\" (or \"Depth\") argument as a number.
- Rule1Mode, Rule1Operation and CrossOp are only used on parametric rule signals, \
which take exactly two children (left and right operand). Use CrossOp \"OFF\" for a single rule.
- Settings fields may be omitted or null when the description does not mention them.
- If the description is too vague to build a strategy, leave the signal lists empty and \
put a short question for the user in \"ClarificationRequest\" instead of guessing.

Signal catalog:
{registry}

Output shape:
{shape}",
        version = SUPPORTED_IR_VERSION,
        registry = catalog.compact_registry(),
        shape = IR_SHAPE.replace("<version>", SUPPORTED_IR_VERSION),
    )
}
