// src/domain/catalog/entries.rs
// Built-in capability table

use super::{ArgDefinition, SignalCapability, SignalCategory, PARAMETRIC_ENCODING};

const RAW_ENCODING: &str = "RawDataSignal";

fn raw_field(
    id: &'static str,
    name: &'static str,
    aliases: Vec<&'static str>,
    description: &'static str,
) -> SignalCapability {
    SignalCapability {
        id,
        name,
        aliases,
        category: SignalCategory::MarketData,
        description,
        encoding: RAW_ENCODING,
        args: Vec::new(),
        required_children: 0,
        child_slots: Vec::new(),
    }
}

/// Single-source indicator taking one `Length` argument.
fn windowed(
    id: &'static str,
    name: &'static str,
    aliases: Vec<&'static str>,
    description: &'static str,
    encoding: &'static str,
    min_length: f64,
) -> SignalCapability {
    SignalCapability {
        id,
        name,
        aliases,
        category: SignalCategory::Indicator,
        description,
        encoding,
        args: vec![ArgDefinition::number("Length", "Lookback window in bars")
            .with_min(min_length)
            .with_max(5000.0)],
        required_children: 1,
        child_slots: vec!["Source series"],
    }
}

pub(super) fn standard_entries() -> Vec<SignalCapability> {
    vec![
        // Market data
        raw_field("raw.open", "Open", vec!["open", "open price"], "Opening price of each bar"),
        raw_field("raw.high", "High", vec!["high", "high price"], "Highest traded price of each bar"),
        raw_field("raw.low", "Low", vec!["low", "low price"], "Lowest traded price of each bar"),
        raw_field(
            "raw.close",
            "Close",
            vec!["close", "close price", "price"],
            "Closing price of each bar",
        ),
        raw_field("raw.volume", "Volume", vec!["volume", "vol"], "Traded volume of each bar"),
        // Indicators
        windowed(
            "sma",
            "Simple Moving Average",
            vec!["ma", "simple moving average"],
            "Arithmetic mean of the source over Length bars",
            "SmaSignal",
            1.0,
        ),
        windowed(
            "ema",
            "Exponential Moving Average",
            vec!["ma", "exponential moving average", "ewma"],
            "Exponentially weighted mean of the source over Length bars",
            "EmaSignal",
            1.0,
        ),
        windowed(
            "rsi",
            "Relative Strength Index",
            vec!["relative strength index", "relative strength"],
            "Wilder RSI of the source over Length bars, 0 to 100",
            "RsiSignal",
            2.0,
        ),
        windowed(
            "roc",
            "Rate of Change",
            vec!["rate of change", "momentum"],
            "Percent change of the source versus Length bars ago",
            "RocSignal",
            1.0,
        ),
        windowed(
            "highest",
            "Highest Value",
            vec!["highest", "rolling max", "max"],
            "Maximum of the source over the last Length bars",
            "HighestSignal",
            1.0,
        ),
        windowed(
            "lowest",
            "Lowest Value",
            vec!["lowest", "rolling min", "min"],
            "Minimum of the source over the last Length bars",
            "LowestSignal",
            1.0,
        ),
        windowed(
            "stddev",
            "Standard Deviation",
            vec!["standard deviation", "std", "volatility"],
            "Population standard deviation of the source over Length bars",
            "StdDevSignal",
            2.0,
        ),
        SignalCapability {
            id: "lag",
            name: "Lagged Value",
            aliases: vec!["shift", "bars ago", "previous"],
            category: SignalCategory::Indicator,
            description: "Value of the source Depth bars ago",
            encoding: "LagSignal",
            args: vec![ArgDefinition::number("Depth", "Number of bars to look back")
                .with_min(1.0)
                .with_max(1000.0)],
            required_children: 1,
            child_slots: vec!["Source series"],
        },
        SignalCapability {
            id: "corr",
            name: "Correlation",
            aliases: vec!["correlation", "pearson"],
            category: SignalCategory::Indicator,
            description: "Pearson correlation of two series over Length bars",
            encoding: "CorrelationSignal",
            args: vec![ArgDefinition::number("Length", "Lookback window in bars")
                .with_min(2.0)
                .with_max(5000.0)],
            required_children: 2,
            child_slots: vec!["First series", "Second series"],
        },
        // Logic
        SignalCapability {
            id: "parametric",
            name: "Parametric Rule",
            aliases: vec!["rule", "condition", "comparison", "crossover"],
            category: SignalCategory::Logic,
            description: "Compares two operand signals (or a signal and a constant Value) and combines rules with CrossOp",
            encoding: PARAMETRIC_ENCODING,
            args: vec![
                ArgDefinition::number("Offset", "Bars to shift the comparison back")
                    .with_min(0.0)
                    .with_max(1000.0)
                    .optional(),
                ArgDefinition::number("Value", "Constant operand used when a rule mode is Value")
                    .optional(),
            ],
            required_children: 2,
            child_slots: vec!["Left operand", "Right operand"],
        },
    ]
}
