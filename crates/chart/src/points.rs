use serde_json::Value;

/// One indicator record as the chart sees it. Fields that are missing or not
/// numeric are `None` and simply leave a gap in that series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorPoint {
    pub open_time: Option<String>,
    pub close: Option<f64>,
    pub composite_score: Option<f64>,
}

impl IndicatorPoint {
    pub fn new(open_time: impl Into<String>, close: f64, composite_score: f64) -> Self {
        Self {
            open_time: Some(open_time.into()),
            close: Some(close),
            composite_score: Some(composite_score),
        }
    }

    pub fn from_value(record: &Value) -> Self {
        Self {
            open_time: record.get("open_time").and_then(time_label),
            close: number_field(record, "close"),
            composite_score: number_field(record, "composite_score"),
        }
    }
}

/// Builds chart input from an `indicators` value. Anything other than an
/// array yields no points.
pub fn points_from_indicators(indicators: Option<&Value>) -> Vec<IndicatorPoint> {
    indicators
        .and_then(Value::as_array)
        .map(|records| records.iter().map(IndicatorPoint::from_value).collect())
        .unwrap_or_default()
}

fn number_field(record: &Value, key: &str) -> Option<f64> {
    record
        .get(key)
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
}

fn time_label(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
