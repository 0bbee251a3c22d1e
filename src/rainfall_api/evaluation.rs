//! Metric tables returned by the evaluate action.

use serde_json::{Map, Value};

pub const CURRENT_METRICS_KEY: &str = "Current Evaluation Metrics";
pub const NEW_METRICS_KEY: &str = "New Evaluation Metrics";

const MODEL_COLUMN: &str = "Model";
const MSE_COLUMN: &str = "MSE";
const RMSE_COLUMN: &str = "RMSE";
const MAPE_COLUMN: &str = "MAPE";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationParseError {
    #[error("The API response did not include {0}")]
    MissingTable(&'static str),
    #[error("{table} is not a table: {reason}")]
    Malformed { table: &'static str, reason: String },
}

/// Scores for one model. Cells the service left out stay `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricRow {
    pub model: String,
    pub mse: Option<f64>,
    pub rmse: Option<f64>,
    pub mape: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricTable {
    pub rows: Vec<MetricRow>,
}

/// Comparison of the production model with a candidate retrained on new data.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationResult {
    pub current: MetricTable,
    pub updated: MetricTable,
}

impl EvaluationResult {
    pub fn from_response(body: &Value) -> Result<Self, EvaluationParseError> {
        Ok(Self {
            current: MetricTable::from_response_field(body, CURRENT_METRICS_KEY)?,
            updated: MetricTable::from_response_field(body, NEW_METRICS_KEY)?,
        })
    }
}

impl MetricTable {
    /// Column headings in display order.
    pub const COLUMNS: [&'static str; 4] = [MODEL_COLUMN, MSE_COLUMN, RMSE_COLUMN, MAPE_COLUMN];

    fn from_response_field(body: &Value, key: &'static str) -> Result<Self, EvaluationParseError> {
        let table = body
            .get(key)
            .filter(|value| !value.is_null())
            .ok_or(EvaluationParseError::MissingTable(key))?;
        Self::parse(table).map_err(|reason| EvaluationParseError::Malformed { table: key, reason })
    }

    /// Accepts a list of row objects, a column-oriented object
    /// (`{"Model": {"0": ..}, "MSE": {"0": ..}}` or `{"MSE": {"Ridge": ..}}`)
    /// or an index-oriented object (`{"Ridge": {"MSE": .., "RMSE": ..}}`).
    fn parse(value: &Value) -> Result<Self, String> {
        match value {
            Value::Array(records) => records
                .iter()
                .enumerate()
                .map(|(index, record)| match record {
                    Value::Object(cells) => Ok(row_from_record(index, cells, None)),
                    other => Err(format!("row {index} is {}", kind(other))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|rows| Self { rows }),
            Value::Object(outer) => parse_object(outer).map(|rows| Self { rows }),
            other => Err(format!("expected rows, found {}", kind(other))),
        }
    }
}

fn row_from_record(index: usize, cells: &Map<String, Value>, label: Option<&str>) -> MetricRow {
    MetricRow {
        model: cells
            .get(MODEL_COLUMN)
            .and_then(cell_text)
            .or_else(|| label.map(str::to_string))
            .unwrap_or_else(|| format!("#{}", index + 1)),
        mse: cells.get(MSE_COLUMN).and_then(cell_number),
        rmse: cells.get(RMSE_COLUMN).and_then(cell_number),
        mape: cells.get(MAPE_COLUMN).and_then(cell_number),
    }
}

fn is_column(name: &str) -> bool {
    MetricTable::COLUMNS.iter().any(|column| *column == name)
}

fn parse_object(outer: &Map<String, Value>) -> Result<Vec<MetricRow>, String> {
    let mut inner = Vec::with_capacity(outer.len());
    for (name, value) in outer {
        let Value::Object(cells) = value else {
            return Err(format!("entry {name} is {}", kind(value)));
        };
        inner.push((name.as_str(), cells));
    }
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    if inner.iter().any(|(name, _)| is_column(name)) {
        return Ok(parse_columns(&inner));
    }
    if inner
        .iter()
        .any(|(_, cells)| cells.keys().any(|key| is_column(key)))
    {
        // Outer keys are the model names, in payload order.
        return Ok(inner
            .iter()
            .enumerate()
            .map(|(index, (model, cells))| row_from_record(index, cells, Some(*model)))
            .collect());
    }
    Err(format!("no {} columns found", MetricTable::COLUMNS.join("/")))
}

fn parse_columns(columns: &[(&str, &Map<String, Value>)]) -> Vec<MetricRow> {
    let mut row_keys: Vec<&str> = Vec::new();
    for (_, cells) in columns {
        for key in cells.keys() {
            if !row_keys.contains(&key.as_str()) {
                row_keys.push(key);
            }
        }
    }
    // Positional labels sort numerically; named rows keep payload order.
    if row_keys.iter().all(|key| key.parse::<u64>().is_ok()) {
        row_keys.sort_by_key(|key| key.parse::<u64>().unwrap_or(u64::MAX));
    }

    let cell = |column: &str, row: &str| {
        columns
            .iter()
            .find(|(name, _)| *name == column)
            .and_then(|(_, cells)| cells.get(row))
    };
    row_keys
        .into_iter()
        .map(|row| MetricRow {
            // Without a Model column the row labels are the model names.
            model: cell(MODEL_COLUMN, row)
                .and_then(cell_text)
                .unwrap_or_else(|| row.to_string()),
            mse: cell(MSE_COLUMN, row).and_then(cell_number),
            rmse: cell(RMSE_COLUMN, row).and_then(cell_number),
            mape: cell(MAPE_COLUMN, row).and_then(cell_number),
        })
        .collect()
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn cell_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
