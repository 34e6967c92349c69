use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::value::Value;
use crate::errors::BeliefError;

/// Distribution over the values of one variable, keyed by value
pub type Marginal = BTreeMap<Value, f64>;

/// One entry of a joint probability table: a value per column plus a weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Values in column order
    pub values: Vec<Value>,
    /// Non-negative probability weight
    pub weight: f64,
}

impl Row {
    pub fn new(values: Vec<Value>, weight: f64) -> Self {
        Row { values, weight }
    }
}

/// Joint probability table over a set of named discrete variables.
///
/// Tables are values: every operation returns a new, normalized table and
/// leaves the receiver untouched. Row weights sum to 1, or are all 0 when
/// the table has been conditioned on evidence it considers impossible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ProbabilityTable {
    /// Create a table from caller-supplied rows, normalizing the weights.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self, BeliefError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(BeliefError::DuplicateColumn(column.clone()));
            }
        }

        for (index, row) in rows.iter().enumerate() {
            if row.values.len() != columns.len() {
                return Err(BeliefError::MalformedRow {
                    row: index,
                    expected: columns.len() + 1,
                    found: row.values.len() + 1,
                });
            }
            if !row.weight.is_finite() || row.weight < 0.0 {
                return Err(BeliefError::InvalidWeight {
                    row: index,
                    weight: row.weight,
                });
            }
        }

        Ok(Self::normalized(columns, rows))
    }

    /// Create a table from literal rows where each row lists one value per
    /// column followed by its weight, e.g. `["red", "blue", 0.5]`.
    pub fn from_literal(
        columns: Vec<String>,
        rows: Vec<Vec<serde_json::Value>>,
    ) -> Result<Self, BeliefError> {
        let mut parsed = Vec::with_capacity(rows.len());
        for (index, mut raw) in rows.into_iter().enumerate() {
            if raw.len() != columns.len() + 1 {
                return Err(BeliefError::MalformedRow {
                    row: index,
                    expected: columns.len() + 1,
                    found: raw.len(),
                });
            }
            let weight = match raw.pop() {
                Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
                other => {
                    return Err(BeliefError::UnsupportedValue(format!(
                        "weight of row {} must be a number, got {:?}",
                        index, other
                    )));
                }
            };
            let values = raw
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push(Row::new(values, weight));
        }
        Self::new(columns, parsed)
    }

    // Rows produced by table operations are already valid, so only the
    // normalization step runs here.
    fn normalized(columns: Vec<String>, mut rows: Vec<Row>) -> Self {
        let total: f64 = rows.iter().map(|row| row.weight).sum();
        if total != 0.0 {
            for row in rows.iter_mut() {
                row.weight /= total;
            }
        } else {
            for row in rows.iter_mut() {
                row.weight = 0.0;
            }
        }
        ProbabilityTable { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_column(&self, variable: &str) -> bool {
        self.columns.iter().any(|column| column == variable)
    }

    /// Position of `variable` among the columns
    pub fn column_index(&self, variable: &str) -> Result<usize, BeliefError> {
        self.columns
            .iter()
            .position(|column| column == variable)
            .ok_or_else(|| BeliefError::UnknownVariable(variable.to_string()))
    }

    /// Sum of all row weights: 1 for a regular table, 0 for a degenerate one
    pub fn total_weight(&self) -> f64 {
        self.rows.iter().map(|row| row.weight).sum()
    }

    /// True when the table carries no probability mass at all
    pub fn is_degenerate(&self) -> bool {
        self.rows.iter().all(|row| row.weight == 0.0)
    }

    /// Restrict the distribution to rows where `variable == value`.
    ///
    /// All columns and rows are kept; non-matching rows get weight 0 and the
    /// matching rows are renormalized. Impossible evidence yields the
    /// all-zero table.
    pub fn condition(&self, variable: &str, value: &Value) -> Result<Self, BeliefError> {
        let index = self.column_index(variable)?;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let weight = if row.values[index] == *value {
                    row.weight
                } else {
                    0.0
                };
                Row::new(row.values.clone(), weight)
            })
            .collect();

        let conditioned = Self::normalized(self.columns.clone(), rows);
        if conditioned.is_degenerate() {
            debug!(
                "Evidence {} = {} has zero probability, table is now degenerate",
                variable, value
            );
        }
        Ok(conditioned)
    }

    /// Sum the row weights for each distinct value of `variable`.
    pub fn marginal(&self, variable: &str) -> Result<Marginal, BeliefError> {
        let index = self.column_index(variable)?;
        let mut beliefs = Marginal::new();
        for row in &self.rows {
            *beliefs.entry(row.values[index].clone()).or_insert(0.0) += row.weight;
        }
        Ok(beliefs)
    }

    /// Reweight rows so the marginal of `variable` moves to `target`
    /// (Jeffrey's rule).
    ///
    /// Each row is scaled by `target[v] / current[v]` for its value `v`.
    /// Values the table currently gives zero mass get a shift of 0. Every
    /// value with nonzero current mass must be present in `target`.
    pub fn update_belief(&self, variable: &str, target: &Marginal) -> Result<Self, BeliefError> {
        let index = self.column_index(variable)?;
        let current = self.marginal(variable)?;

        for (value, mass) in &current {
            if *mass != 0.0 && !target.contains_key(value) {
                return Err(BeliefError::MissingBelief {
                    variable: variable.to_string(),
                    value: value.to_string(),
                });
            }
        }

        let shifts: BTreeMap<&Value, f64> = target
            .iter()
            .map(|(value, updated)| {
                let shift = match current.get(value) {
                    Some(current) if *current != 0.0 => updated / current,
                    _ => 0.0,
                };
                (value, shift)
            })
            .collect();
        trace!("Belief shifts for {}: {:?}", variable, shifts);

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let shift = shifts.get(&row.values[index]).copied().unwrap_or(0.0);
                Row::new(row.values.clone(), row.weight * shift)
            })
            .collect();

        Ok(Self::normalized(self.columns.clone(), rows))
    }

    /// Fold every variable shared with `source` into this table, one
    /// `update_belief` at a time in `source`'s column order.
    ///
    /// Returns the replacement table; later columns see the result of the
    /// earlier updates.
    pub fn apply_shared_beliefs(&self, source: &ProbabilityTable) -> Result<Self, BeliefError> {
        let mut updated = self.clone();
        for column in source.columns() {
            if updated.has_column(column) {
                trace!("Updating belief in {}", column);
                let beliefs = source.marginal(column)?;
                updated = updated.update_belief(column, &beliefs)?;
            }
        }
        Ok(updated)
    }
}

impl std::fmt::Display for ProbabilityTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} | weight", self.columns.join(" | "))?;
        for row in &self.rows {
            let values: Vec<String> = row.values.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{} | {:.6}", values.join(" | "), row.weight)?;
        }
        Ok(())
    }
}
