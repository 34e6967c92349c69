//! Error types for table operations and belief propagation.

use thiserror::Error;

/// Errors raised by probability tables and belief networks.
///
/// Every variant is a usage error: the operation failed before touching any
/// state. Degenerate evidence (zero total mass) is not an error and never
/// shows up here.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BeliefError {
    /// A variable name that is not one of the table's columns.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// A row whose length does not match the column count plus the weight.
    #[error("malformed row {row}: expected {expected} entries, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A weight that is negative, NaN or infinite.
    #[error("invalid weight {weight} in row {row}")]
    InvalidWeight { row: usize, weight: f64 },

    /// The same column name given twice.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A literal cell that cannot be used as a discrete value.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// A target marginal that omits a value the table still considers possible.
    #[error("missing belief for {variable} = {value}")]
    MissingBelief { variable: String, value: String },

    /// A node name or id that is not part of the network.
    #[error("unknown node '{0}'")]
    UnknownNode(String),

    /// A second node registered under an existing name.
    #[error("duplicate node '{0}'")]
    DuplicateNode(String),

    /// The same `affects` edge registered twice.
    #[error("duplicate edge {parent} -> {child}")]
    DuplicateEdge { parent: String, child: String },

    /// An edge that would close a directed cycle.
    #[error("edge {parent} -> {child} would create a cycle")]
    CycleDetected { parent: String, child: String },

    /// Propagation settings out of range.
    #[error("invalid propagation config: {0}")]
    InvalidConfig(String),
}
