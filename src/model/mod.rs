pub mod table;
pub mod value;

pub use table::{Marginal, ProbabilityTable, Row};
pub use value::Value;
