pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod ll1_table;
pub mod parse;
pub mod predictive;
pub mod pretty_print;

pub use error::{GrammarError, SyntaxError};
pub use grammar::Grammar;
pub use ll1_table::ParseTable;
pub use predictive::TableDrivenParser;

pub const EPSILON: &str = "ε";
pub const END_MARK: &str = "$";
