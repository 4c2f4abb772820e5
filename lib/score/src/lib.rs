//! Relevance score of a search hit, with a JSON encoding that keeps
//! infinite scores: `+∞` and `−∞` travel as the strings `"Infinity"` and
//! `"-Infinity"`, finite scores as plain numbers.

pub mod codec;
pub mod errors;
pub mod literal;
pub mod types;

pub use errors::UnrepresentableScoreLiteral;
pub use types::Score;
