//! Pure coercion functions: raw text tokens to typed values, with explicit
//! null-on-failure semantics and per-token ambiguity flags.

pub mod date;
pub mod number;

pub use date::{DateParse, parse_date, week_start};
pub use number::{NumberParse, parse_number};
