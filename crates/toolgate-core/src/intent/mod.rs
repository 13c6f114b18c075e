//! Text-to-intent parsing

mod parser;

pub use parser::parse_intent;
