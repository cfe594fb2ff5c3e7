//! Configuration types and the boot-time parser

pub mod parser;
pub mod types;

pub use parser::{parse_config, ParseError};
pub use types::*;
