//! Contains `include_str!` of all the help files
//! These can then be used easily for help functions

pub const HELP_GENERAL: &str = include_str!("h01_general.help");
pub const HELP_TOPICS: &str = include_str!("h02_topics.help");

pub const EXAMPLE_OPERATORS: &str = include_str!("ex01_operators.help");
pub const EXAMPLE_PRECEDENCE: &str = include_str!("ex02_precedence.help");
pub const EXAMPLE_ERRORS: &str = include_str!("ex03_errors.help");
