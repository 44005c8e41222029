/// Core parsing entry points.
///
/// Contains the top-level `parse` function and the loop that turns a token
/// stream into one level of instructions.
pub mod core;

/// Quotation parsing.
///
/// Handles the recursive descent into `[ ... ]` blocks.
pub mod quotation;

pub use self::core::parse;
