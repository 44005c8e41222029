/// Runtime values.
///
/// Defines the `Value` enum: integers, quotations and variable name tokens.
/// Booleans are integers; there is no separate boolean kind.
pub mod core;
/// The value stack.
///
/// A LIFO of values whose every pop and peek is checked.
pub mod stack;
/// The variable environment.
///
/// Twenty-six optional slots, one per lowercase letter.
pub mod environment;
