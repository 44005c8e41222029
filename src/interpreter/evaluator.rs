/// Core evaluation logic and context management.
///
/// Contains the `Context` type, the instruction dispatch loop, variable store
/// and load, and nested quotation execution.
pub mod core;

/// Control flow.
///
/// Implements `!`, `?` and `#`, all of which take their code from the stack.
pub mod control;

/// The primitive operation table.
///
/// Stack shuffling, arithmetic, comparison, bitwise operations and I/O.
pub mod primitive;
