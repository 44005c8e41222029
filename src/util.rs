/// Integer helpers for the evaluator.
///
/// Floor division, canonical booleans, and checked conversions from stack
/// integers to character codes and stack indices. All fallible helpers return
/// a `RuntimeError` carrying the source line.
pub mod num;
/// Native stack growth for deep recursion.
///
/// Parsing and evaluation both recurse once per quotation level; this module
/// grows the native stack on demand so deep nesting cannot overflow it.
pub mod stack;
