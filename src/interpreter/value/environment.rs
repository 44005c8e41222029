use crate::{
    ast::Variable,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// The 26 variable slots of one evaluator.
///
/// Slots start unbound. Only `:` writes them and only `;` reads them; nothing
/// clears them during a run.
#[derive(Debug, Clone)]
pub struct Environment {
    slots: [Option<Value>; Variable::COUNT],
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment with all 26 slots unbound.
    #[must_use]
    pub fn new() -> Self {
        Self { slots: std::array::from_fn(|_| None) }
    }

    /// Binds `value` to `name`, replacing any previous binding.
    pub fn store(&mut self, name: Variable, value: Value) {
        self.slots[name.index()] = Some(value);
    }

    /// Returns a copy of the value bound to `name`.
    ///
    /// # Errors
    /// `UnboundVariable` if the slot was never stored to.
    pub fn load(&self, name: Variable, line: usize) -> EvalResult<Value> {
        self.get(name)
            .cloned()
            .ok_or(RuntimeError::UnboundVariable { name: name.letter(),
                                                   line })
    }

    /// Looks up a slot without raising an error.
    ///
    /// # Returns
    /// - `Some(&Value)`: The value last stored in `name`.
    /// - `None`: If `name` has never been assigned.
    #[must_use]
    pub fn get(&self, name: Variable) -> Option<&Value> {
        self.slots[name.index()].as_ref()
    }
}
