//! Environments and definition-time snapshots.
//!
//! There is no scope chain. An environment is one flat map from name to
//! value, shared by handle:
//!
//! - the top level owns one environment for the whole run;
//! - every function owns a private environment, its closure, created as a
//!   deep [`snapshot`](Environment::snapshot) of the defining environment;
//! - calling a function merges the caller's bindings into the closure
//!   (overwriting same-named entries, keeping closure-only ones) and runs the
//!   body inside the closure itself. The merge is cumulative: whatever a call
//!   leaves behind is still there on the next call.

mod snapshot;

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use pera_ir::Symbol;

use crate::shared::Shared;
use crate::Value;

/// Name to value bindings.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Symbol, Value>,
}

impl Scope {
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Shared handle to a [`Scope`].
#[derive(Clone, Debug, Default)]
pub struct Environment(Shared<Scope>);

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a name.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.0.borrow().bindings.get(name).cloned()
    }

    /// Bind `name`, replacing any existing binding.
    #[inline]
    pub fn define(&self, name: Symbol, value: Value) {
        self.0.borrow_mut().bindings.insert(name, value);
    }

    /// Overlay every binding of `caller` onto this environment.
    ///
    /// A no-op when both handles are the same environment, which is the
    /// case for every self-recursive call.
    pub fn merge_from(&self, caller: &Environment) {
        if self.ptr_eq(caller) {
            return;
        }
        let caller = caller.0.borrow();
        let mut scope = self.0.borrow_mut();
        scope.bindings.reserve(caller.bindings.len());
        for (name, value) in &caller.bindings {
            scope.bindings.insert(name.clone(), value.clone());
        }
    }

    /// Deep copy of this environment for a new closure.
    ///
    /// Tables and functions (with their closures) are copied too. Values
    /// aliased inside the environment stay aliased in the copy, and cycles
    /// are reproduced rather than followed.
    pub fn snapshot(&self) -> Environment {
        snapshot::Snapshot::default().environment(self)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Bound names, sorted.
    pub fn names(&self) -> Vec<Symbol> {
        let mut names: Vec<Symbol> = self.0.borrow().bindings.keys().cloned().collect();
        names.sort();
        names
    }

    fn as_ptr(&self) -> *const RefCell<Scope> {
        self.0.as_ptr()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
