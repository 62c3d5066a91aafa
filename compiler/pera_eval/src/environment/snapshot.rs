//! Memoized deep copy.
//!
//! Each container is registered in its memo table before its contents are
//! copied, so a cycle back to it finds the registered copy instead of
//! recursing.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use pera_stack::ensure_sufficient_stack;

use super::{Environment, Scope};
use crate::value::{FunctionValue, Table, TableRef};
use crate::Value;

#[derive(Default)]
pub(super) struct Snapshot {
    environments: FxHashMap<*const RefCell<Scope>, Environment>,
    tables: FxHashMap<*const RefCell<Table>, TableRef>,
    functions: FxHashMap<*const FunctionValue, Rc<FunctionValue>>,
}

impl Snapshot {
    pub(super) fn environment(&mut self, original: &Environment) -> Environment {
        if let Some(copy) = self.environments.get(&original.as_ptr()) {
            return copy.clone();
        }
        let copy = Environment::new();
        self.environments.insert(original.as_ptr(), copy.clone());

        let bindings: Vec<(_, _)> = original
            .0
            .borrow()
            .bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        for (name, value) in bindings {
            let value = self.value(&value);
            copy.define(name, value);
        }
        copy
    }

    fn value(&mut self, value: &Value) -> Value {
        match value {
            Value::Table(table) => Value::Table(self.table(table)),
            Value::Function(func) => Value::Function(self.function(func)),
            Value::Nil | Value::Bool(_) | Value::Number(_) | Value::Str(_) => value.clone(),
        }
    }

    fn table(&mut self, original: &TableRef) -> TableRef {
        if let Some(copy) = self.tables.get(&original.as_ptr()) {
            return copy.clone();
        }
        let copy = TableRef::new(Table::new());
        self.tables.insert(original.as_ptr(), copy.clone());

        let mut contents = original.borrow().clone();
        ensure_sufficient_stack(|| {
            for value in contents.values_mut() {
                *value = self.value(value);
            }
        });
        *copy.borrow_mut() = contents;
        copy
    }

    fn function(&mut self, original: &Rc<FunctionValue>) -> Rc<FunctionValue> {
        let key = Rc::as_ptr(original);
        if let Some(copy) = self.functions.get(&key) {
            return Rc::clone(copy);
        }

        let closure = ensure_sufficient_stack(|| self.environment(&original.closure));

        // Copying the closure may have reached this function again through
        // a cycle and already produced its copy.
        if let Some(copy) = self.functions.get(&key) {
            return Rc::clone(copy);
        }
        let copy = Rc::new(FunctionValue {
            name: original.name.clone(),
            params: original.params.clone(),
            body: original.body.clone(),
            closure,
        });
        self.functions.insert(key, Rc::clone(&copy));
        copy
    }
}
