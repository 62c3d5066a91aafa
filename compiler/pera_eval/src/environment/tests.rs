use super::*;
use crate::{Table, Value};
use pretty_assertions::assert_eq;

fn sym(s: &str) -> Symbol {
    Symbol::from(s)
}

fn table_of(env: &Environment, name: &str) -> crate::TableRef {
    match env.lookup(name) {
        Some(Value::Table(table)) => table,
        other => panic!("`{name}` is not a table: {other:?}"),
    }
}

#[test]
fn define_and_lookup() {
    let env = Environment::new();
    assert_eq!(env.lookup("x"), None);
    env.define(sym("x"), Value::Number(1.0));
    env.define(sym("x"), Value::Number(2.0));
    assert_eq!(env.lookup("x"), Some(Value::Number(2.0)));
    assert_eq!(env.len(), 1);
}

#[test]
fn clones_share_bindings() {
    let env = Environment::new();
    let alias = env.clone();
    alias.define(sym("y"), Value::Bool(true));
    assert_eq!(env.lookup("y"), Some(Value::Bool(true)));
    assert!(env.ptr_eq(&alias));
}

#[test]
fn merge_overwrites_and_keeps_closure_only_bindings() {
    let closure = Environment::new();
    closure.define(sym("i"), Value::Number(0.0));
    closure.define(sym("shared"), Value::str("closure"));

    let caller = Environment::new();
    caller.define(sym("shared"), Value::str("caller"));
    caller.define(sym("extra"), Value::Nil);

    closure.merge_from(&caller);
    assert_eq!(closure.names(), vec![sym("extra"), sym("i"), sym("shared")]);
    assert_eq!(closure.lookup("shared"), Some(Value::str("caller")));
    assert_eq!(closure.lookup("i"), Some(Value::Number(0.0)));
    // The caller is untouched.
    assert_eq!(caller.lookup("i"), None);
}

#[test]
fn merge_into_self_is_noop() {
    let env = Environment::new();
    env.define(sym("a"), Value::Number(1.0));
    env.merge_from(&env.clone());
    assert_eq!(env.lookup("a"), Some(Value::Number(1.0)));
}

#[test]
fn snapshot_is_independent() {
    let env = Environment::new();
    env.define(sym("n"), Value::Number(1.0));
    env.define(sym("t"), Value::table(Table::from_values([Value::Number(1.0)])));

    let copy = env.snapshot();
    assert!(!copy.ptr_eq(&env));

    env.define(sym("n"), Value::Number(2.0));
    table_of(&env, "t").borrow_mut().push(Value::Number(2.0));

    assert_eq!(copy.lookup("n"), Some(Value::Number(1.0)));
    assert_eq!(table_of(&copy, "t").borrow().len(), 1);
    assert_eq!(table_of(&env, "t").borrow().len(), 2);
}

#[test]
fn snapshot_preserves_aliasing() {
    let env = Environment::new();
    let shared = Value::table(Table::new());
    env.define(sym("a"), shared.clone());
    env.define(sym("b"), shared);

    let copy = env.snapshot();
    let a = table_of(&copy, "a");
    let b = table_of(&copy, "b");
    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&table_of(&env, "a")));
}

#[test]
fn snapshot_reproduces_cycles() {
    let env = Environment::new();
    let table = Value::table(Table::new());
    table_of_value(&table).borrow_mut().push(table.clone());
    env.define(sym("t"), table);

    let copy = table_of(&env.snapshot(), "t");
    let inner = copy.borrow().get(&crate::Key::Index(0));
    assert!(table_of_value(&inner).ptr_eq(&copy));
    assert!(!copy.ptr_eq(&table_of(&env, "t")));
}

#[test]
fn snapshot_copies_functions_with_their_closures() {
    let env = Environment::new();
    let closure = Environment::new();
    let func = std::rc::Rc::new(crate::FunctionValue {
        name: sym("f"),
        params: Vec::new(),
        body: pera_ir::Form::Nil,
        closure: closure.clone(),
    });
    // A closure that contains its own function, as after a first call.
    closure.define(sym("f"), Value::Function(func.clone()));
    env.define(sym("f"), Value::Function(func.clone()));

    let copy = env.snapshot();
    let Some(Value::Function(copied)) = copy.lookup("f") else {
        panic!("f was not copied as a function");
    };
    assert!(!std::rc::Rc::ptr_eq(&copied, &func));
    assert!(!copied.closure.ptr_eq(&closure));
    let Some(Value::Function(inner)) = copied.closure.lookup("f") else {
        panic!("closure lost f");
    };
    assert!(std::rc::Rc::ptr_eq(&inner, &copied));
}

fn table_of_value(value: &Value) -> crate::TableRef {
    value.as_table().cloned().unwrap()
}
