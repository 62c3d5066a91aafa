use super::*;
use pretty_assertions::assert_eq;

fn name(s: &str) -> Key {
    Key::Name(Symbol::from(s))
}

fn key(value: &Value) -> Key {
    Key::from_value(value, "test").unwrap()
}

#[test]
fn truthiness() {
    assert!(!Value::Nil.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(!Value::Number(0.0).is_truthy());
    assert!(!Value::Number(f64::NAN).is_truthy());
    assert!(!Value::str("").is_truthy());

    assert!(Value::Bool(true).is_truthy());
    assert!(Value::Number(-1.0).is_truthy());
    assert!(Value::str("0").is_truthy());
    assert!(Value::table(Table::new()).is_truthy());
}

#[test]
fn type_names() {
    assert_eq!(Value::Nil.type_name(), "nil");
    assert_eq!(Value::from(true).type_name(), "bool");
    assert_eq!(Value::from(1.0).type_name(), "number");
    assert_eq!(Value::str("x").type_name(), "string");
    assert_eq!(Value::table(Table::new()).type_name(), "table");
}

#[test]
fn equality_is_identity_for_tables() {
    let a = Value::table(Table::new());
    assert_eq!(a, a.clone());
    assert_ne!(a, Value::table(Table::new()));
    assert_eq!(Value::str("k"), Value::str("k"));
}

#[test]
fn keys_from_numbers() {
    assert_eq!(key(&Value::Number(0.0)), Key::Index(0));
    assert_eq!(key(&Value::Number(-0.0)), Key::Index(0));
    assert_eq!(key(&Value::Number(3.0)), Key::Index(3));
    assert_eq!(key(&Value::Number(1.5)), name("1.5"));
    assert_eq!(key(&Value::Number(-1.0)), name("-1"));
    assert_eq!(key(&Value::Number(f64::NAN)), name("NaN"));
}

#[test]
fn keys_from_strings() {
    assert_eq!(key(&Value::str("2")), Key::Index(2));
    assert_eq!(key(&Value::str("0")), Key::Index(0));
    assert_eq!(key(&Value::str("02")), name("02"));
    assert_eq!(key(&Value::str("ten")), name("ten"));
    assert_eq!(key(&Value::str("")), name(""));
}

#[test]
fn keys_from_other_scalars() {
    assert_eq!(key(&Value::Bool(true)), name("true"));
    assert_eq!(key(&Value::Nil), name("nil"));
    assert!(Key::from_value(&Value::table(Table::new()), "put").is_err());
}

#[test]
fn table_positions_and_names() {
    let mut table = Table::from_values([Value::from(1.0), Value::from(2.0), Value::from(3.0)]);
    table.set(name("ten"), Value::from(10.0));

    assert_eq!(table.len(), 4);
    assert_eq!(table.positional_len(), 3);
    assert_eq!(table.get(&Key::Index(1)), Value::from(2.0));
    assert_eq!(table.get(&name("ten")), Value::from(10.0));
    assert_eq!(table.get(&name("missing")), Value::Nil);
    assert_eq!(table.get(&Key::Index(9)), Value::Nil);
}

#[test]
fn table_pop_skips_named_slots() {
    let mut table = Table::from_values([Value::from(1.0), Value::from(2.0), Value::from(3.0)]);
    table.set(name("ten"), Value::from(10.0));

    assert_eq!(table.pop(), Value::from(3.0));
    assert_eq!(table.pop(), Value::from(2.0));
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&name("ten")), Value::from(10.0));

    table.push(Value::from(10.0));
    table.push(Value::from(20.0));
    let order: Vec<(Option<String>, Value)> = table
        .iter()
        .map(|(name, value)| (name.map(ToString::to_string), value.clone()))
        .collect();
    assert_eq!(
        order,
        vec![
            (None, Value::from(1.0)),
            (Some("ten".to_owned()), Value::from(10.0)),
            (None, Value::from(10.0)),
            (None, Value::from(20.0)),
        ]
    );
    assert_eq!(table.get(&Key::Index(2)), Value::from(20.0));
}

#[test]
fn table_pop_keeps_later_names_addressable() {
    let mut table = Table::from_values([Value::from(1.0)]);
    table.set(name("a"), Value::from(2.0));
    table.set(name("b"), Value::from(3.0));

    assert_eq!(table.pop(), Value::from(1.0));
    assert_eq!(table.pop(), Value::Nil);
    assert_eq!(table.get(&name("a")), Value::from(2.0));
    assert_eq!(table.get(&name("b")), Value::from(3.0));
}

#[test]
fn table_set_past_end_pads_with_nil() {
    let mut table = Table::from_values([Value::from(1.0)]);
    table.set(Key::Index(1), Value::from(2.0));
    table.set(Key::Index(4), Value::from(5.0));
    assert_eq!(table.positional_len(), 5);
    assert_eq!(table.get(&Key::Index(2)), Value::Nil);
    assert_eq!(table.get(&Key::Index(4)), Value::from(5.0));

    table.set(Key::Index(0), Value::str("first"));
    assert_eq!(table.get(&Key::Index(0)), Value::str("first"));
    assert_eq!(table.len(), 5);
}

#[test]
fn table_set_far_past_end_is_sparse() {
    let mut table = Table::from_values([Value::from(1.0)]);
    table.set(Key::Index(3_000_000_000), Value::from(2.0));
    assert_eq!(table.len(), 2);
    assert_eq!(table.positional_len(), 1);
    assert_eq!(table.get(&Key::Index(3_000_000_000)), Value::from(2.0));
    assert_eq!(table.get(&name("3000000000")), Value::from(2.0));

    table.set(Key::Index(3_000_000_000), Value::from(3.0));
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&Key::Index(3_000_000_000)), Value::from(3.0));
    assert_eq!(table.get(&Key::Index(2_999_999_999)), Value::Nil);
}

#[test]
fn dropping_deeply_nested_tables() {
    let mut value = Value::Nil;
    for _ in 0..300_000 {
        value = Value::table(Table::from_values([value]));
    }
    drop(value);
}

#[test]
fn dropping_a_table_keeps_shared_inner_tables() {
    let inner = Value::table(Table::from_values([Value::from(7.0)]));
    let outer = Value::table(Table::from_values([inner.clone()]));
    drop(outer);
    let inner = inner.as_table().unwrap().borrow();
    assert_eq!(inner.get(&Key::Index(0)), Value::from(7.0));
}

#[test]
fn table_overwrites_names_in_place() {
    let mut table = Table::new();
    table.set(name("k"), Value::from(1.0));
    table.push(Value::from(2.0));
    table.set(name("k"), Value::from(3.0));
    assert_eq!(table.len(), 2);
    assert_eq!(table.iter().next().map(|(_, v)| v.clone()), Some(Value::from(3.0)));
}
