//! The hybrid array/record table.
//!
//! A table is one ordered sequence of slots. A slot is either positional
//! (addressed by its 0-based index among positional slots) or named. Both
//! kinds share the one insertion order, which is also the print order:
//! `(table 1 : ten 10)` followed by `push t 20` prints as
//! `( table 1 : ten 10 20 )`.

use rustc_hash::FxHashMap;

use pera_ir::{format_number, Symbol};

use crate::errors::{type_mismatch, EvalResult};
use crate::shared::Shared;
use crate::Value;

/// Shared handle to a table.
pub type TableRef = Shared<Table>;

/// Indices at or above this are names, as in JavaScript arrays.
const MAX_INDEX: f64 = 4_294_967_295.0;

/// Largest gap `set` fills with `nil`. A position further past the end is
/// stored under its decimal name instead.
const MAX_PADDING: usize = 1 << 16;

/// A resolved table key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// 0-based position among the positional slots.
    Index(usize),
    Name(Symbol),
}

impl Key {
    /// Convert a key value.
    ///
    /// Non-negative integral numbers, and strings spelling one canonically,
    /// are positions. Everything else scalar is keyed by its rendering.
    pub fn from_value(value: &Value, operation: &'static str) -> EvalResult<Key> {
        match value {
            Value::Number(n) => Ok(number_key(*n)),
            Value::Str(s) => Ok(string_key(s)),
            Value::Bool(b) => Ok(Key::Name(Symbol::from(if *b { "true" } else { "false" }))),
            Value::Nil => Ok(Key::Name(Symbol::from("nil"))),
            Value::Table(_) | Value::Function(_) => Err(type_mismatch(
                operation,
                "number, string, bool or nil key",
                value,
            )),
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "range and integrality are checked first"
)]
fn number_key(n: f64) -> Key {
    if n >= 0.0 && n < MAX_INDEX && n.fract() == 0.0 {
        Key::Index(n as usize)
    } else {
        Key::Name(Symbol::from(format_number(n)))
    }
}

fn string_key(s: &Symbol) -> Key {
    let canonical = !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && (s.len() == 1 || !s.starts_with('0'));
    match s.parse::<u32>().map(usize::try_from) {
        Ok(Ok(index)) if canonical && index < u32::MAX as usize => Key::Index(index),
        _ => Key::Name(s.clone()),
    }
}

#[derive(Clone, Debug)]
struct Slot {
    /// `None` for positional slots.
    name: Option<Symbol>,
    value: Value,
}

/// Ordered slots plus indexes into them.
#[derive(Clone, Debug, Default)]
pub struct Table {
    slots: Vec<Slot>,
    /// Positional index to slot index.
    positions: Vec<usize>,
    /// Name to slot index.
    names: FxHashMap<Symbol, usize>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table whose slots are all positional.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut table = Table::new();
        for value in values {
            table.push(value);
        }
        table
    }

    /// Positional plus named slot count.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of positional slots.
    #[inline]
    pub fn positional_len(&self) -> usize {
        self.positions.len()
    }

    /// Read a key; absent keys read as `nil`.
    pub fn get(&self, key: &Key) -> Value {
        let slot = match key {
            Key::Index(index) => self
                .positions
                .get(*index)
                .or_else(|| self.sparse_slot(*index)),
            Key::Name(name) => self.names.get(name),
        };
        slot.map_or(Value::Nil, |&slot| self.slots[slot].value.clone())
    }

    /// Write a key, creating it if needed.
    ///
    /// A position just past the end pads the gap with `nil`. One far past
    /// the end becomes a named slot, so `put t 3000000000 x` costs one slot.
    pub fn set(&mut self, key: Key, value: Value) {
        match key {
            Key::Index(index) => {
                if let Some(&slot) = self.positions.get(index) {
                    self.slots[slot].value = value;
                    return;
                }
                if index - self.positions.len() > MAX_PADDING {
                    self.set(Key::Name(Symbol::from(index.to_string())), value);
                    return;
                }
                while self.positions.len() < index {
                    self.push(Value::Nil);
                }
                self.push(value);
            }
            Key::Name(name) => {
                if let Some(&slot) = self.names.get(&name) {
                    self.slots[slot].value = value;
                    return;
                }
                self.names.insert(name.clone(), self.slots.len());
                self.slots.push(Slot {
                    name: Some(name),
                    value,
                });
            }
        }
    }

    /// Append a positional slot.
    pub fn push(&mut self, value: Value) {
        self.positions.push(self.slots.len());
        self.slots.push(Slot { name: None, value });
    }

    /// Remove the last positional slot, or return `nil` if there is none.
    pub fn pop(&mut self) -> Value {
        let Some(removed) = self.positions.pop() else {
            return Value::Nil;
        };
        let slot = self.slots.remove(removed);

        // Positions are increasing, so only named slots can sit after it.
        for index in self.names.values_mut() {
            if *index > removed {
                *index -= 1;
            }
        }
        slot.value
    }

    /// A position stored by name because it was written far past the end.
    fn sparse_slot(&self, index: usize) -> Option<&usize> {
        if self.names.is_empty() {
            return None;
        }
        self.names.get(index.to_string().as_str())
    }

    /// Slots in insertion order, with their names.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&Symbol>, &Value)> {
        self.slots.iter().map(|slot| (slot.name.as_ref(), &slot.value))
    }

    /// Slot values in insertion order, for in-place rewriting.
    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.slots.iter_mut().map(|slot| &mut slot.value)
    }

    fn drain_values(&mut self) -> impl Iterator<Item = Value> + '_ {
        self.positions.clear();
        self.names.clear();
        self.slots.drain(..).map(|slot| slot.value)
    }
}

/// Nested tables are freed from a heap worklist, so a chain of tables a
/// million deep drops without deep recursion.
impl Drop for Table {
    fn drop(&mut self) {
        let mut pending: Vec<Value> = self.drain_values().collect();
        while let Some(mut value) = pending.pop() {
            if let Value::Table(table) = &mut value {
                if let Some(inner) = table.get_mut() {
                    pending.extend(inner.drain_values());
                }
            }
        }
    }
}
