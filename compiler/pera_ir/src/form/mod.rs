//! The parsed program tree.
//!
//! A `Form` is an s-expression. Calls and groups hold their children behind
//! an `Rc`, so cloning a form is a reference-count bump no matter how large
//! the sub-tree is. The evaluator relies on that: its trampoline owns the
//! "current form" and replaces it with a child on every tail step.

use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::{format_number, Builtin};

/// An identifier as it appeared in the source.
pub type Symbol = Rc<str>;

/// A named call: `head` applied to `args`.
///
/// For arity-table operators `args.len()` equals the operator's arity.
/// For every other head (user functions, `do`, `table`, `.`) the call came
/// from a parenthesized group and is variadic.
#[derive(Debug, PartialEq)]
pub struct Call {
    pub head: Symbol,
    pub args: Vec<Form>,
}

impl Call {
    /// The builtin this call names, if any.
    #[inline]
    pub fn builtin(&self) -> Option<Builtin> {
        Builtin::from_name(&self.head)
    }
}

/// A parsed form.
#[derive(Clone, Debug, PartialEq)]
pub enum Form {
    /// The `nil` literal.
    Nil,
    /// A numeric literal.
    Number(f64),
    /// A name, resolved against the environment at evaluation time.
    Atom(Symbol),
    /// A named call.
    Call(Rc<Call>),
    /// A parenthesized group whose first element is not a name,
    /// such as `()` or `((make_gen 0))`.
    Group(Rc<[Form]>),
}

impl Form {
    pub fn atom(name: &str) -> Self {
        Form::Atom(Symbol::from(name))
    }

    pub fn call(head: &str, args: Vec<Form>) -> Self {
        Form::Call(Rc::new(Call {
            head: Symbol::from(head),
            args,
        }))
    }

    pub fn group(items: Vec<Form>) -> Self {
        Form::Group(items.into())
    }

    /// The head name of a call.
    pub fn head(&self) -> Option<&str> {
        match self {
            Form::Call(call) => Some(&call.head),
            _ => None,
        }
    }

    pub fn as_atom(&self) -> Option<&Symbol> {
        match self {
            Form::Atom(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Form::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Whether this form is a call to `builtin`.
    pub fn is_call_to(&self, builtin: Builtin) -> bool {
        self.head() == Some(builtin.name())
    }

    /// Flatten a call or group back into the element sequence it was parsed
    /// from: `(x 1 y 2)` yields `x 1 y 2`.
    ///
    /// Returns `None` for atoms and literals.
    pub fn elements(&self) -> Option<Vec<Form>> {
        match self {
            Form::Call(call) => {
                let mut items = Vec::with_capacity(call.args.len() + 1);
                items.push(Form::Atom(call.head.clone()));
                items.extend(call.args.iter().cloned());
                Some(items)
            }
            Form::Group(items) => Some(items.to_vec()),
            Form::Nil | Form::Number(_) | Form::Atom(_) => None,
        }
    }
}

/// Frees nested forms with a heap worklist so that dropping a deep tree does
/// not recurse once per level.
impl Drop for Form {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut form) = pending.pop() {
            detach_children(&mut form, &mut pending);
        }
    }
}

/// Move the children of a uniquely owned call or group onto `pending`.
/// Shared children are left in place; dropping them only decrements a count.
fn detach_children(form: &mut Form, pending: &mut Vec<Form>) {
    match form {
        Form::Call(call) => {
            if let Some(call) = Rc::get_mut(call) {
                pending.append(&mut call.args);
            }
        }
        Form::Group(items) => {
            if let Some(items) = Rc::get_mut(items) {
                pending.extend(items.iter_mut().map(|item| mem::replace(item, Form::Nil)));
            }
        }
        Form::Nil | Form::Number(_) | Form::Atom(_) => {}
    }
}

/// Source-like rendering. Parsing the output yields an equal form.
impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Form::Nil => f.write_str("nil"),
            Form::Number(n) => f.write_str(&format_number(*n)),
            Form::Atom(name) => f.write_str(name),
            Form::Call(call) => {
                write!(f, "( {}", call.head)?;
                for arg in &call.args {
                    write!(f, " {arg}")?;
                }
                f.write_str(" )")
            }
            Form::Group(items) => {
                f.write_str("(")?;
                for item in items.iter() {
                    write!(f, " {item}")?;
                }
                f.write_str(" )")
            }
        }
    }
}
