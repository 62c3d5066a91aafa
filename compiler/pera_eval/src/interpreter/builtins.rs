//! Builtin dispatch.
//!
//! Every builtin receives its operand forms unevaluated and decides what to
//! evaluate. `do`, `if` and `while` are the tail set; the rest finish with
//! [`Step::Done`].

use std::rc::Rc;

use pera_ir::{Builtin, Form, Symbol};
use tracing::debug;

use super::{Interpreter, Step};
use crate::errors::{
    field_outside_table, malformed_definition, operand_count, type_mismatch, EvalResult,
};
use crate::operators::{evaluate_binary, evaluate_not, BinaryOp};
use crate::value::{FunctionValue, Key, Table, TableRef};
use crate::{render, Environment, Value};

/// Borrow exactly `N` operand forms.
fn operands<const N: usize>(builtin: Builtin, args: &[Form]) -> EvalResult<&[Form; N]> {
    args.try_into()
        .map_err(|_| operand_count(builtin.name(), N, args.len()))
}

/// Follow `keys` from `value` through nested tables.
///
/// Reading through `nil` stays `nil`; reading from any other non-table fails.
pub(super) fn index_chain(value: Value, keys: &[Value], operation: &'static str) -> EvalResult {
    let mut current = value;
    for key in keys {
        current = match &current {
            Value::Table(table) => table.borrow().get(&Key::from_value(key, operation)?),
            Value::Nil => return Ok(Value::Nil),
            other => return Err(type_mismatch(operation, "table", other)),
        };
    }
    Ok(current)
}

fn expect_table<'v>(operation: &'static str, value: &'v Value) -> EvalResult<&'v TableRef> {
    value
        .as_table()
        .ok_or_else(|| type_mismatch(operation, "table", value))
}

impl Interpreter {
    pub(super) fn eval_builtin(
        &mut self,
        builtin: Builtin,
        args: &[Form],
        env: &Environment,
    ) -> EvalResult<Step> {
        let value = match builtin {
            // Tail set
            Builtin::Do => return self.eval_do(args, env),
            Builtin::If => {
                let [cond, then, otherwise] = operands(builtin, args)?;
                let branch = if self.eval(cond, env)?.is_truthy() {
                    then
                } else {
                    otherwise
                };
                return Ok(Step::Continue(branch.clone()));
            }
            Builtin::While => {
                let [cond, body] = operands(builtin, args)?;
                let mut last = Value::Nil;
                while self.eval(cond, env)?.is_truthy() {
                    last = self.eval(body, env)?;
                }
                last
            }

            // Binding and definition
            Builtin::On => self.eval_on(args, env)?,
            Builtin::To | Builtin::Set => self.eval_bind(builtin, args, env)?,
            Builtin::Inc => self.eval_step(builtin, args, env, 1.0)?,
            Builtin::Dec => self.eval_step(builtin, args, env, -1.0)?,

            // Operators
            Builtin::Add => self.eval_binary(builtin, BinaryOp::Add, args, env)?,
            Builtin::Sub => self.eval_binary(builtin, BinaryOp::Sub, args, env)?,
            Builtin::Mul => self.eval_binary(builtin, BinaryOp::Mul, args, env)?,
            Builtin::Div => self.eval_binary(builtin, BinaryOp::Div, args, env)?,
            Builtin::Rem => self.eval_binary(builtin, BinaryOp::Rem, args, env)?,
            Builtin::Eq => self.eval_binary(builtin, BinaryOp::Eq, args, env)?,
            Builtin::Lt => self.eval_binary(builtin, BinaryOp::Lt, args, env)?,
            Builtin::LtEq => self.eval_binary(builtin, BinaryOp::LtEq, args, env)?,
            Builtin::And => self.eval_binary(builtin, BinaryOp::And, args, env)?,
            Builtin::Or => self.eval_binary(builtin, BinaryOp::Or, args, env)?,
            Builtin::Not => {
                let [operand] = operands(builtin, args)?;
                evaluate_not(&self.eval(operand, env)?)
            }

            Builtin::Print => {
                let [operand] = operands(builtin, args)?;
                let value = self.eval(operand, env)?;
                self.print_handler.println(&render(&value));
                value
            }

            // Tables
            Builtin::Table => self.eval_table(args, env)?,
            Builtin::Field => return Err(field_outside_table()),
            Builtin::Index => {
                let Some((target, keys)) = args.split_first() else {
                    return Ok(Step::Done(Value::Nil));
                };
                let target = self.eval(target, env)?;
                let keys = self.eval_keys(keys, env)?;
                index_chain(target, &keys, builtin.name())?
            }
            Builtin::Count => {
                let [operand] = operands(builtin, args)?;
                let value = self.eval(operand, env)?;
                let len = expect_table(builtin.name(), &value)?.borrow().len();
                Value::Number(len as f64)
            }
            Builtin::Put => {
                let [target, key, value] = operands(builtin, args)?;
                let target = self.eval(target, env)?;
                let key = self.eval_key(key, env)?;
                let value = self.eval(value, env)?;
                let key = Key::from_value(&key, builtin.name())?;
                expect_table(builtin.name(), &target)?
                    .borrow_mut()
                    .set(key, value.clone());
                value
            }
            Builtin::Push => {
                let [target, value] = operands(builtin, args)?;
                let target = self.eval(target, env)?;
                let value = self.eval(value, env)?;
                expect_table(builtin.name(), &target)?
                    .borrow_mut()
                    .push(value.clone());
                value
            }
            Builtin::Pop => {
                let [target] = operands(builtin, args)?;
                match self.eval(target, env)? {
                    Value::Table(table) => table.borrow_mut().pop(),
                    _ => Value::Nil,
                }
            }
        };
        Ok(Step::Done(value))
    }

    /// Evaluate all but the last form for effect; continue with the last.
    fn eval_do(&mut self, args: &[Form], env: &Environment) -> EvalResult<Step> {
        let Some((last, init)) = args.split_last() else {
            return Ok(Step::Done(Value::Nil));
        };
        for form in init {
            self.eval(form, env)?;
        }
        Ok(Step::Continue(last.clone()))
    }

    fn eval_binary(
        &mut self,
        builtin: Builtin,
        op: BinaryOp,
        args: &[Form],
        env: &Environment,
    ) -> EvalResult {
        let [left, right] = operands(builtin, args)?;
        let left = self.eval(left, env)?;
        let right = self.eval(right, env)?;
        evaluate_binary(op, left, right)
    }

    /// `on (name params...) body` or `on name body`.
    fn eval_on(&mut self, args: &[Form], env: &Environment) -> EvalResult {
        let [header, body] = operands(Builtin::On, args)?;
        let (name, params) = match header {
            Form::Atom(name) => (name.clone(), Vec::new()),
            Form::Call(call) => {
                let params = call
                    .args
                    .iter()
                    .map(|param| {
                        param.as_atom().cloned().ok_or_else(|| {
                            malformed_definition("on", format!("parameter `{param}` is not a name"))
                        })
                    })
                    .collect::<EvalResult<Vec<Symbol>>>()?;
                (call.head.clone(), params)
            }
            other => {
                return Err(malformed_definition(
                    "on",
                    format!("`{other}` is not a function header"),
                ))
            }
        };
        if Builtin::from_name(&name).is_some() {
            return Err(malformed_definition(
                "on",
                format!("cannot redefine builtin `{name}`"),
            ));
        }

        debug!(name = &*name, params = params.len(), "define function");
        let func = Rc::new(FunctionValue {
            name: name.clone(),
            params,
            body: body.clone(),
            closure: env.snapshot(),
        });
        env.define(name, Value::Function(Rc::clone(&func)));
        Ok(Value::Function(func))
    }

    /// `to name value`, or the block form `to (name value ...) body`.
    fn eval_bind(&mut self, builtin: Builtin, args: &[Form], env: &Environment) -> EvalResult {
        let [target, operand] = operands(builtin, args)?;
        if let Form::Atom(name) = target {
            let value = self.eval(operand, env)?;
            env.define(name.clone(), value.clone());
            return Ok(value);
        }

        let Some(pairs) = target.elements() else {
            return Err(malformed_definition(
                builtin.name(),
                format!("`{target}` is neither a name nor a group of bindings"),
            ));
        };
        for pair in pairs.chunks(2) {
            let Form::Atom(name) = &pair[0] else {
                return Err(malformed_definition(
                    builtin.name(),
                    format!("`{}` is not a name", pair[0]),
                ));
            };
            let value = match pair.get(1) {
                Some(form) => self.eval(form, env)?,
                None => Value::Nil,
            };
            env.define(name.clone(), value);
        }
        self.eval(operand, env)
    }

    /// `inc`/`dec`: adjust a bound number in place, returning the old value.
    fn eval_step(
        &mut self,
        builtin: Builtin,
        args: &[Form],
        env: &Environment,
        delta: f64,
    ) -> EvalResult {
        let [target] = operands(builtin, args)?;
        let Form::Atom(name) = target else {
            return Err(malformed_definition(
                builtin.name(),
                format!("`{target}` is not a name"),
            ));
        };
        match env.lookup(name) {
            Some(Value::Number(n)) => {
                env.define(name.clone(), Value::Number(n + delta));
                Ok(Value::Number(n))
            }
            other => Err(type_mismatch(
                builtin.name(),
                "bound number",
                &other.unwrap_or(Value::Nil),
            )),
        }
    }

    /// `(table a b : k v ...)`.
    fn eval_table(&mut self, args: &[Form], env: &Environment) -> EvalResult {
        let mut table = Table::new();
        for arg in args {
            match arg {
                Form::Call(call) if call.builtin() == Some(Builtin::Field) => {
                    let [key, value] = operands(Builtin::Field, &call.args)?;
                    let key = self.eval_key(key, env)?;
                    let value = self.eval(value, env)?;
                    table.set(Key::from_value(&key, ":")?, value);
                }
                _ => table.push(self.eval(arg, env)?),
            }
        }
        Ok(Value::table(table))
    }
}
