//! The trampolined evaluator.
//!
//! [`Interpreter::eval`] owns two loop variables, the current form and the
//! current environment, and reduces the form step by step:
//!
//! - a builtin call runs the builtin. Terminal builtins produce a value and
//!   end the loop; the tail builtins (`do`, `if`, `while`) may instead hand
//!   back the next form to evaluate in the same environment;
//! - a user function call evaluates its arguments, merges the caller's
//!   bindings into the function's closure, binds the parameters there, and
//!   continues with the body inside the closure;
//! - an atom or literal resolves to a value and ends the loop.
//!
//! Tail positions (function bodies, `do` results, `if` branches) never
//! recurse on the host stack, so a million-deep self-recursive call chain
//! runs in constant host depth. Non-tail sub-forms (operands, arguments,
//! conditions) do recurse, through [`ensure_sufficient_stack`].

mod builder;
mod builtins;

pub use builder::InterpreterBuilder;

use pera_ir::Form;
use pera_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::errors::{not_callable, EvalResult};
use crate::{Environment, SharedPrintHandler, Value};

/// Counters describing a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Deepest nesting of host-level evaluator frames.
    pub max_depth: usize,
    /// Trampoline iterations.
    pub steps: u64,
    /// User function applications.
    pub calls: u64,
}

/// Outcome of one reduction step.
enum Step {
    Done(Value),
    /// Continue with this form in the current environment.
    Continue(Form),
    /// Continue with this form in another environment.
    Enter(Form, Environment),
}

/// Evaluates forms against a top-level environment.
pub struct Interpreter {
    env: Environment,
    print_handler: SharedPrintHandler,
    depth: usize,
    stats: EvalStats,
}

impl Interpreter {
    /// Interpreter printing to stdout with an empty environment.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// The top-level environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn stats(&self) -> EvalStats {
        self.stats
    }

    /// Evaluate a parsed program in the top-level environment.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, program: &Form) -> EvalResult {
        let env = self.env.clone();
        let result = self.eval(program, &env);
        tracing::debug!(
            steps = self.stats.steps,
            calls = self.stats.calls,
            max_depth = self.stats.max_depth,
            "run finished"
        );
        result
    }

    /// Evaluate `form` in `env` to a value.
    ///
    /// This is the non-tail entry point: each call is one host-level frame.
    pub fn eval(&mut self, form: &Form, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| {
            self.depth += 1;
            self.stats.max_depth = self.stats.max_depth.max(self.depth);
            let result = self.trampoline(form.clone(), env.clone());
            self.depth -= 1;
            result
        })
    }

    fn trampoline(&mut self, mut form: Form, mut env: Environment) -> EvalResult {
        loop {
            self.stats.steps += 1;
            let step = match &form {
                Form::Nil => return Ok(Value::Nil),
                Form::Number(n) => return Ok(Value::Number(*n)),
                Form::Atom(name) => return Ok(env.lookup(name).unwrap_or(Value::Nil)),
                Form::Call(call) => {
                    trace!(head = &*call.head, depth = self.depth, "step");
                    match call.builtin() {
                        Some(builtin) => self.eval_builtin(builtin, &call.args, &env)?,
                        None => {
                            let head = env.lookup(&call.head).unwrap_or(Value::Nil);
                            self.apply(head, &call.args, &env)?
                        }
                    }
                }
                Form::Group(items) => match items.split_first() {
                    None => return Ok(Value::Nil),
                    Some((head, args)) => {
                        let head = self.eval(head, &env)?;
                        self.apply(head, args, &env)?
                    }
                },
            };

            match step {
                Step::Done(value) => return Ok(value),
                Step::Continue(next) => form = next,
                Step::Enter(next, next_env) => {
                    form = next;
                    env = next_env;
                }
            }
        }
    }

    /// Apply an evaluated call head to argument forms.
    fn apply(&mut self, head: Value, args: &[Form], env: &Environment) -> EvalResult<Step> {
        match head {
            Value::Function(func) => {
                self.stats.calls += 1;
                let values = self.eval_all(args, env)?;

                let scope = func.closure.clone();
                scope.merge_from(env);
                let mut values = values.into_iter();
                for param in &func.params {
                    scope.define(param.clone(), values.next().unwrap_or(Value::Nil));
                }
                trace!(function = &*func.name, args = args.len(), "apply");
                Ok(Step::Enter(func.body.clone(), scope))
            }
            Value::Table(_) => {
                let keys = self.eval_keys(args, env)?;
                Ok(Step::Done(builtins::index_chain(head, &keys, ".")?))
            }
            other if args.is_empty() => Ok(Step::Done(other)),
            other => Err(not_callable(&other)),
        }
    }

    fn eval_all(&mut self, forms: &[Form], env: &Environment) -> EvalResult<Vec<Value>> {
        forms.iter().map(|form| self.eval(form, env)).collect()
    }

    /// Evaluate a form in key position: an unbound name is its own key.
    fn eval_key(&mut self, form: &Form, env: &Environment) -> EvalResult {
        match form {
            Form::Atom(name) => Ok(env.lookup(name).unwrap_or_else(|| Value::Str(name.clone()))),
            _ => self.eval(form, env),
        }
    }

    fn eval_keys(&mut self, forms: &[Form], env: &Environment) -> EvalResult<Vec<Value>> {
        forms.iter().map(|form| self.eval_key(form, env)).collect()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
