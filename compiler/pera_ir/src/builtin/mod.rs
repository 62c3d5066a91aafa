//! The static operator table.
//!
//! Every builtin has a reserved name. Most of them also have a fixed arity,
//! which the parser uses to read prefix calls without parentheses
//! (`+ 1 2` reads like `(+ 1 2)`). The variadic ones (`do`, `table`, `.`) are
//! only reachable as the head of a parenthesized group.
//!
//! # Tail set
//!
//! `do`, `if` and `while` may hand a continuation form back to the
//! evaluator's trampoline instead of producing a value. Everything else is
//! terminal.

use std::fmt;

/// How many operand forms a builtin consumes at parse time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many trailing forms.
    Fixed(usize),
    /// Any number of forms; the builtin must head a parenthesized group.
    Variadic,
}

/// A builtin operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    // Binding and definition
    On,
    To,
    Set,
    Inc,
    Dec,

    // Control flow
    Do,
    If,
    While,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,

    // Comparison and logic
    Eq,
    Lt,
    LtEq,
    And,
    Or,
    Not,

    // Output
    Print,

    // Tables
    Table,
    Field,
    Index,
    Count,
    Put,
    Push,
    Pop,
}

impl Builtin {
    /// Every builtin, in declaration order.
    pub const ALL: [Builtin; 27] = [
        Builtin::On,
        Builtin::To,
        Builtin::Set,
        Builtin::Inc,
        Builtin::Dec,
        Builtin::Do,
        Builtin::If,
        Builtin::While,
        Builtin::Add,
        Builtin::Sub,
        Builtin::Mul,
        Builtin::Div,
        Builtin::Rem,
        Builtin::Eq,
        Builtin::Lt,
        Builtin::LtEq,
        Builtin::And,
        Builtin::Or,
        Builtin::Not,
        Builtin::Print,
        Builtin::Table,
        Builtin::Field,
        Builtin::Index,
        Builtin::Count,
        Builtin::Put,
        Builtin::Push,
        Builtin::Pop,
    ];

    /// Look a builtin up by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        let builtin = match name {
            "on" => Builtin::On,
            "to" => Builtin::To,
            "set" => Builtin::Set,
            "inc" => Builtin::Inc,
            "dec" => Builtin::Dec,
            "do" => Builtin::Do,
            "if" => Builtin::If,
            "while" => Builtin::While,
            "+" => Builtin::Add,
            "-" => Builtin::Sub,
            "*" => Builtin::Mul,
            "/" => Builtin::Div,
            "%" => Builtin::Rem,
            "=" => Builtin::Eq,
            "<" => Builtin::Lt,
            "<=" => Builtin::LtEq,
            "and" => Builtin::And,
            "or" => Builtin::Or,
            "not" => Builtin::Not,
            "print" => Builtin::Print,
            "table" => Builtin::Table,
            ":" => Builtin::Field,
            "." => Builtin::Index,
            "#" => Builtin::Count,
            "put" => Builtin::Put,
            "push" => Builtin::Push,
            "pop" => Builtin::Pop,
            _ => return None,
        };
        Some(builtin)
    }

    /// Source name of the builtin.
    pub const fn name(self) -> &'static str {
        match self {
            Builtin::On => "on",
            Builtin::To => "to",
            Builtin::Set => "set",
            Builtin::Inc => "inc",
            Builtin::Dec => "dec",
            Builtin::Do => "do",
            Builtin::If => "if",
            Builtin::While => "while",
            Builtin::Add => "+",
            Builtin::Sub => "-",
            Builtin::Mul => "*",
            Builtin::Div => "/",
            Builtin::Rem => "%",
            Builtin::Eq => "=",
            Builtin::Lt => "<",
            Builtin::LtEq => "<=",
            Builtin::And => "and",
            Builtin::Or => "or",
            Builtin::Not => "not",
            Builtin::Print => "print",
            Builtin::Table => "table",
            Builtin::Field => ":",
            Builtin::Index => ".",
            Builtin::Count => "#",
            Builtin::Put => "put",
            Builtin::Push => "push",
            Builtin::Pop => "pop",
        }
    }

    /// Parse-time arity.
    pub const fn arity(self) -> Arity {
        match self {
            Builtin::Do | Builtin::Table | Builtin::Index => Arity::Variadic,
            Builtin::Inc
            | Builtin::Dec
            | Builtin::Not
            | Builtin::Print
            | Builtin::Count
            | Builtin::Pop => Arity::Fixed(1),
            Builtin::On
            | Builtin::To
            | Builtin::Set
            | Builtin::While
            | Builtin::Add
            | Builtin::Sub
            | Builtin::Mul
            | Builtin::Div
            | Builtin::Rem
            | Builtin::Eq
            | Builtin::Lt
            | Builtin::LtEq
            | Builtin::And
            | Builtin::Or
            | Builtin::Field
            | Builtin::Push => Arity::Fixed(2),
            Builtin::If | Builtin::Put => Arity::Fixed(3),
        }
    }

    /// Fixed arity, if this builtin is an arity-table entry.
    #[inline]
    pub const fn fixed_arity(self) -> Option<usize> {
        match self.arity() {
            Arity::Fixed(n) => Some(n),
            Arity::Variadic => None,
        }
    }

    /// Look up a name in the arity table proper (fixed-arity builtins only).
    ///
    /// These are the reserved words the parser turns into calls.
    pub fn operator(name: &str) -> Option<(Self, usize)> {
        let builtin = Self::from_name(name)?;
        builtin.fixed_arity().map(|arity| (builtin, arity))
    }

    /// Whether evaluating this builtin may continue the trampoline.
    #[inline]
    pub const fn is_tail(self) -> bool {
        matches!(self, Builtin::Do | Builtin::If | Builtin::While)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
