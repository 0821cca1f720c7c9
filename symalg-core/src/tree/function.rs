use crate::{number::Number, primitive::rational};
use rug::Float;
use super::Node;
use symalg_parser::FunctionKind;

/// A call to a builtin function, such as `sin(x)`. The `%` and `!` operators also build
/// function nodes, of kind [`FunctionKind::Mod`] and [`FunctionKind::Factorial`].
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    kind: FunctionKind,
    args: Vec<Node>,
}

impl Function {
    /// Creates a call to the given function. The number of arguments is assumed to match the
    /// function's arity.
    pub fn new(kind: FunctionKind, args: Vec<Node>) -> Self {
        Self { kind, args }
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn args(&self) -> &[Node] {
        &self.args
    }

    /// Returns a call to the same function with different arguments.
    pub fn with_args(&self, args: Vec<Node>) -> Self {
        Self::new(self.kind, args)
    }

    /// Returns true if the function is written as an operator (`a % b` or `a!`).
    pub fn is_operator(&self) -> bool {
        matches!(self.kind, FunctionKind::Mod | FunctionKind::Factorial)
    }

    /// Computes the value of the function for the given arguments.
    ///
    /// Returns [`None`] for the modulus and factorial functions, which are never computed, or if
    /// the wrong number of arguments is given.
    pub fn apply(&self, args: &[Number]) -> Option<Number> {
        let real = |f: fn(Float) -> Float| -> Option<Number> {
            match args {
                [n] => Some(Number::Real(f(n.to_float()))),
                _ => None,
            }
        };

        match (self.kind, args) {
            (FunctionKind::Sin, _) => real(Float::sin),
            (FunctionKind::Cos, _) => real(Float::cos),
            (FunctionKind::Tan, _) => real(Float::tan),
            (FunctionKind::Asin, _) => real(Float::asin),
            (FunctionKind::Acos, _) => real(Float::acos),
            (FunctionKind::Atan, _) => real(Float::atan),
            (FunctionKind::Ln, _) => real(Float::ln),
            (FunctionKind::Log, _) => real(Float::log10),
            (FunctionKind::Sqrt, [n]) => Some(n.pow(&Number::from(rational((1, 2))))),
            (FunctionKind::Abs, [n]) => Some(n.abs()),
            (FunctionKind::Min, [a, b]) => Some(a.min(b)),
            (FunctionKind::Max, [a, b]) => Some(a.max(b)),
            _ => None,
        }
    }
}
