use crate::{consts::{E, PI}, number::Number};
use symalg_parser::ConstantKind;

/// A named constant. Constants stay symbolic through simplification and expansion, and are only
/// replaced by their value when evaluated under a scope that does not keep constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    kind: ConstantKind,
}

impl Constant {
    pub fn new(kind: ConstantKind) -> Self {
        Self { kind }
    }

    /// The constant `π`.
    pub fn pi() -> Self {
        Self::new(ConstantKind::Pi)
    }

    /// The constant `e`.
    pub fn e() -> Self {
        Self::new(ConstantKind::E)
    }

    pub fn kind(&self) -> ConstantKind {
        self.kind
    }

    /// Returns the symbol used to display the constant.
    pub fn symbol(&self) -> &'static str {
        self.kind.symbol()
    }

    /// Returns the numeric value of the constant.
    pub fn value(&self) -> Number {
        match self.kind {
            ConstantKind::Pi => Number::Real(PI.clone()),
            ConstantKind::E => Number::Real(E.clone()),
        }
    }
}
