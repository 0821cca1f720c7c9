//! Operators, their precedence, and their associativity.

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`. For unary
    /// operations, this means `a op op` is evaluated as `(a op) op` (the operators appear to the
    /// right of the operand).
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*` and implicit), division (`/`), and modulo (`%`), which
    /// separate factors.
    Factor,

    /// Precedence of exponentiation (`^`).
    Exp,

    /// Precedence of unary subtraction (`-`). Negation applies to its adjacent operand before
    /// any binary operator, so `2*-x^2` is `2 * (-x)^2`.
    Neg,

    /// Precedence of factorial (`!`).
    Factorial,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

/// The operation an operator token performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Add,
    Sub,
    Mul,
    ImplicitMul,
    Div,
    Mod,
    Exp,
    Neg,
    Factorial,
}

impl OpKind {
    /// Returns the precedence of the operation.
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Term,
            Self::Mul | Self::ImplicitMul | Self::Div | Self::Mod => Precedence::Factor,
            Self::Neg => Precedence::Neg,
            Self::Exp => Precedence::Exp,
            Self::Factorial => Precedence::Factorial,
        }
    }

    /// Returns the associativity of the operation.
    pub fn associativity(self) -> Associativity {
        match self {
            Self::Exp | Self::Neg => Associativity::Right,
            Self::Add | Self::Sub | Self::Mul | Self::ImplicitMul | Self::Div | Self::Mod
                | Self::Factorial => Associativity::Left,
        }
    }

    /// Returns the number of operands the operation takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Neg | Self::Factorial => 1,
            _ => 2,
        }
    }

    /// Returns the symbol of the operation.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub | Self::Neg => "-",
            Self::Mul | Self::ImplicitMul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Exp => "^",
            Self::Factorial => "!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order() {
        assert!(Precedence::Term < Precedence::Factor);
        assert!(Precedence::Factor < Precedence::Exp);
        assert!(Precedence::Exp < Precedence::Neg);
        assert!(Precedence::Neg < Precedence::Factorial);
        assert!(OpKind::ImplicitMul.precedence() == OpKind::Div.precedence());
    }
}
