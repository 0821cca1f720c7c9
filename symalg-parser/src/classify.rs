//! Classification of lexical units into the tokens consumed by the shunting-yard converter.

use crate::{lexer::{Unit, UnitKind}, op::OpKind};
use std::ops::Range;

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstantKind {
    /// The ratio of a circle's circumference to its diameter, `π`.
    Pi,

    /// Euler's number, `e`.
    E,
}

impl ConstantKind {
    /// Returns the constant with the given name, if any. `π` may be written as `pi` or `π`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" | "π" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    /// Returns the symbol used to display the constant.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
        }
    }
}

/// A builtin function. [`FunctionKind::Mod`] and [`FunctionKind::Factorial`] are also produced by
/// the `%` and `!` operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FunctionKind {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Ln,
    Log,
    Abs,
    Min,
    Max,
    Mod,
    Factorial,
}

impl FunctionKind {
    /// Returns the function that can be called with the given name. The factorial function can
    /// only be written with `!`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sqrt" => Self::Sqrt,
            "ln" => Self::Ln,
            "log" => Self::Log,
            "abs" => Self::Abs,
            "min" => Self::Min,
            "max" => Self::Max,
            "mod" => Self::Mod,
            _ => return None,
        })
    }

    /// Returns the name of the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sqrt => "sqrt",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Abs => "abs",
            Self::Min => "min",
            Self::Max => "max",
            Self::Mod => "mod",
            Self::Factorial => "factorial",
        }
    }

    /// Returns the number of arguments the function takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Min | Self::Max | Self::Mod => 2,
            _ => 1,
        }
    }
}

/// The class of a [`ParseToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// A numeric literal.
    Number,

    /// A named constant.
    Constant(ConstantKind),

    /// A variable, such as `x` or `x_1`.
    Variable,

    /// A function name that is followed by an argument list.
    Function(FunctionKind),

    /// An operator.
    Op(OpKind),

    /// `(`
    OpenParen,

    /// `)`
    CloseParen,

    /// `,`
    Separator,

    /// A unit that could not be classified.
    Unknown,
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseToken {
    /// The class of the token.
    pub class: TokenClass,

    /// The text of the token.
    pub lexeme: String,

    /// The region of the source code that this token originated from.
    pub span: Range<usize>,
}

impl ParseToken {
    /// Returns true if the token is an operand (number, constant, variable, or unknown).
    pub fn is_operand(&self) -> bool {
        matches!(
            self.class,
            TokenClass::Number | TokenClass::Constant(_) | TokenClass::Variable | TokenClass::Unknown
        )
    }
}

/// Returns true if the name is a valid variable name: a single letter, optionally followed by
/// `_` and one or more digits.
pub fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => (),
        _ => return false,
    }

    match chars.next() {
        None => true,
        Some('_') => {
            let subscript = chars.as_str();
            !subscript.is_empty() && subscript.chars().all(|c| c.is_ascii_digit())
        },
        Some(_) => false,
    }
}

/// Classifies the name at `units[idx]`.
fn classify_name(units: &[Unit], idx: usize) -> TokenClass {
    let name = units[idx].lexeme.as_str();
    if let Some(constant) = ConstantKind::from_name(name) {
        return TokenClass::Constant(constant);
    }

    if let Some(function) = FunctionKind::from_name(name) {
        let called = matches!(
            (units.get(idx + 1).map(|u| u.kind), units.get(idx + 2).map(|u| u.kind)),
            (Some(UnitKind::ImplicitMul), Some(UnitKind::OpenParen))
        );
        if called {
            return TokenClass::Function(function);
        }
    }

    if is_variable_name(name) {
        TokenClass::Variable
    } else {
        TokenClass::Unknown
    }
}

/// Classifies every lexical unit.
pub fn classify(units: Vec<Unit>) -> Vec<ParseToken> {
    let classes = (0..units.len())
        .map(|idx| match units[idx].kind {
            UnitKind::Number => TokenClass::Number,
            UnitKind::Name => classify_name(&units, idx),
            UnitKind::Pi => TokenClass::Constant(ConstantKind::Pi),
            UnitKind::Add => TokenClass::Op(OpKind::Add),
            UnitKind::Sub => TokenClass::Op(OpKind::Sub),
            UnitKind::Mul => TokenClass::Op(OpKind::Mul),
            UnitKind::ImplicitMul => TokenClass::Op(OpKind::ImplicitMul),
            UnitKind::Div => TokenClass::Op(OpKind::Div),
            UnitKind::Mod => TokenClass::Op(OpKind::Mod),
            UnitKind::Exp => TokenClass::Op(OpKind::Exp),
            UnitKind::Factorial => TokenClass::Op(OpKind::Factorial),
            UnitKind::Neg => TokenClass::Op(OpKind::Neg),
            UnitKind::Comma => TokenClass::Separator,
            UnitKind::OpenParen => TokenClass::OpenParen,
            UnitKind::CloseParen => TokenClass::CloseParen,
            UnitKind::Unknown => TokenClass::Unknown,
        })
        .collect::<Vec<_>>();

    units.into_iter()
        .zip(classes)
        .map(|(unit, class)| ParseToken { class, lexeme: unit.lexeme, span: unit.span })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::lexer::lex;
    use pretty_assertions::assert_eq;
    use super::*;

    fn classes(input: &str) -> Vec<TokenClass> {
        classify(lex(input)).into_iter().map(|t| t.class).collect()
    }

    #[test]
    fn variables() {
        assert!(is_variable_name("x"));
        assert!(is_variable_name("x_12"));
        assert!(!is_variable_name("x_"));
        assert!(!is_variable_name("xy"));
        assert!(!is_variable_name("x1"));
        assert!(!is_variable_name("_1"));
    }

    #[test]
    fn constants() {
        assert_eq!(
            classes("pi+π+e"),
            vec![
                TokenClass::Constant(ConstantKind::Pi),
                TokenClass::Op(OpKind::Add),
                TokenClass::Constant(ConstantKind::Pi),
                TokenClass::Op(OpKind::Add),
                TokenClass::Constant(ConstantKind::E),
            ],
        );
    }

    #[test]
    fn function_requires_parenthesis() {
        assert_eq!(classes("sin(x)")[0], TokenClass::Function(FunctionKind::Sin));
        assert_eq!(classes("sin")[0], TokenClass::Unknown);
        assert_eq!(classes("max(x,y)")[4], TokenClass::Separator);
    }

    #[test]
    fn unknown_names() {
        assert_eq!(classes("foo")[0], TokenClass::Unknown);
        assert_eq!(classes("$")[0], TokenClass::Unknown);
    }

    #[test]
    fn operators() {
        assert_eq!(
            classes("-2x^3!"),
            vec![
                TokenClass::Number,
                TokenClass::Op(OpKind::ImplicitMul),
                TokenClass::Number,
                TokenClass::Op(OpKind::ImplicitMul),
                TokenClass::Variable,
                TokenClass::Op(OpKind::Exp),
                TokenClass::Number,
                TokenClass::Op(OpKind::Factorial),
            ],
        );
    }
}
