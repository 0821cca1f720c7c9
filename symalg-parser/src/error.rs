//! Kinds of errors that can occur while turning text into an expression tree or an equation.

use ariadne::Fmt;
use symalg_attrs::ErrorKind;
use symalg_error::EXPR;

pub use symalg_error::Error;

/// A parenthesis was not closed, or a closing parenthesis had no opening partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = if *opening {
        "unclosed parenthesis: missing closing parenthesis"
    } else {
        "unclosed parenthesis: missing opening parenthesis"
    },
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments to `{}`", name),
    labels = [format!("this call has {} argument(s)", given)],
    help = format!("`{}` takes exactly {} argument(s)", name, expected.to_string().fg(EXPR)),
)]
pub struct ArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The number of arguments the function takes.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// An operator did not have enough operands to apply to.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "parsing incomplete: too many operators",
    labels = [format!("`{}` is missing an operand", op)],
    help = format!("add an {} next to this operator", "expression".fg(EXPR)),
)]
pub struct TooManyOperators {
    /// The operator that could not be applied.
    pub op: String,
}

/// More than one operand was left over once every operator was applied.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("too many operands: {} value(s) are not connected by an operator", overflow),
    labels = ["this value is left over"],
    help = "add an operator between these values",
)]
pub struct TooManyOperands {
    /// How many operands were left over, beyond the single expected result.
    pub overflow: usize,
}

/// A lexical unit could not be classified, or its literal could not be read.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown token `{}`", lexeme),
    labels = ["I could not understand this"],
    help = "variables are single letters, optionally followed by `_` and digits, such as `x` or `x_1`",
)]
pub struct UnknownToken {
    /// The text of the token.
    pub lexeme: String,
}

/// An equation was parsed from text that has no equality sign.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an equation must include an equality sign",
    labels = ["this has no `=`"],
    help = format!("separate the two sides with a single {}", "=".fg(EXPR)),
)]
pub struct MissingEquals;

/// An equation was parsed from text with more than one equality sign.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("an equation cannot have more than one equality separator, found {}", count),
    labels = ["extra `=`"],
    help = "an equation has exactly one left side and one right side",
)]
pub struct TooManyEquals {
    /// The number of equality signs found.
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use pretty_assertions::assert_eq;
    use super::*;

    fn render(err: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(input)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn parenthesis_messages_differ() {
        let open = Error::new(vec![0..1], UnclosedParenthesis { opening: true });
        let close = Error::new(vec![0..1], UnclosedParenthesis { opening: false });
        assert!(open.to_string().contains("missing closing"));
        assert!(close.to_string().contains("missing opening"));
    }

    #[test]
    fn equality_message() {
        let err = Error::new(vec![2..3], TooManyEquals { count: 2 });
        assert_eq!(
            err.to_string(),
            "an equation cannot have more than one equality separator, found 2",
        );
    }

    #[test]
    fn every_span_is_labeled() {
        let err = Error::new(vec![3..4, 5..6], TooManyEquals { count: 3 });
        assert_eq!(render(&err, "a=b=c=d").matches("extra `=`").count(), 2);

        let err = Error::new(vec![0..1, 2..3, 4..5], TooManyOperands { overflow: 2 });
        assert_eq!(render(&err, "1 2 3").matches("this value is left over").count(), 3);
    }
}
