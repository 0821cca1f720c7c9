//! Splits raw input into lexical units.
//!
//! Before tokenizing, all whitespace is removed and every `--` is collapsed into `+`. The
//! tokenizer then runs on the cleaned text, and the lexer walks its tokens left to right,
//! inserting the markers that the surface syntax leaves out:
//!
//! - an implicit multiplication between a number and a following name (`2x`), between an
//!   operand and a following opening parenthesis (`x(`, `2(`), and after a closing parenthesis
//!   or factorial that is followed by an operand (`(x+1)y`),
//! - an explicit multiplication between a closing and an opening parenthesis (`)(`),
//! - a `-1` followed by an implicit multiplication when `-` starts the input, a parenthesized
//!   group, or a function argument, and a negation marker when `-` follows an operator.
//!
//! The two forms differ in precedence: `-x^2` is `-1 * x^2`, while the negation in `2*-x^2`
//! binds to `x` before the power is applied.
//!
//! Every unit keeps the span of the text it came from in the original input, whitespace
//! included, so errors can point back at what the user typed.

use crate::tokenizer::{tokenize_complete, TokenKind};
use std::ops::Range;

/// The kind of a lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Number,
    Name,
    Pi,
    Add,
    Sub,
    Mul,
    ImplicitMul,
    Div,
    Mod,
    Exp,
    Factorial,
    Neg,
    Comma,
    OpenParen,
    CloseParen,
    Unknown,
}

impl UnitKind {
    /// Returns true if a unit of this kind must be followed by an operand. A `-` after such a
    /// unit is a negation, not a subtraction.
    pub fn expects_operand(self) -> bool {
        matches!(
            self,
            UnitKind::Add
                | UnitKind::Sub
                | UnitKind::Mul
                | UnitKind::ImplicitMul
                | UnitKind::Div
                | UnitKind::Mod
                | UnitKind::Exp
                | UnitKind::Neg
                | UnitKind::Comma
                | UnitKind::OpenParen
        )
    }
}

impl From<TokenKind> for UnitKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Add => UnitKind::Add,
            TokenKind::Sub => UnitKind::Sub,
            TokenKind::Mul => UnitKind::Mul,
            TokenKind::Div => UnitKind::Div,
            TokenKind::Mod => UnitKind::Mod,
            TokenKind::Exp => UnitKind::Exp,
            TokenKind::Factorial => UnitKind::Factorial,
            TokenKind::Comma => UnitKind::Comma,
            TokenKind::OpenParen => UnitKind::OpenParen,
            TokenKind::CloseParen => UnitKind::CloseParen,
            TokenKind::Pi => UnitKind::Pi,
            TokenKind::Name => UnitKind::Name,
            TokenKind::Number => UnitKind::Number,
            TokenKind::Symbol => UnitKind::Unknown,
        }
    }
}

/// A single lexical unit of an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// The kind of unit.
    pub kind: UnitKind,

    /// The text of the unit. Markers inserted by the lexer use the text of the operator they
    /// stand for.
    pub lexeme: String,

    /// The region of the original input that this unit originated from. Markers inserted by
    /// the lexer have an empty span at the position they were inserted.
    pub span: Range<usize>,
}

impl Unit {
    fn new(kind: UnitKind, lexeme: impl Into<String>, span: Range<usize>) -> Self {
        Self { kind, lexeme: lexeme.into(), span }
    }
}

/// The input with whitespace removed and `--` collapsed, along with the original span of every
/// byte of the cleaned text.
struct Cleaned {
    text: String,
    origin: Vec<Range<usize>>,
}

impl Cleaned {
    fn new(input: &str) -> Self {
        let mut text = String::with_capacity(input.len());
        let mut origin = Vec::with_capacity(input.len());
        let mut chars = input.char_indices()
            .filter(|(_, c)| !c.is_whitespace())
            .peekable();

        while let Some((i, c)) = chars.next() {
            if c == '-' {
                if let Some(&(j, '-')) = chars.peek() {
                    chars.next();
                    text.push('+');
                    origin.push(i..j + 1);
                    continue;
                }
            }

            text.push(c);
            for _ in 0..c.len_utf8() {
                origin.push(i..i + c.len_utf8());
            }
        }

        Self { text, origin }
    }

    /// Maps a span of the cleaned text back to the original input.
    fn original_span(&self, span: &Range<usize>) -> Range<usize> {
        let start = self.origin[span.start].start;
        let end = self.origin[span.end - 1].end;
        start..end
    }
}

/// Returns the marker to insert between two adjacent units, if any.
fn marker_between(prev: UnitKind, next: UnitKind) -> Option<UnitKind> {
    use UnitKind::*;
    match (prev, next) {
        (Number | Name | Pi, Name | Pi) | (Pi, Number) => Some(ImplicitMul),
        (Number | Name | Pi, OpenParen) => Some(ImplicitMul),
        (CloseParen | Factorial, OpenParen) => Some(Mul),
        (CloseParen | Factorial, Number | Name | Pi) => Some(ImplicitMul),
        _ => None,
    }
}

/// Splits the input into lexical units.
pub fn lex(input: &str) -> Vec<Unit> {
    lex_at(input, 0)
}

/// Splits the input into lexical units, shifting every span right by `offset`.
///
/// This is used when the input is a slice of a larger source, such as one side of an equation.
pub fn lex_at(input: &str, offset: usize) -> Vec<Unit> {
    let cleaned = Cleaned::new(input);
    let mut units: Vec<Unit> = Vec::new();

    for token in tokenize_complete(&cleaned.text).iter() {
        let original = cleaned.original_span(&token.span);
        let span = original.start + offset..original.end + offset;
        let kind = UnitKind::from(token.kind);
        let prev = units.last().map(|unit| unit.kind);

        match (prev, kind) {
            (None | Some(UnitKind::OpenParen | UnitKind::Comma), UnitKind::Sub) => {
                units.push(Unit::new(UnitKind::Number, "-1", span.clone()));
                units.push(Unit::new(UnitKind::ImplicitMul, "*", span.end..span.end));
                continue;
            },
            (Some(prev), UnitKind::Sub) if prev.expects_operand() => {
                units.push(Unit::new(UnitKind::Neg, "-", span));
                continue;
            },
            (None, UnitKind::Add) => continue,
            (Some(prev), UnitKind::Add) if prev.expects_operand() => continue,
            (Some(UnitKind::Number), UnitKind::Number) => {
                // `1.2.3`: two literals back to back form one malformed unit
                if let Some(last) = units.last_mut() {
                    last.kind = UnitKind::Unknown;
                    last.lexeme.push_str(token.lexeme);
                    last.span.end = span.end;
                }
                continue;
            },
            _ => (),
        }

        if let Some(marker) = prev.and_then(|prev| marker_between(prev, kind)) {
            units.push(Unit::new(marker, "*", span.start..span.start));
        }
        units.push(Unit::new(kind, token.lexeme, span));
    }

    log::trace!(
        "lexed `{}` into [{}]",
        input,
        units.iter().map(|unit| unit.lexeme.as_str()).collect::<Vec<_>>().join(" "),
    );
    units
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn kinds(input: &str) -> Vec<UnitKind> {
        lex(input).into_iter().map(|unit| unit.kind).collect()
    }

    fn lexemes(input: &str) -> Vec<String> {
        lex(input).into_iter().map(|unit| unit.lexeme).collect()
    }

    #[test]
    fn implicit_multiplication() {
        use UnitKind::*;
        assert_eq!(kinds("2x"), vec![Number, ImplicitMul, Name]);
        assert_eq!(kinds("2(x)"), vec![Number, ImplicitMul, OpenParen, Name, CloseParen]);
        assert_eq!(kinds("sin(x)"), vec![Name, ImplicitMul, OpenParen, Name, CloseParen]);
        assert_eq!(kinds("2π"), vec![Number, ImplicitMul, Pi]);
    }

    #[test]
    fn explicit_multiplication_between_parens() {
        use UnitKind::*;
        assert_eq!(
            kinds("(x-1)(x+1)"),
            vec![OpenParen, Name, Sub, Number, CloseParen, Mul, OpenParen, Name, Add, Number, CloseParen],
        );
    }

    #[test]
    fn multiplication_after_close_paren() {
        use UnitKind::*;
        assert_eq!(kinds("(x)y"), vec![OpenParen, Name, CloseParen, ImplicitMul, Name]);
        assert_eq!(kinds("3!x"), vec![Number, Factorial, ImplicitMul, Name]);
    }

    #[test]
    fn leading_minus() {
        assert_eq!(lexemes("-x+1"), vec!["-1", "*", "x", "+", "1"]);
        assert_eq!(kinds("-x")[1], UnitKind::ImplicitMul);
    }

    #[test]
    fn negation_after_operator() {
        use UnitKind::*;
        assert_eq!(kinds("2*-x"), vec![Number, Mul, Neg, Name]);
        assert_eq!(kinds("x^-2"), vec![Name, Exp, Neg, Number]);
    }

    #[test]
    fn minus_starting_a_group() {
        assert_eq!(lexemes("(-x^2)"), vec!["(", "-1", "*", "x", "^", "2", ")"]);
        assert_eq!(lexemes("max(1,-x)"), vec!["max", "*", "(", "1", ",", "-1", "*", "x", ")"]);
    }

    #[test]
    fn double_negation_collapses() {
        use UnitKind::*;
        assert_eq!(kinds("x--y"), vec![Name, Add, Name]);
        assert_eq!(kinds("x - - y"), vec![Name, Add, Name]);
        assert_eq!(kinds("--y"), vec![Name]);
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(lexemes("  3 x  + 4 "), vec!["3", "*", "x", "+", "4"]);
    }

    #[test]
    fn spans_point_into_original() {
        let units = lex("12 + x_1");
        assert_eq!(units[0].span, 0..2);
        assert_eq!(units[1].span, 3..4);
        assert_eq!(units[2].span, 5..8);

        let units = lex_at("y", 4);
        assert_eq!(units[0].span, 4..5);
    }

    #[test]
    fn malformed_number() {
        let units = lex("1.2.3");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].kind, UnitKind::Unknown);
        assert_eq!(units[0].lexeme, "1.2.3");
    }

    #[test]
    fn empty_input() {
        assert_eq!(lex("   "), vec![]);
    }
}
