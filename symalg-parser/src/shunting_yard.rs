//! Conversion of a classified infix token stream into postfix (RPN) order.
//!
//! The converter is an explicit stack machine. Operands go straight to the output; operators wait
//! on the operator stack until an operator of lower precedence arrives, or until the enclosing
//! parentheses close. Functions wait on the stack below their argument list and are emitted once
//! the list closes, so that in the output every function directly follows its arguments.

use crate::{
    classify::{FunctionKind, ParseToken, TokenClass},
    error::{ArgumentCount, Error, UnclosedParenthesis},
    op::{Associativity, OpKind},
};
use std::ops::Range;

/// Bookkeeping for an open parenthesis.
#[derive(Debug)]
struct Group {
    /// The function this parenthesis belongs to, along with the span of its name.
    function: Option<(FunctionKind, Range<usize>)>,

    /// The number of argument separators seen directly inside the group.
    separators: usize,

    /// Whether no token has been seen inside the group yet.
    empty: bool,
}

/// Returns true if `top`, an operator on the operator stack, must be output before `incoming`
/// is pushed.
fn pops_before(top: OpKind, incoming: OpKind) -> bool {
    top.precedence() > incoming.precedence()
        || (top.precedence() == incoming.precedence()
            && incoming.associativity() == Associativity::Left)
}

/// Converts the classified infix tokens into postfix order.
pub fn to_postfix(tokens: Vec<ParseToken>) -> Result<Vec<ParseToken>, Error> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<ParseToken> = Vec::new();
    let mut groups: Vec<Group> = Vec::new();
    let mut tokens = tokens.into_iter().peekable();

    while let Some(token) = tokens.next() {
        if !matches!(token.class, TokenClass::CloseParen | TokenClass::Separator) {
            if let Some(group) = groups.last_mut() {
                group.empty = false;
            }
        }

        match token.class {
            TokenClass::Number
                | TokenClass::Constant(_)
                | TokenClass::Variable
                | TokenClass::Unknown => output.push(token),
            TokenClass::Function(_) => {
                // the parenthesis groups the arguments instead
                if tokens.peek().map(|t| t.class) == Some(TokenClass::Op(OpKind::ImplicitMul)) {
                    tokens.next();
                }
                stack.push(token);
            },
            TokenClass::Op(OpKind::Neg) => stack.push(token),
            TokenClass::Op(OpKind::Factorial) => output.push(token),
            TokenClass::Op(incoming) => {
                while let Some(TokenClass::Op(top)) = stack.last().map(|t| t.class) {
                    if !pops_before(top, incoming) {
                        break;
                    }
                    output.extend(stack.pop());
                }
                stack.push(token);
            },
            TokenClass::Separator => {
                while let Some(top) = stack.last() {
                    if top.class == TokenClass::OpenParen {
                        break;
                    }
                    output.extend(stack.pop());
                }
                if let Some(group) = groups.last_mut() {
                    group.separators += 1;
                }
            },
            TokenClass::OpenParen => {
                let function = match stack.last() {
                    Some(ParseToken { class: TokenClass::Function(kind), span, .. }) => {
                        Some((*kind, span.clone()))
                    },
                    _ => None,
                };
                groups.push(Group { function, separators: 0, empty: true });
                stack.push(token);
            },
            TokenClass::CloseParen => {
                loop {
                    match stack.pop() {
                        Some(ParseToken { class: TokenClass::OpenParen, .. }) => break,
                        Some(top) => output.push(top),
                        None => return Err(Error::new(
                            vec![token.span],
                            UnclosedParenthesis { opening: false },
                        )),
                    }
                }

                if let Some(Group { function: Some((kind, name_span)), separators, empty }) = groups.pop() {
                    let given = if empty && separators == 0 { 0 } else { separators + 1 };
                    if given != kind.arity() {
                        return Err(Error::new(
                            vec![name_span.start..token.span.end],
                            ArgumentCount { name: kind.name().to_string(), expected: kind.arity(), given },
                        ));
                    }
                    output.extend(stack.pop());
                }
            },
        }
    }

    while let Some(top) = stack.pop() {
        if top.class == TokenClass::OpenParen {
            return Err(Error::new(vec![top.span], UnclosedParenthesis { opening: true }));
        }
        output.push(top);
    }

    log::debug!(
        "postfix: {}",
        output.iter().map(|t| t.lexeme.as_str()).collect::<Vec<_>>().join(" "),
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use crate::{classify::classify, lexer::lex};
    use pretty_assertions::assert_eq;
    use super::*;

    fn rpn(input: &str) -> String {
        to_postfix(classify(lex(input)))
            .unwrap()
            .into_iter()
            .map(|t| t.lexeme)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn rpn_err(input: &str) -> String {
        to_postfix(classify(lex(input))).unwrap_err().to_string()
    }

    #[test]
    fn precedence() {
        assert_eq!(rpn("1+2*3"), "1 2 3 * +");
        assert_eq!(rpn("(1+2)*3"), "1 2 + 3 *");
        assert_eq!(rpn("a-b-c"), "a b - c -");
        assert_eq!(rpn("a/b*c"), "a b / c *");
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(rpn("2^3^2"), "2 3 2 ^ ^");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(rpn("2x^2"), "2 x 2 ^ *");
        assert_eq!(rpn("2x/3"), "2 x * 3 /");
    }

    #[test]
    fn functions() {
        assert_eq!(rpn("sin(x)^2"), "x sin 2 ^");
        assert_eq!(rpn("max(1,2+3)"), "1 2 3 + max");
        assert_eq!(rpn("2sqrt(x+1)"), "2 x 1 + sqrt *");
        assert_eq!(rpn("min(max(a,b),c)"), "a b max c min");
    }

    #[test]
    fn unary_operators() {
        assert_eq!(rpn("-x^2"), "-1 x 2 ^ *");
        assert_eq!(rpn("2*-x^2"), "2 x - 2 ^ *");
        assert_eq!(rpn("x^-2"), "x 2 - ^");
        assert_eq!(rpn("2*-(x+1)^2"), "2 x 1 + - 2 ^ *");
        assert_eq!(rpn("2*-x*3"), "2 x - * 3 *");
        assert_eq!(rpn("3!+1"), "3 ! 1 +");
        assert_eq!(rpn("x^2!"), "x 2 ! ^");
    }

    #[test]
    fn modulus() {
        assert_eq!(rpn("a%b+c"), "a b % c +");
    }

    #[test]
    fn unbalanced_parentheses() {
        assert!(rpn_err("(1+2").contains("missing closing parenthesis"));
        assert!(rpn_err("1+2)").contains("missing opening parenthesis"));
        assert!(rpn_err("sin(x").contains("missing closing parenthesis"));
    }

    #[test]
    fn unclosed_paren_span() {
        let err = to_postfix(classify(lex("2 * (x + 1"))).unwrap_err();
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn argument_count() {
        assert_eq!(rpn_err("max(1)"), "wrong number of arguments to `max`");
        assert_eq!(rpn_err("sin()"), "wrong number of arguments to `sin`");
        assert_eq!(rpn_err("sin(1,2)"), "wrong number of arguments to `sin`");
    }
}
