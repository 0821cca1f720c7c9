//! Construction of an expression tree from postfix tokens.
//!
//! The builder keeps a stack of operands. Operand tokens push a leaf, and every operator or
//! function pops its operands, combines them with the algebra, and pushes the result. Once every
//! token has been consumed, exactly one operand must remain.

use crate::{
    number::Number,
    tree::{Constant, Function, Node, TermFactor, Variable},
};
use std::ops::Range;
use symalg_parser::{
    error::{Error, TooManyOperands, TooManyOperators, UnknownToken},
    FunctionKind,
    OpKind,
    ParseToken,
    TokenClass,
};

/// A node on the operand stack, along with the region of the source it was built from.
#[derive(Debug)]
struct Operand {
    node: Node,
    span: Range<usize>,
}

/// Pops `count` operands from the stack, in the order they were pushed.
fn pop_operands(
    stack: &mut Vec<Operand>,
    count: usize,
    token: &ParseToken,
) -> Result<Vec<Operand>, Error> {
    if stack.len() < count {
        return Err(Error::new(
            vec![token.span.clone()],
            TooManyOperators { op: token.lexeme.clone() },
        ));
    }
    Ok(stack.split_off(stack.len() - count))
}

fn unknown(token: &ParseToken) -> Error {
    Error::new(vec![token.span.clone()], UnknownToken { lexeme: token.lexeme.clone() })
}

/// Builds the tree for a sequence of tokens in postfix order. An empty sequence builds the
/// number zero.
pub fn build(tokens: Vec<ParseToken>) -> Result<Node, Error> {
    let mut stack: Vec<Operand> = Vec::new();

    for token in &tokens {
        let span = token.span.clone();
        let operand = match token.class {
            TokenClass::Number => {
                let n = Number::parse_literal(&token.lexeme).ok_or_else(|| unknown(token))?;
                Operand { node: Node::Number(n), span }
            },
            TokenClass::Constant(kind) => Operand { node: Node::Constant(Constant::new(kind)), span },
            TokenClass::Variable => Operand { node: Node::Variable(Variable::new(token.lexeme.as_str())), span },
            TokenClass::Function(kind) => {
                let args = pop_operands(&mut stack, kind.arity(), token)?;
                let start = args.first().map_or(span.start, |arg| arg.span.start.min(span.start));
                let end = args.last().map_or(span.end, |arg| arg.span.end.max(span.end));
                let args = args.into_iter().map(|arg| arg.node).collect();
                Operand { node: Node::Function(Function::new(kind, args)), span: start..end }
            },
            TokenClass::Op(op) => {
                let operands = pop_operands(&mut stack, op.arity(), token)?;
                let start = operands.first().map_or(span.start, |o| o.span.start.min(span.start));
                let end = operands.last().map_or(span.end, |o| o.span.end.max(span.end));
                let mut nodes = operands.into_iter().map(|operand| operand.node);
                let node = match (op, nodes.next(), nodes.next()) {
                    (OpKind::Neg, Some(node), None) => node.multiply(&Node::from(-1)),
                    (OpKind::Factorial, Some(node), None) => {
                        Node::Function(Function::new(FunctionKind::Factorial, vec![node]))
                    },
                    (OpKind::Add, Some(lhs), Some(rhs)) => lhs.add(&rhs),
                    (OpKind::Sub, Some(lhs), Some(rhs)) => lhs.add(&rhs.multiply(&Node::from(-1))),
                    (OpKind::Mul | OpKind::ImplicitMul, Some(lhs), Some(rhs)) => lhs.multiply(&rhs),
                    (OpKind::Div, Some(lhs), Some(rhs)) => lhs.divide(&rhs),
                    (OpKind::Exp, Some(lhs), Some(rhs)) => Node::Factor(TermFactor::new(lhs, rhs)),
                    (OpKind::Mod, Some(lhs), Some(rhs)) => {
                        Node::Function(Function::new(FunctionKind::Mod, vec![lhs, rhs]))
                    },
                    _ => return Err(Error::new(
                        vec![span],
                        TooManyOperators { op: token.lexeme.clone() },
                    )),
                };
                Operand { node, span: start..end }
            },
            TokenClass::Unknown
                | TokenClass::OpenParen
                | TokenClass::CloseParen
                | TokenClass::Separator => return Err(unknown(token)),
        };
        stack.push(operand);
    }

    if stack.len() > 1 {
        let overflow = stack.len() - 1;
        let spans = stack.iter().skip(1).map(|operand| operand.span.clone()).collect();
        return Err(Error::new(spans, TooManyOperands { overflow }));
    }

    let node = stack.pop().map_or_else(|| Node::from(0), |operand| operand.node);
    log::debug!("built tree: {:?}", node);
    Ok(node)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use symalg_parser::postfix;

    fn build_str(input: &str) -> Result<Node, Error> {
        build(postfix(input)?)
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(build_str("").unwrap(), Node::from(0));
        assert_eq!(build_str("   ").unwrap(), Node::from(0));
    }

    #[test]
    fn literals() {
        assert_eq!(build_str("42").unwrap(), Node::from(42));
        assert_eq!(build_str("x_1").unwrap(), Node::Variable(Variable::new("x_1")));
        assert_eq!(build_str("π").unwrap(), Node::Constant(Constant::pi()));
    }

    #[test]
    fn operators() {
        assert_eq!(build_str("2x").unwrap().to_string(), "2x");
        assert_eq!(build_str("x^2").unwrap().to_string(), "x^2");
        assert_eq!(build_str("x - y").unwrap().to_string(), "x - y");
        assert_eq!(build_str("-x").unwrap().to_string(), "-x");
        assert_eq!(build_str("x % 3").unwrap().to_string(), "x % 3");
        assert_eq!(build_str("3!").unwrap().to_string(), "3!");
        assert_eq!(build_str("1/x").unwrap().to_string(), "1/x");
    }

    #[test]
    fn functions_take_arguments_in_order() {
        let node = build_str("max(x, 2)").unwrap();
        let Node::Function(func) = node else {
            panic!("expected a function");
        };
        assert_eq!(func.kind(), FunctionKind::Max);
        assert_eq!(func.args(), &[Node::Variable(Variable::new("x")), Node::from(2)]);
    }

    #[test]
    fn too_many_operators() {
        let err = build_str("2+").unwrap_err();
        assert!(err.to_string().contains("too many operators"));
        assert_eq!(err.spans, vec![1..2]);
    }

    #[test]
    fn unknown_tokens() {
        let err = build_str("2 + foo").unwrap_err();
        assert_eq!(err.to_string(), "unknown token `foo`");
        assert_eq!(err.spans, vec![4..7]);

        let err = build_str("1.2.3").unwrap_err();
        assert_eq!(err.to_string(), "unknown token `1.2.3`");
    }

    #[test]
    fn too_many_operands() {
        let err = build_str("(1, 2)").unwrap_err();
        assert_eq!(err.to_string(), "too many operands: 1 value(s) are not connected by an operator");
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn wrong_argument_count() {
        let err = build_str("sin(x, y)").unwrap_err();
        assert!(err.to_string().contains("wrong number of arguments"));
    }
}
