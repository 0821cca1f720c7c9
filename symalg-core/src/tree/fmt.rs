//! Rendering of trees as canonical infix text that parses back into an equal tree.

use crate::number::Number;
use std::fmt::{self, Display, Formatter};
use super::{Constant, Expression, Function, Node, Term, TermFactor, Variable};
use symalg_parser::FunctionKind;

/// Returns true if the node can be printed next to an operator without parentheses.
fn is_atomic(node: &Node) -> bool {
    match node {
        Node::Number(n) => !n.is_negative() && (n.is_integer() || !n.is_exact()),
        Node::Constant(_) | Node::Variable(_) => true,
        Node::Function(func) => func.kind() != FunctionKind::Mod,
        Node::Factor(_) | Node::Term(_) | Node::Expression(_) => false,
    }
}

/// Writes the node, wrapped in parentheses unless it is atomic.
fn write_operand(f: &mut Formatter<'_>, node: &Node) -> fmt::Result {
    if is_atomic(node) {
        write!(f, "{}", node)
    } else {
        write!(f, "({})", node)
    }
}

/// Renders a coefficient and a list of factors as a product. The coefficient is left out if it
/// is one, and written as a lone `-` if it is negative one. The first factor is juxtaposed with
/// the coefficient, and the rest are joined with `*`.
fn product(coefficient: &Number, factors: &[&TermFactor]) -> String {
    let mut out = String::new();
    if factors.is_empty() {
        return coefficient_text(coefficient);
    }

    if coefficient.neg().is_one() {
        out.push('-');
    } else if !coefficient.is_one() {
        out.push_str(&coefficient_text(coefficient));
    }

    for (i, factor) in factors.iter().enumerate() {
        let text = factor.to_string();
        let starts_with_digit = text.starts_with(|c: char| c.is_ascii_digit() || c == '.');
        if i > 0 || (starts_with_digit && !out.is_empty() && out != "-") {
            out.push('*');
        }
        out.push_str(&text);
    }
    out
}

/// Renders a coefficient on its own, parenthesizing fractions so that they bind as one value.
fn coefficient_text(n: &Number) -> String {
    if n.is_exact() && !n.is_integer() {
        format!("({})", n)
    } else {
        n.to_string()
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Display for TermFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_operand(f, self.base())?;
        if !self.has_unit_exponent() {
            write!(f, "^")?;
            write_operand(f, self.exponent())?;
        }
        Ok(())
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_nan() {
            return write!(f, "NaN");
        }
        if self.is_zero() {
            return write!(f, "0");
        }

        let visible = |factors: &[TermFactor]| {
            factors.iter().filter(|factor| !factor.is_placeholder()).collect::<Vec<_>>()
        };
        let numerator = visible(self.numerator());
        let denominator = visible(self.denominator());

        // a plain rational prints as `n/d`
        if numerator.is_empty() && denominator.is_empty() {
            let value = self.coeff_numer().div(self.coeff_denom());
            return write!(f, "{}", value);
        }

        let (coeff_numer, coeff_denom) = if self.coeff_numer().is_exact() && self.coeff_denom().is_exact() {
            (self.coeff_numer().clone(), self.coeff_denom().clone())
        } else {
            (self.coeff_numer().div(self.coeff_denom()), Number::one())
        };

        write!(f, "{}", product(&coeff_numer, &numerator))?;
        if coeff_denom.is_one() && denominator.is_empty() {
            return Ok(());
        }

        let components = denominator.len() + usize::from(!coeff_denom.is_one());
        let text = product(&coeff_denom, &denominator);
        if components > 1 || coeff_denom.is_negative() || text.starts_with('-') {
            write!(f, "/({})", text)
        } else {
            write!(f, "/{}", text)
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut terms = self.terms().iter();
        if let Some(first) = terms.next() {
            write!(f, "{}", first)?;
        }
        for term in terms {
            if term.is_negative() {
                write!(f, " - {}", term.negated())?;
            } else {
                write!(f, " + {}", term)?;
            }
        }
        Ok(())
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.kind(), self.args()) {
            (FunctionKind::Mod, [lhs, rhs]) => {
                write_operand(f, lhs)?;
                write!(f, " % ")?;
                write_operand(f, rhs)
            },
            (FunctionKind::Factorial, [arg]) => {
                write_operand(f, arg)?;
                write!(f, "!")
            },
            (_, args) => {
                write!(f, "{}(", self.name())?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Constant(c) => write!(f, "{}", c),
            Self::Variable(var) => write!(f, "{}", var),
            Self::Factor(factor) => write!(f, "{}", factor),
            Self::Term(term) => write!(f, "{}", term),
            Self::Expression(expr) => write!(f, "{}", expr),
            Self::Function(func) => write!(f, "{}", func),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::Variable;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Node {
        Node::Variable(Variable::new("x"))
    }

    fn y() -> Node {
        Node::Variable(Variable::new("y"))
    }

    #[test]
    fn coefficients() {
        assert_eq!(Term::from_node(x()).to_string(), "x");
        assert_eq!(Term::from_node(x()).multiply(&Node::from(-1)).to_string(), "-x");
        assert_eq!(Term::from_node(x()).multiply(&Node::from(3)).multiply(&y()).to_string(), "3x*y");
        assert_eq!(Term::number(Number::from(-1)).to_string(), "-1");
    }

    #[test]
    fn fractions() {
        assert_eq!(Term::fraction(Node::from(2), Node::from(3)).to_string(), "2/3");
        assert_eq!(Term::fraction(x(), Node::from(3)).to_string(), "x/3");
        assert_eq!(Term::fraction(x(), y()).multiply(&Node::from(2)).to_string(), "2x/y");
        let over_3y = Term::fraction(x(), Node::Term(Term::from_node(y()).multiply(&Node::from(3))));
        assert_eq!(over_3y.to_string(), "x/(3y)");
    }

    #[test]
    fn powers() {
        let square = TermFactor::new(x(), Node::from(2));
        assert_eq!(square.to_string(), "x^2");
        assert_eq!(TermFactor::new(Node::from(2), x()).to_string(), "2^x");
        assert_eq!(TermFactor::new(x(), Node::from(-1)).to_string(), "x^(-1)");
        let two_to_x = Term::from_node(Node::Factor(TermFactor::new(Node::from(2), x())));
        assert_eq!(two_to_x.multiply(&Node::from(3)).to_string(), "3*2^x");
    }

    #[test]
    fn sums() {
        let expr = Expression::new(vec![
            Term::from_node(x()).multiply(&Node::from(2)),
            Term::number(Number::from(-5)),
            Term::from_node(y()),
        ]);
        assert_eq!(expr.to_string(), "2x - 5 + y");
        assert_eq!(Expression::new(Vec::new()).to_string(), "0");
    }

    #[test]
    fn compound_factors_are_parenthesized() {
        let sum = Node::Expression(Expression::new(vec![Term::from_node(x()), Term::one()]));
        let term = Term::from_node(sum.clone()).multiply(&sum);
        assert_eq!(term.to_string(), "(x + 1)*(x + 1)");
    }

    #[test]
    fn functions() {
        let modulus = Function::new(FunctionKind::Mod, vec![x(), Node::from(3)]);
        assert_eq!(modulus.to_string(), "x % 3");
        let factorial = Function::new(FunctionKind::Factorial, vec![Node::from(4)]);
        assert_eq!(factorial.to_string(), "4!");
        let max = Function::new(FunctionKind::Max, vec![x(), y()]);
        assert_eq!(max.to_string(), "max(x, y)");
        assert_eq!(Node::Constant(Constant::pi()).to_string(), "π");
    }
}
