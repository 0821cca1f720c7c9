//! Reduction of trivial wrappers.
//!
//! Reduction replaces a [`Term`], [`TermFactor`] or [`Expression`] by something simpler when it
//! only wraps a single value, such as the term `1 * x^1 / 1`, which reduces to `x`.

use crate::tree::{Expression, Node, Term, TermFactor};

impl Node {
    /// Reduces trivial wrappers anywhere in the tree.
    pub fn reduce(&self) -> Node {
        match self {
            Node::Number(_) | Node::Constant(_) | Node::Variable(_) => self.clone(),
            Node::Factor(factor) => reduce_factor(factor),
            Node::Term(term) => reduce_term(term),
            Node::Expression(expr) => match expr.terms() {
                [term] => reduce_term(term),
                terms => Node::Expression(Expression::new(terms.iter().map(reduce_inside).collect())),
            },
            Node::Function(func) => Node::Function(func.with_args(
                func.args().iter().map(Node::reduce).collect(),
            )),
        }
    }
}

/// Reduces a factor. The exponent is reduced first, so that an exponent such as `2/2` is seen
/// as one.
fn reduce_factor(factor: &TermFactor) -> Node {
    let exponent = factor.exponent().reduce();
    match &exponent {
        Node::Number(n) if n.is_zero() => Node::from(1),
        Node::Number(n) if n.is_one() => factor.base().reduce(),
        _ => Node::Factor(TermFactor::new(factor.base().reduce(), exponent)),
    }
}

/// Reduces the bases and exponents of a term's factors, keeping the term itself.
fn reduce_inside(term: &Term) -> Term {
    let reduce_all = |factors: &[TermFactor]| {
        factors.iter()
            .map(|factor| TermFactor::new(factor.base().reduce(), factor.exponent().reduce()))
            .collect::<Vec<_>>()
    };
    Term::from_parts(
        term.coeff_numer().clone(),
        term.coeff_denom().clone(),
        reduce_all(term.numerator()),
        reduce_all(term.denominator()),
    )
}

fn reduce_term(term: &Term) -> Node {
    let term = reduce_inside(term);

    if term.has_trivial_numerator() && term.has_trivial_denominator() {
        let value = term.coeff_numer().div(term.coeff_denom());
        if term.coeff_denom().is_one() || value.is_integer() {
            return Node::Number(value);
        }
    }

    let unit_coefficient = term.coeff_numer().is_one() && term.coeff_denom().is_one();
    if unit_coefficient && term.has_trivial_denominator() {
        if let [factor] = term.numerator() {
            return reduce_factor(factor);
        }
    }

    Node::Term(term)
}
