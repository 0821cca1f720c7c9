//! Expansion of products and powers of sums.

use crate::{number::Number, tree::{Expression, Node, Term, TermFactor}};
use super::step::{Step, StepCollector};

/// Powers of sums with integer exponents up to this value are multiplied out.
const MAX_EXPANDED_POWER: i32 = 16;

impl Node {
    /// Expands the node, multiplying out every product of sums and every small power of a sum.
    /// The result is simplified and reduced.
    pub fn expand(&self) -> Node {
        self.expand_with(&mut ())
    }

    /// Expands the node, reporting every rewrite to the step collector.
    pub fn expand_with(&self, steps: &mut dyn StepCollector<Step>) -> Node {
        let expanded = match self {
            Node::Number(_) | Node::Constant(_) | Node::Variable(_) => return self.clone(),
            Node::Factor(factor) => expand_factor(factor, steps),
            Node::Term(term) => expand_term(term, steps),
            Node::Expression(expr) => expr.terms()
                .iter()
                .map(|term| expand_term(term, steps))
                .reduce(|acc, term| acc.add(&term))
                .unwrap_or_else(|| Node::from(0)),
            Node::Function(func) => Node::Function(func.with_args(
                func.args().iter().map(|arg| arg.expand_with(steps)).collect(),
            )),
        };
        expanded.simplify_with(steps).reduce()
    }
}

/// Expands `base^exponent`. A sum raised to a small non-negative integer power is multiplied out
/// by repeated FOIL.
fn expand_factor(factor: &TermFactor, steps: &mut dyn StepCollector<Step>) -> Node {
    let base = factor.base().expand_with(steps);
    let exponent = factor.exponent().expand_with(steps);

    let power = exponent.as_number()
        .and_then(|n| n.to_i32())
        .filter(|n| (0..=MAX_EXPANDED_POWER).contains(n));
    match (base, power) {
        (Node::Expression(sum), Some(power)) => {
            if power > 1 {
                steps.push(Step::ExpandPower);
            }
            let mut product = Expression::new(vec![Term::one()]);
            for _ in 0..power {
                product = product.foil(&sum);
            }
            Node::Expression(product)
        },
        (base, _) => Node::Factor(TermFactor::new(base, exponent)),
    }
}

/// Multiplies the node into the accumulated sum of products.
fn multiply_into(acc: Expression, node: &Node, steps: &mut dyn StepCollector<Step>) -> Expression {
    match node {
        Node::Expression(sum) => {
            steps.push(Step::Foil);
            acc.foil(sum)
        },
        Node::Term(term) if !term.is_fraction() => term.extract()
            .iter()
            .fold(acc, |acc, part| multiply_into(acc, part, steps)),
        other => {
            if acc.terms().len() > 1 {
                steps.push(Step::Distribute);
            }
            acc.multiply_all(other)
        },
    }
}

/// Expands one side of a fraction into a sum, starting from its coefficient.
fn expand_side(
    coefficient: &Number,
    factors: &[TermFactor],
    steps: &mut dyn StepCollector<Step>,
) -> Expression {
    factors.iter()
        .filter(|factor| !factor.is_placeholder())
        .fold(Expression::new(vec![Term::number(coefficient.clone())]), |acc, factor| {
            let expanded = expand_factor(factor, steps).reduce();
            multiply_into(acc, &expanded, steps)
        })
}

/// Expands the numerator and denominator of a term independently.
fn expand_term(term: &Term, steps: &mut dyn StepCollector<Step>) -> Node {
    let numerator = expand_side(term.coeff_numer(), term.numerator(), steps);
    let denominator = Node::Expression(expand_side(term.coeff_denom(), term.denominator(), steps))
        .simplify()
        .reduce();

    if denominator.is_one() {
        Node::Expression(numerator)
    } else {
        Node::Expression(numerator.multiply_all(&Node::Term(Term::reciprocal_of(denominator))))
    }
}
