//! Simplification into canonical form.
//!
//! A simplified [`Term`] has an integer coefficient pair with no common factor and the sign in
//! the numerator, at most one factor per base, and no base that appears with a numeric exponent
//! on both sides of the fraction bar. A simplified [`Expression`] has no zero terms, no two like
//! terms, and its terms sorted by descending highest power.

use crate::{
    number::Number,
    primitive::rational,
    tree::{Expression, Node, Term, TermFactor},
};
use std::cmp::Ordering;
use super::step::{Step, StepCollector};

impl Node {
    /// Simplifies the node.
    pub fn simplify(&self) -> Node {
        self.simplify_with(&mut ())
    }

    /// Simplifies the node, reporting every rewrite to the step collector.
    pub fn simplify_with(&self, steps: &mut dyn StepCollector<Step>) -> Node {
        match self {
            Node::Number(_) | Node::Constant(_) | Node::Variable(_) => self.clone(),
            Node::Factor(factor) => simplify_factor(factor, steps),
            Node::Term(term) => Node::Term(simplify_term(term, steps)),
            Node::Expression(expr) => Node::Expression(simplify_expression(expr, steps)),
            Node::Function(func) => Node::Function(func.with_args(
                func.args().iter().map(|arg| arg.simplify_with(steps)).collect(),
            )),
        }
    }
}

/// Simplifies a factor on its own, returning either a [`Node::Number`] if its value is exact, or
/// a [`Node::Factor`].
fn simplify_factor(factor: &TermFactor, steps: &mut dyn StepCollector<Step>) -> Node {
    let base = factor.base().simplify_with(steps);
    let exponent = simplify_exponent(factor.exponent(), steps);

    if exponent.is_zero() {
        steps.push(Step::DropZeroExponent);
        return Node::from(1);
    }

    // (b^m)^n = b^(mn) for integer n
    let (base, exponent) = match (base, exponent) {
        (Node::Factor(inner), Node::Number(n)) if n.is_integer() => {
            steps.push(Step::PowerOfPower);
            let (inner_base, inner_exponent) = inner.into_parts();
            let exponent = simplify_exponent(&inner_exponent.multiply(&Node::Number(n)), steps);
            (inner_base, exponent)
        },
        parts => parts,
    };

    let factor = TermFactor::new(base, exponent);
    match factor.extract_numbers() {
        Some(n) => Node::Number(n),
        None => Node::Factor(factor),
    }
}

/// Simplifies an exponent. An exponent with an exact value, such as `4/2`, becomes a plain
/// [`Node::Number`], so that it compares equal to the same number written directly.
fn simplify_exponent(exponent: &Node, steps: &mut dyn StepCollector<Step>) -> Node {
    let exponent = exponent.simplify_with(steps);
    match exponent.extract_numbers() {
        Some(n) if !n.is_nan() => Node::Number(n),
        _ => exponent,
    }
}

/// A factor list under construction, with like bases merged.
struct Factors {
    entries: Vec<(Node, Node)>,
}

impl Factors {
    fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Multiplies the list by `base^exponent`, summing exponents if the base is already present.
    fn insert(&mut self, base: Node, exponent: Node, steps: &mut dyn StepCollector<Step>) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == base) {
            Some((_, existing)) => {
                steps.push(Step::CombineLikeFactors);
                *existing = simplify_exponent(&existing.add(&exponent), steps);
            },
            None => self.entries.push((base, exponent)),
        }
    }

    fn into_factors(self) -> Vec<TermFactor> {
        self.entries.into_iter()
            .map(|(base, exponent)| TermFactor::new(base, exponent))
            .collect()
    }
}

/// Simplifies every factor of one side of a term into `own`, moving numbers into `coefficient`.
/// Sub-terms raised to the power one are flattened, and their denominators are moved into
/// `other` and `other_coefficient`.
fn collect_side(
    factors: &[TermFactor],
    coefficient: &mut Number,
    own: &mut Factors,
    other_coefficient: &mut Number,
    other: &mut Factors,
    steps: &mut dyn StepCollector<Step>,
) {
    for factor in factors.iter().filter(|factor| !factor.is_placeholder()) {
        match simplify_factor(factor, steps) {
            Node::Number(n) => *coefficient = coefficient.mul(&n),
            Node::Factor(factor) => {
                let unit_exponent = factor.has_unit_exponent();
                match factor.into_parts() {
                    (Node::Term(inner), _) if unit_exponent => {
                        let inner = simplify_term(&inner, steps);
                        let (numer, denom, inner_numerator, inner_denominator) = inner.into_parts();
                        *coefficient = coefficient.mul(&numer);
                        *other_coefficient = other_coefficient.mul(&denom);
                        for factor in inner_numerator.into_iter().filter(|f| !f.is_placeholder()) {
                            let (base, exponent) = factor.into_parts();
                            own.insert(base, exponent, steps);
                        }
                        for factor in inner_denominator.into_iter().filter(|f| !f.is_placeholder()) {
                            let (base, exponent) = factor.into_parts();
                            other.insert(base, exponent, steps);
                        }
                    },
                    (base, exponent) => own.insert(base, exponent, steps),
                }
            },
            other => own.insert(other, Node::from(1), steps),
        }
    }
}

/// Removes bases with numeric exponents that appear on both sides of the fraction bar, keeping
/// the difference of the exponents on the side where it is positive.
fn cancel_common(numerator: &mut Factors, denominator: &mut Factors, steps: &mut dyn StepCollector<Step>) {
    let mut i = 0;
    while i < numerator.entries.len() {
        let (base, exponent) = &numerator.entries[i];
        let Node::Number(numer_exp) = exponent else {
            i += 1;
            continue;
        };

        let found = denominator.entries.iter().position(|(other, exponent)| {
            other == base && matches!(exponent, Node::Number(_))
        });
        let Some(j) = found else {
            i += 1;
            continue;
        };

        steps.push(Step::CancelCommonFactors);
        let Node::Number(denom_exp) = &denominator.entries[j].1 else {
            i += 1;
            continue;
        };
        let difference = numer_exp.sub(denom_exp);
        if difference.is_negative() {
            denominator.entries[j].1 = Node::Number(difference.neg());
            numerator.entries.remove(i);
        } else if difference.is_zero() {
            denominator.entries.remove(j);
            numerator.entries.remove(i);
        } else {
            numerator.entries[i].1 = Node::Number(difference);
            denominator.entries.remove(j);
            i += 1;
        }
    }
}

/// Reduces a coefficient pair to lowest terms, returning [`None`] if the denominator is zero or
/// either part is NaN.
///
/// Exact pairs become integers with no common factor and a positive denominator. Pairs involving
/// a real number are divided out, leaving a denominator of one.
fn normalize_coefficient(numer: &Number, denom: &Number) -> Option<(Number, Number)> {
    if denom.is_zero() || numer.is_nan() || denom.is_nan() {
        return None;
    }

    match numer.div(denom) {
        Number::Rational(value) => {
            let (numer, denom) = value.into_numer_denom();
            Some((Number::from(rational(numer)), Number::from(rational(denom))))
        },
        real => Some((real, Number::one())),
    }
}

/// Simplifies a term.
fn simplify_term(term: &Term, steps: &mut dyn StepCollector<Step>) -> Term {
    if term.is_nan() {
        return Term::nan();
    }
    if term.is_zero() {
        return Term::zero();
    }

    let mut coeff_numer = term.coeff_numer().clone();
    let mut coeff_denom = term.coeff_denom().clone();
    let mut numerator = Factors::new();
    let mut denominator = Factors::new();

    collect_side(term.numerator(), &mut coeff_numer, &mut numerator, &mut coeff_denom, &mut denominator, steps);
    collect_side(term.denominator(), &mut coeff_denom, &mut denominator, &mut coeff_numer, &mut numerator, steps);
    cancel_common(&mut numerator, &mut denominator, steps);

    let Some((numer, denom)) = normalize_coefficient(&coeff_numer, &coeff_denom) else {
        return Term::nan();
    };
    if numer != coeff_numer || denom != coeff_denom {
        steps.push(Step::ReduceCoefficient);
    }
    if numer.is_zero() {
        return Term::zero();
    }

    // merging can produce numeric factors, which are folded into the coefficient and may leave
    // it unreduced again, such as `4^(1/2) * 4^(1/2) / 6`
    let rebuilt = Term::from_parts(
        numer.clone(),
        denom.clone(),
        numerator.into_factors(),
        denominator.into_factors(),
    );
    if *rebuilt.coeff_numer() == numer && *rebuilt.coeff_denom() == denom {
        return rebuilt;
    }

    match normalize_coefficient(rebuilt.coeff_numer(), rebuilt.coeff_denom()) {
        Some((numer, _)) if numer.is_zero() => Term::zero(),
        Some((numer, denom)) => {
            let (_, _, numerator, denominator) = rebuilt.into_parts();
            Term::from_parts(numer, denom, numerator, denominator)
        },
        None => Term::nan(),
    }
}

/// Simplifies an expression.
fn simplify_expression(expr: &Expression, steps: &mut dyn StepCollector<Step>) -> Expression {
    let mut terms = Vec::with_capacity(expr.terms().len());
    for term in expr.terms() {
        let term = simplify_term(term, steps);
        match Node::Term(term.clone()).reduce() {
            Node::Expression(inner) => {
                steps.push(Step::FlattenSum);
                terms.extend(simplify_expression(&inner, steps).into_terms());
            },
            _ => terms.push(term),
        }
    }

    let before = terms.len();
    terms.retain(|term| !term.is_zero());
    if terms.len() != before {
        steps.push(Step::DropZeroTerms);
    }

    let mut combined: Vec<Term> = Vec::with_capacity(terms.len());
    for term in terms {
        match combined.iter_mut().find(|existing| existing.is_like_term(&term)) {
            Some(existing) => {
                steps.push(Step::CombineLikeTerms);
                *existing = simplify_term(&existing.combine_like(&term), steps);
            },
            None => combined.push(term),
        }
    }
    combined.retain(|term| !term.is_zero());

    let is_sorted = combined.windows(2)
        .all(|pair| pair[0].highest_power() >= pair[1].highest_power());
    if !is_sorted {
        steps.push(Step::SortTerms);
        combined.sort_by(|a, b| {
            b.highest_power()
                .partial_cmp(&a.highest_power())
                .unwrap_or(Ordering::Equal)
        });
    }

    Expression::new(combined)
}

#[cfg(test)]
mod tests {
    use crate::tree::Variable;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Node {
        Node::Variable(Variable::new("x"))
    }

    fn pow(base: Node, exponent: i32) -> Node {
        Node::Factor(TermFactor::new(base, Node::from(exponent)))
    }

    #[test]
    fn coefficient_lowest_terms() {
        let term = Node::from(4).divide(&Node::from(6)).simplify();
        assert_eq!(term.to_string(), "2/3");

        let term = Node::from(6).divide(&Node::from(-4)).multiply(&x()).simplify();
        let Node::Term(term) = term else {
            panic!("expected a term");
        };
        assert_eq!(term.coeff_numer(), &Number::from(-3));
        assert_eq!(term.coeff_denom(), &Number::from(2));
    }

    #[test]
    fn like_factors_merge() {
        let term = pow(x(), 2).multiply(&pow(x(), 3)).simplify();
        assert_eq!(term.to_string(), "x^5");

        let term = x().multiply(&x()).simplify();
        assert_eq!(term.to_string(), "x^2");
    }

    #[test]
    fn factors_cancel_across_fraction_bar() {
        let term = pow(x(), 3).divide(&x()).simplify();
        assert_eq!(term.to_string(), "x^2");

        let term = x().divide(&pow(x(), 4)).simplify();
        assert_eq!(term.to_string(), "1/x^3");

        let term = x().divide(&x()).simplify();
        assert_eq!(term.to_string(), "1");
    }

    #[test]
    fn power_of_power() {
        let term = Node::Factor(TermFactor::new(pow(x(), 2), Node::from(3))).simplify();
        assert_eq!(term.to_string(), "x^6");
    }

    #[test]
    fn exact_exponents_become_numbers() {
        let half = || Node::Term(Term::fraction(Node::from(1), Node::from(2)));
        let root = || Node::Factor(TermFactor::new(x(), half()));
        let term = root().multiply(&root()).simplify();
        assert_eq!(term.to_string(), "x");

        let four_halves = Node::Term(Term::fraction(Node::from(4), Node::from(2)));
        let expr = Node::Factor(TermFactor::new(x(), four_halves)).add(&pow(x(), 2)).simplify();
        assert_eq!(expr.to_string(), "2x^2");

        let term = root().divide(&root()).simplify();
        assert_eq!(term.to_string(), "1");

        let term = Node::Factor(TermFactor::new(root(), Node::from(2))).simplify();
        assert_eq!(term.to_string(), "x");
    }

    #[test]
    fn division_by_zero() {
        let term = x().divide(&Node::from(0)).simplify();
        assert_eq!(term.to_string(), "NaN");
    }

    #[test]
    fn like_terms_combine_and_cancel() {
        let expr = x().add(&Node::from(1)).add(&x().multiply(&Node::from(-1))).simplify();
        assert_eq!(expr.to_string(), "1");

        let expr = Node::from(3).add(&pow(x(), 2)).add(&x()).simplify();
        assert_eq!(expr.to_string(), "x^2 + x + 3");
    }

    #[test]
    fn nested_sums_flatten() {
        let inner = x().add(&Node::from(1));
        let expr = Node::Expression(Expression::new(vec![
            Term::from_node(inner),
            Term::number(Number::from(2)),
        ]));
        assert_eq!(expr.simplify().to_string(), "x + 3");
    }

    #[test]
    fn steps_are_reported() {
        let expr = Node::Expression(Expression::new(vec![
            Term::from_node(x()),
            Term::zero(),
            Term::from_node(x()),
        ]));
        let mut steps = Vec::new();
        assert_eq!(expr.simplify_with(&mut steps).to_string(), "2x");
        assert!(steps.contains(&Step::DropZeroTerms));
        assert!(steps.contains(&Step::CombineLikeTerms));
    }
}
