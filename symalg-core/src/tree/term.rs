use crate::number::Number;
use super::{same_multiset, Expression, Node, TermFactor};

/// A product of factors divided by another product of factors, scaled by a rational
/// coefficient:
///
/// ```text
/// (coeff_numer * numerator[0] * numerator[1] * ...) / (coeff_denom * denominator[0] * ...)
/// ```
///
/// Neither factor list is ever empty; a list with nothing in it holds the placeholder `1^1`.
/// Factors whose value is an exact number are folded into the coefficient as they are inserted,
/// and factors raised to the power zero are dropped.
#[derive(Debug, Clone)]
pub struct Term {
    coeff_numer: Number,
    coeff_denom: Number,
    numerator: Vec<TermFactor>,
    denominator: Vec<TermFactor>,
}

impl Term {
    /// Builds a term from its parts, folding numeric factors into the coefficient and dropping
    /// zero exponents and placeholders.
    pub fn from_parts(
        coeff_numer: Number,
        coeff_denom: Number,
        numerator: impl IntoIterator<Item = TermFactor>,
        denominator: impl IntoIterator<Item = TermFactor>,
    ) -> Self {
        let mut coeff_numer = coeff_numer;
        let mut coeff_denom = coeff_denom;
        let numerator = fold_factors(numerator, &mut coeff_numer);
        let denominator = fold_factors(denominator, &mut coeff_denom);
        Self { coeff_numer, coeff_denom, numerator, denominator }
    }

    /// The term `n`.
    pub fn number(n: Number) -> Self {
        Self::from_parts(n, Number::one(), [], [])
    }

    /// The term `0`.
    pub fn zero() -> Self {
        Self::number(Number::zero())
    }

    /// The term `1`.
    pub fn one() -> Self {
        Self::number(Number::one())
    }

    /// The term holding the not-a-number sentinel.
    pub fn nan() -> Self {
        Self::number(Number::nan())
    }

    /// Wraps any node in a term. Numbers become the coefficient, factors are inserted as they
    /// are, terms are returned unchanged, and anything else becomes a factor with exponent 1.
    pub fn from_node(node: Node) -> Self {
        match node {
            Node::Number(n) => Self::number(n),
            Node::Term(term) => term,
            Node::Factor(factor) => Self::from_parts(Number::one(), Number::one(), [factor], []),
            other => Self::from_parts(Number::one(), Number::one(), [TermFactor::of(other)], []),
        }
    }

    /// Builds the term `numerator / denominator`.
    pub fn fraction(numerator: Node, denominator: Node) -> Self {
        Self::from_node(numerator).multiply(&Node::Term(Self::reciprocal_of(denominator)))
    }

    /// Builds the term `1 / node`.
    pub fn reciprocal_of(node: Node) -> Self {
        match node {
            Node::Number(n) => Self::from_parts(Number::one(), n, [], []),
            Node::Term(term) => term.inverse(),
            Node::Factor(factor) => Self::from_parts(Number::one(), Number::one(), [], [factor]),
            other => Self::from_parts(Number::one(), Number::one(), [], [TermFactor::of(other)]),
        }
    }

    /// Returns the multiplicative inverse of this term, swapping its numerator and denominator.
    pub fn inverse(&self) -> Self {
        Self {
            coeff_numer: self.coeff_denom.clone(),
            coeff_denom: self.coeff_numer.clone(),
            numerator: self.denominator.clone(),
            denominator: self.numerator.clone(),
        }
    }

    /// Returns this term with its sign flipped.
    pub fn negated(&self) -> Self {
        Self { coeff_numer: self.coeff_numer.neg(), ..self.clone() }
    }

    pub fn coeff_numer(&self) -> &Number {
        &self.coeff_numer
    }

    pub fn coeff_denom(&self) -> &Number {
        &self.coeff_denom
    }

    /// Returns the numerator factors. The list is never empty.
    pub fn numerator(&self) -> &[TermFactor] {
        &self.numerator
    }

    /// Returns the denominator factors. The list is never empty.
    pub fn denominator(&self) -> &[TermFactor] {
        &self.denominator
    }

    /// Returns every factor of the term, numerator first.
    pub fn factors(&self) -> impl Iterator<Item = &TermFactor> + '_ {
        self.numerator.iter().chain(self.denominator.iter())
    }

    /// Consumes the term, returning its coefficient pair and factor lists.
    pub fn into_parts(self) -> (Number, Number, Vec<TermFactor>, Vec<TermFactor>) {
        (self.coeff_numer, self.coeff_denom, self.numerator, self.denominator)
    }

    /// Returns true if the numerator holds only the placeholder.
    pub fn has_trivial_numerator(&self) -> bool {
        self.numerator.iter().all(TermFactor::is_placeholder)
    }

    /// Returns true if the denominator holds only the placeholder.
    pub fn has_trivial_denominator(&self) -> bool {
        self.denominator.iter().all(TermFactor::is_placeholder)
    }

    /// Returns true if the term has something other than `1` below the fraction bar.
    pub fn is_fraction(&self) -> bool {
        !self.coeff_denom.is_one() || !self.has_trivial_denominator()
    }

    pub fn is_nan(&self) -> bool {
        self.coeff_numer.is_nan() || self.coeff_denom.is_nan() || self.coeff_denom.is_zero()
    }

    /// Returns true if the term contains no variables.
    pub fn is_constant(&self) -> bool {
        self.factors().all(|factor| factor.base().is_constant() && factor.exponent().is_constant())
    }

    pub fn is_zero(&self) -> bool {
        self.coeff_numer.is_zero() && !self.coeff_denom.is_zero()
    }

    pub fn is_one(&self) -> bool {
        !self.coeff_numer.is_zero()
            && self.coeff_numer == self.coeff_denom
            && self.has_trivial_numerator()
            && self.has_trivial_denominator()
    }

    /// Returns true if the coefficient of the term is negative.
    pub fn is_negative(&self) -> bool {
        self.coeff_numer.is_negative() != self.coeff_denom.is_negative()
    }

    /// Returns true if both terms have the same numerator factors and the same denominator
    /// factors, in any order, so that they differ only by their coefficients.
    pub fn is_like_term(&self, other: &Self) -> bool {
        same_multiset(&self.numerator, &other.numerator)
            && same_multiset(&self.denominator, &other.denominator)
    }

    /// Returns true if both terms have the same denominator.
    pub fn has_common_denominator(&self, other: &Self) -> bool {
        self.coeff_denom == other.coeff_denom
            && same_multiset(&self.denominator, &other.denominator)
    }

    /// Rewrites both terms over the product of their denominators.
    pub fn with_common_denominator(&self, other: &Self) -> (Self, Self) {
        if self.has_common_denominator(other) {
            return (self.clone(), other.clone());
        }

        let scale = |term: &Self, by: &Self| Self::from_parts(
            term.coeff_numer.mul(&by.coeff_denom),
            term.coeff_denom.mul(&by.coeff_denom),
            join(&term.numerator, &by.denominator),
            join(&term.denominator, &by.denominator),
        );
        (scale(self, other), scale(other, self))
    }

    /// Returns the highest power a variable is raised to in this term. Variables in the
    /// denominator count as negative powers, and a term without variables has power zero.
    pub fn highest_power(&self) -> f64 {
        let power = |factor: &TermFactor| match (factor.base(), factor.exponent()) {
            (Node::Variable(_), Node::Number(n)) => Some(n.to_f64()),
            (Node::Variable(_), _) => Some(1.0),
            _ => None,
        };

        self.numerator.iter()
            .filter_map(power)
            .chain(self.denominator.iter().filter_map(power).map(|p| -p))
            .fold(None, |max: Option<f64>, p| Some(max.map_or(p, |max| max.max(p))))
            .unwrap_or(0.0)
    }

    /// Splits a term without a denominator into the nodes it is a product of: the coefficient,
    /// if it is not one, followed by every numerator factor. Factors with exponent one are
    /// replaced by their base.
    pub fn extract(&self) -> Vec<Node> {
        let coefficient = Some(self.coeff_numer.div(&self.coeff_denom))
            .filter(|n| !n.is_one())
            .map(Node::Number);
        let factors = self.numerator.iter()
            .filter(|factor| !factor.is_placeholder())
            .map(|factor| if factor.has_unit_exponent() {
                factor.base().clone()
            } else {
                Node::Factor(factor.clone())
            });
        coefficient.into_iter().chain(factors).collect()
    }

    /// Returns the exact value of the term, if every factor has one.
    pub fn extract_numbers(&self) -> Option<Number> {
        let product = |factors: &[TermFactor], init: &Number| {
            factors.iter()
                .map(TermFactor::extract_numbers)
                .try_fold(init.clone(), |acc, n| Some(acc.mul(&n?)))
        };
        let numer = product(&self.numerator, &self.coeff_numer)?;
        let denom = product(&self.denominator, &self.coeff_denom)?;
        Some(numer.div(&denom))
    }

    /// Returns the numeric value of the term, approximating constants and functions.
    pub fn to_number(&self) -> Option<Number> {
        let product = |factors: &[TermFactor], init: &Number| {
            factors.iter()
                .map(|factor| Node::Factor(factor.clone()).to_number())
                .try_fold(init.clone(), |acc, n| Some(acc.mul(&n?)))
        };
        let numer = product(&self.numerator, &self.coeff_numer)?;
        let denom = product(&self.denominator, &self.coeff_denom)?;
        Some(numer.div(&denom))
    }

    /// Multiplies this term by a node.
    ///
    /// Numbers are folded into the coefficient, terms have their coefficients multiplied and
    /// their factor lists joined, factors are appended to the numerator, and anything else is
    /// appended to the numerator with exponent one.
    pub fn multiply(&self, other: &Node) -> Self {
        match other {
            Node::Number(n) => Self {
                coeff_numer: self.coeff_numer.mul(n),
                ..self.clone()
            },
            Node::Term(term) => Self::from_parts(
                self.coeff_numer.mul(&term.coeff_numer),
                self.coeff_denom.mul(&term.coeff_denom),
                join(&self.numerator, &term.numerator),
                join(&self.denominator, &term.denominator),
            ),
            Node::Factor(factor) => Self::from_parts(
                self.coeff_numer.clone(),
                self.coeff_denom.clone(),
                join(&self.numerator, std::slice::from_ref(factor)),
                self.denominator.clone(),
            ),
            other => Self::from_parts(
                self.coeff_numer.clone(),
                self.coeff_denom.clone(),
                join(&self.numerator, &[TermFactor::of(other.clone())]),
                self.denominator.clone(),
            ),
        }
    }

    /// Adds two terms. Like terms are combined into a single term by summing their coefficients
    /// over a common denominator. Anything else results in an [`Expression`] of both terms.
    pub fn add(&self, other: &Self) -> Node {
        if self.is_zero() {
            return Node::Term(other.clone());
        }
        if other.is_zero() {
            return Node::Term(self.clone());
        }

        if self.is_like_term(other) {
            Node::Term(self.combine_like(other))
        } else {
            Node::Expression(Expression::new(vec![self.clone(), other.clone()]))
        }
    }

    /// Sums the coefficients of two like terms. The caller must check that the terms are like
    /// with [`Term::is_like_term`].
    pub(crate) fn combine_like(&self, other: &Self) -> Self {
        let coeff_numer = self.coeff_numer.mul(&other.coeff_denom)
            .add(&other.coeff_numer.mul(&self.coeff_denom));
        let coeff_denom = self.coeff_denom.mul(&other.coeff_denom);
        Self { coeff_numer, coeff_denom, ..self.clone() }
    }
}

/// Moves every factor of the list into a new list, folding exact numbers into the coefficient.
/// The resulting list holds the placeholder if it would otherwise be empty.
fn fold_factors(factors: impl IntoIterator<Item = TermFactor>, coefficient: &mut Number) -> Vec<TermFactor> {
    let mut folded = Vec::new();
    for factor in factors {
        if factor.is_placeholder() || factor.has_zero_exponent() {
            continue;
        }

        match factor.extract_numbers() {
            Some(n) => *coefficient = coefficient.mul(&n),
            None => folded.push(factor),
        }
    }

    if folded.is_empty() {
        folded.push(TermFactor::placeholder());
    }
    folded
}

fn join(lhs: &[TermFactor], rhs: &[TermFactor]) -> Vec<TermFactor> {
    lhs.iter().chain(rhs).cloned().collect()
}

/// Terms are strictly equal if their coefficients are equal and their factor lists hold the
/// same factors, in any order.
impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.coeff_numer == other.coeff_numer
            && self.coeff_denom == other.coeff_denom
            && self.is_like_term(other)
    }
}
