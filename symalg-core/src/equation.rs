//! Equations: two expressions separated by `=`.

use crate::{
    algebra::{Step, StepCollector},
    parse_at,
    scope::Scope,
    tree::Node,
};
use std::fmt::{self, Display, Formatter};
use symalg_parser::error::{Error, MissingEquals, TooManyEquals};

/// How far apart two inexact sides may be, relative to their magnitude, and still be shown as
/// equal.
pub const RELATIVE_TOLERANCE: f64 = 1e-12;

/// An equation, such as `2x + 1 = 5`.
///
/// Every transformation applies to both sides independently.
///
/// ```
/// use symalg_core::Equation;
///
/// let eq = Equation::parse("2x + 3x = 10").unwrap();
/// assert_eq!(eq.simplify().to_string(), "5x = 10");
///
/// let eq = Equation::parse("2 = 3").unwrap();
/// assert_eq!(eq.to_string(), "2 ≠ 3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    left: Node,
    right: Node,
}

impl Equation {
    pub fn new(left: Node, right: Node) -> Self {
        Self { left, right }
    }

    /// Parses an equation. The input must contain exactly one `=`, and both sides must be valid
    /// expressions.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let separators = input.match_indices('=').map(|(i, _)| i).collect::<Vec<_>>();
        let idx = match separators.as_slice() {
            [] => return Err(Error::new(vec![0..input.len()], MissingEquals)),
            [idx] => *idx,
            [_, extra @ ..] => {
                let spans = extra.iter().map(|&i| i..i + 1).collect();
                return Err(Error::new(spans, TooManyEquals { count: separators.len() }));
            },
        };

        let left = parse_at(&input[..idx], 0)?;
        let right = parse_at(&input[idx + 1..], idx + 1)?;
        Ok(Self::new(left, right))
    }

    /// Parses an equation, discarding the reason if it is invalid.
    pub fn try_parse(input: &str) -> Option<Self> {
        Self::parse(input).ok()
    }

    pub fn left(&self) -> &Node {
        &self.left
    }

    pub fn right(&self) -> &Node {
        &self.right
    }

    /// Returns true if both sides have numeric values and they differ.
    ///
    /// Exact values are compared exactly. If either side is inexact, the sides differ only if
    /// they are further apart than [`RELATIVE_TOLERANCE`] of the larger magnitude (or of one,
    /// whichever is larger). A NaN side never differs, since nothing is known about it.
    pub fn is_contradiction(&self) -> bool {
        let (Some(left), Some(right)) = (self.left.to_number(), self.right.to_number()) else {
            return false;
        };
        if left.is_nan() || right.is_nan() {
            return false;
        }
        if left.is_exact() && right.is_exact() {
            return left != right;
        }

        let (left, right) = (left.to_f64(), right.to_f64());
        if left.is_infinite() || right.is_infinite() {
            return left != right;
        }
        let scale = left.abs().max(right.abs()).max(1.0);
        (left - right).abs() > RELATIVE_TOLERANCE * scale
    }

    fn map(&self, mut f: impl FnMut(&Node) -> Node) -> Self {
        Self::new(f(&self.left), f(&self.right))
    }

    pub fn evaluate(&self, scope: &Scope) -> Self {
        self.map(|side| side.evaluate(scope))
    }

    pub fn evaluate_with(&self, scope: &Scope, steps: &mut dyn StepCollector<Step>) -> Self {
        self.map(|side| side.evaluate_with(scope, steps))
    }

    pub fn simplify(&self) -> Self {
        self.map(Node::simplify)
    }

    pub fn simplify_with(&self, steps: &mut dyn StepCollector<Step>) -> Self {
        self.map(|side| side.simplify_with(steps))
    }

    pub fn expand(&self) -> Self {
        self.map(Node::expand)
    }

    pub fn expand_with(&self, steps: &mut dyn StepCollector<Step>) -> Self {
        self.map(|side| side.expand_with(steps))
    }

    pub fn reduce(&self) -> Self {
        self.map(Node::reduce)
    }

    /// Declares every variable of both sides in the scope.
    pub fn fill_scope(&self, scope: &mut Scope) {
        self.left.fill_scope(scope);
        self.right.fill_scope(scope);
    }

    /// Solves the equation for its unknowns.
    ///
    /// # Panics
    ///
    /// Always. Symbolic solving is not supported.
    pub fn solve(&self) -> Scope {
        unimplemented!("solving equations symbolically is not supported")
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.is_contradiction() { "≠" } else { "=" };
        write!(f, "{} {} {}", self.left, sign, self.right)
    }
}
