use crate::number::Number;
use super::Node;

/// A base raised to an exponent, the building block of a [`Term`](super::Term).
///
/// The factor `1^1` is the identity placeholder that fills an otherwise empty factor list.
#[derive(Debug, Clone, PartialEq)]
pub struct TermFactor {
    base: Box<Node>,
    exponent: Box<Node>,
}

impl TermFactor {
    /// Creates the factor `base^exponent`.
    pub fn new(base: Node, exponent: Node) -> Self {
        Self { base: Box::new(base), exponent: Box::new(exponent) }
    }

    /// Creates the factor `base^1`.
    pub fn of(base: Node) -> Self {
        Self::new(base, Node::from(1))
    }

    /// Creates the identity placeholder `1^1`.
    pub fn placeholder() -> Self {
        Self::of(Node::from(1))
    }

    pub fn base(&self) -> &Node {
        &self.base
    }

    pub fn exponent(&self) -> &Node {
        &self.exponent
    }

    /// Consumes the factor, returning its base and exponent.
    pub fn into_parts(self) -> (Node, Node) {
        (*self.base, *self.exponent)
    }

    /// Returns true if this is the identity placeholder `1^1`.
    pub fn is_placeholder(&self) -> bool {
        matches!((&*self.base, &*self.exponent), (Node::Number(b), Node::Number(e)) if b.is_one() && e.is_one())
    }

    /// Returns true if the exponent is the number one.
    pub fn has_unit_exponent(&self) -> bool {
        matches!(&*self.exponent, Node::Number(e) if e.is_one())
    }

    /// Returns true if the exponent is the number zero.
    pub fn has_zero_exponent(&self) -> bool {
        matches!(&*self.exponent, Node::Number(e) if e.is_zero())
    }

    /// Returns the exact value of the factor, if both its base and exponent are exact numbers
    /// and the power can be computed exactly.
    pub fn extract_numbers(&self) -> Option<Number> {
        if self.has_zero_exponent() {
            return Some(Number::one());
        }

        let base = self.base.extract_numbers()?;
        let exponent = self.exponent.extract_numbers()?;
        base.pow_exact(&exponent)
    }
}
