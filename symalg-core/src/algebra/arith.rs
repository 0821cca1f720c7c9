//! Addition and multiplication of arbitrary nodes.
//!
//! Neither operation simplifies its result. Adding two like terms combines them, and multiplying
//! by a number folds it into the coefficient, but everything else is only collected into a sum or
//! product to be cleaned up later by [`Node::simplify`].

use crate::tree::{Expression, Node, Term};

impl Node {
    /// Adds two nodes.
    ///
    /// Numbers are added numerically. Adding to an [`Expression`] appends the other side's terms
    /// to it. Anything else is converted into a [`Term`] and added with [`Term::add`].
    pub fn add(&self, other: &Node) -> Node {
        match (self, other) {
            (Node::Number(lhs), Node::Number(rhs)) => Node::Number(lhs.add(rhs)),
            (Node::Expression(lhs), Node::Expression(rhs)) => Node::Expression(lhs.concat(rhs)),
            (Node::Expression(lhs), rhs) => {
                Node::Expression(lhs.with_term(Term::from_node(rhs.clone())))
            },
            (lhs, Node::Expression(rhs)) => {
                let lhs = Expression::new(vec![Term::from_node(lhs.clone())]);
                Node::Expression(lhs.concat(rhs))
            },
            (lhs, rhs) => Term::from_node(lhs.clone()).add(&Term::from_node(rhs.clone())),
        }
    }

    /// Subtracts a node from this one.
    pub fn sub(&self, other: &Node) -> Node {
        self.add(&other.multiply(&Node::from(-1)))
    }

    /// Multiplies two nodes.
    ///
    /// Numbers are multiplied numerically. Anything else is converted into a [`Term`] and
    /// multiplied with [`Term::multiply`].
    pub fn multiply(&self, other: &Node) -> Node {
        match (self, other) {
            (Node::Number(lhs), Node::Number(rhs)) => Node::Number(lhs.mul(rhs)),
            (lhs, rhs) => Node::Term(Term::from_node(lhs.clone()).multiply(rhs)),
        }
    }

    /// Divides this node by another.
    pub fn divide(&self, other: &Node) -> Node {
        self.multiply(&Node::Term(Term::reciprocal_of(other.clone())))
    }
}
