use super::{same_multiset, Node, Term};

/// A sum of terms. The list of terms is never empty; the sum of nothing is the zero term.
#[derive(Debug, Clone)]
pub struct Expression {
    terms: Vec<Term>,
}

impl Expression {
    pub fn new(terms: Vec<Term>) -> Self {
        if terms.is_empty() {
            Self { terms: vec![Term::zero()] }
        } else {
            Self { terms }
        }
    }

    /// Returns the terms of the expression. The list is never empty.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }

    /// Returns this expression with another term added to the end.
    pub fn with_term(&self, term: Term) -> Self {
        let mut terms = self.terms.clone();
        terms.push(term);
        Self::new(terms)
    }

    /// Returns this expression followed by the terms of another.
    pub fn concat(&self, other: &Self) -> Self {
        Self::new(self.terms.iter().chain(&other.terms).cloned().collect())
    }

    /// Multiplies every term of this expression by every term of the other (FOIL).
    pub fn foil(&self, other: &Self) -> Self {
        let terms = self.terms.iter()
            .flat_map(|lhs| other.terms.iter().map(move |rhs| lhs.multiply(&Node::Term(rhs.clone()))))
            .collect();
        Self::new(terms)
    }

    /// Multiplies every term of this expression by the node.
    pub fn multiply_all(&self, node: &Node) -> Self {
        Self::new(self.terms.iter().map(|term| term.multiply(node)).collect())
    }
}

/// Expressions are strictly equal if they hold the same terms, in any order.
impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        same_multiset(&self.terms, &other.terms)
    }
}

#[cfg(test)]
mod tests {
    use crate::{number::Number, tree::Variable};
    use pretty_assertions::assert_eq;
    use super::*;

    fn x_plus(n: i32) -> Expression {
        Expression::new(vec![
            Term::from_node(Node::Variable(Variable::new("x"))),
            Term::number(Number::from(n)),
        ])
    }

    #[test]
    fn never_empty() {
        let expr = Expression::new(Vec::new());
        assert_eq!(expr.terms().len(), 1);
        assert!(expr.terms()[0].is_zero());
    }

    #[test]
    fn foil_multiplies_pairwise() {
        let product = x_plus(1).foil(&x_plus(-1));
        assert_eq!(product.terms().len(), 4);
        assert_eq!(product.terms()[3], Term::number(Number::from(-1)));
    }

    #[test]
    fn order_does_not_matter() {
        let a = x_plus(2);
        let b = Expression::new(a.terms().iter().rev().cloned().collect());
        assert_eq!(a, b);
        assert_ne!(a, x_plus(3));
    }
}
