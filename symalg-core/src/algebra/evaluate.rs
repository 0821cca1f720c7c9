//! Evaluation of a tree under a [`Scope`].

use crate::{
    number::Number,
    scope::Scope,
    tree::{Node, Term, TermFactor},
};
use super::step::{Step, StepCollector};

impl Node {
    /// Evaluates the tree under the scope: bound variables are replaced by their values, and
    /// everything that becomes numeric is computed. Unbound variables stay symbolic. The result
    /// is simplified and reduced.
    ///
    /// Evaluation never fails. A division by zero produces NaN.
    pub fn evaluate(&self, scope: &Scope) -> Node {
        self.evaluate_with(scope, &mut ())
    }

    /// Evaluates the tree under the scope, reporting every rewrite to the step collector.
    pub fn evaluate_with(&self, scope: &Scope, steps: &mut dyn StepCollector<Step>) -> Node {
        substitute(self, scope, steps).simplify_with(steps).reduce()
    }
}

/// Replaces variables and constants, and computes everything numeric, without simplifying.
fn substitute(node: &Node, scope: &Scope, steps: &mut dyn StepCollector<Step>) -> Node {
    match node {
        Node::Number(_) => node.clone(),
        Node::Constant(c) if !scope.keep_constants() => {
            steps.push(Step::MaterializeConstant);
            Node::Number(c.value())
        },
        Node::Constant(_) => node.clone(),
        Node::Variable(var) => match scope.get(var) {
            Some(value) => {
                log::trace!("substituting {} = {}", var, value);
                steps.push(Step::Substitute);
                value
            },
            None => node.clone(),
        },
        Node::Factor(factor) => substitute_factor(factor, scope, steps),
        Node::Term(term) => substitute_term(term, scope, steps),
        Node::Expression(expr) => expr.terms()
            .iter()
            .map(|term| substitute_term(term, scope, steps))
            .reduce(|acc, term| acc.add(&term))
            .unwrap_or_else(|| Node::from(0)),
        Node::Function(func) => {
            let args = func.args()
                .iter()
                .map(|arg| substitute(arg, scope, steps))
                .collect::<Vec<_>>();
            let numbers = args.iter()
                .map(|arg| arg.as_number().cloned())
                .collect::<Option<Vec<_>>>();
            match numbers.and_then(|numbers| func.apply(&numbers)) {
                Some(value) => {
                    steps.push(Step::ComputeFunction);
                    Node::Number(value)
                },
                None => Node::Function(func.with_args(args)),
            }
        },
    }
}

fn substitute_factor(factor: &TermFactor, scope: &Scope, steps: &mut dyn StepCollector<Step>) -> Node {
    let base = substitute(factor.base(), scope, steps);
    let exponent = substitute(factor.exponent(), scope, steps);
    match (&base, &exponent) {
        (Node::Number(base), Node::Number(exponent)) => Node::Number(base.pow(exponent)),
        _ => Node::Factor(TermFactor::new(base, exponent)),
    }
}

/// Rebuilds the term from its substituted factors.
fn substitute_term(term: &Term, scope: &Scope, steps: &mut dyn StepCollector<Step>) -> Node {
    if term.is_nan() {
        return Node::Term(Term::nan());
    }
    if term.is_zero() {
        return Node::from(0);
    }

    let mut product = |init: &Number, factors: &[TermFactor]| {
        factors.iter()
            .filter(|factor| !factor.is_placeholder())
            .fold(Node::Number(init.clone()), |acc, factor| {
                acc.multiply(&substitute_factor(factor, scope, steps))
            })
    };
    let numerator = product(term.coeff_numer(), term.numerator());
    let denominator = product(term.coeff_denom(), term.denominator());

    match (numerator, denominator) {
        (numerator, Node::Number(denom)) if denom.is_one() => numerator,
        (Node::Number(numer), Node::Number(denom)) => Node::Number(numer.div(&denom)),
        (numerator, denominator) => numerator.divide(&denominator),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::tree::{Constant, Function, Variable};
    use pretty_assertions::assert_eq;
    use super::*;
    use symalg_parser::FunctionKind;

    fn x() -> Node {
        Node::Variable(Variable::new("x"))
    }

    fn scope_with_x(value: i32) -> Scope {
        let mut scope = Scope::new();
        scope.set(Variable::new("x"), Node::from(value));
        scope
    }

    #[test]
    fn substitutes_bound_variables() {
        let tree = x().multiply(&Node::from(3)).add(&Node::from(1));
        assert_eq!(tree.evaluate(&scope_with_x(2)), Node::from(7));
    }

    #[test]
    fn unbound_variables_stay() {
        let tree = x().multiply(&Node::from(3)).multiply(&Node::from(2));
        assert_eq!(tree.evaluate(&Scope::new()).to_string(), "6x");
    }

    #[test]
    fn bound_to_expression() {
        let mut scope = Scope::new();
        scope.set(Variable::new("x"), Node::Variable(Variable::new("y")).add(&Node::from(1)));
        let tree = x().multiply(&Node::from(2));
        assert_eq!(tree.evaluate(&scope).to_string(), "2(y + 1)");
    }

    #[test]
    fn constants() {
        let tree = Node::Constant(Constant::pi()).multiply(&Node::from(2));
        assert_eq!(tree.evaluate(&Scope::new()).to_string(), "2π");

        let value = tree.evaluate(&Scope::new().with_keep_constants(false));
        assert_float_absolute_eq!(value.to_number().unwrap().to_f64(), std::f64::consts::TAU, 1e-12);
    }

    #[test]
    fn division_by_zero_is_nan() {
        let tree = Node::from(1).divide(&x());
        let value = tree.evaluate(&scope_with_x(0));
        assert!(value.to_number().is_some_and(|n| n.is_nan()));
        assert_eq!(value.to_string(), "NaN");
    }

    #[test]
    fn functions() {
        let sqrt = Node::Function(Function::new(FunctionKind::Sqrt, vec![x()]));
        assert_eq!(sqrt.evaluate(&scope_with_x(49)), Node::from(7));

        let modulus = Node::Function(Function::new(FunctionKind::Mod, vec![x(), Node::from(4)]));
        assert_eq!(modulus.evaluate(&scope_with_x(10)).to_string(), "10 % 4");
    }

    #[test]
    fn powers() {
        let square = Node::Factor(TermFactor::new(x(), Node::from(2)));
        assert_eq!(square.evaluate(&scope_with_x(-3)), Node::from(9));
        let root = Node::Factor(TermFactor::new(x(), Node::Term(Term::fraction(Node::from(1), Node::from(2)))));
        assert_eq!(root.evaluate(&scope_with_x(16)), Node::Number(Number::from(4)));
    }
}
