//! A symbolic expression engine.
//!
//! Text is parsed into a tree of rational [`Term`]s and [`Expression`]s, which can then be
//! simplified, expanded, reduced, and evaluated under a [`Scope`] of variable bindings. Every
//! tree renders back into canonical text with [`Display`](std::fmt::Display).
//!
//! ```
//! use symalg_core::{parse, Scope, Variable};
//!
//! let tree = parse("(x - 1)(x + 1)").unwrap();
//! let expanded = tree.expand();
//! assert_eq!(expanded.to_string(), "x^2 - 1");
//!
//! let mut scope = Scope::new();
//! scope.set(Variable::new("x"), parse("5").unwrap());
//! assert_eq!(expanded.evaluate(&scope).to_string(), "24");
//! ```
//!
//! # Parsing
//!
//! [`parse`] runs the lexer, classifier and shunting-yard converter from [`symalg_parser`], then
//! builds the tree from the postfix tokens. Errors carry the spans of the offending input and can
//! be rendered with [`ariadne`](https://docs.rs/ariadne) through [`Error::build_report`].
//!
//! [`Equation`]s are parsed separately with [`Equation::parse`].
//!
//! # Steps
//!
//! [`simplify_with_steps`] and [`expand_with_steps`] return the list of rewrites that were
//! applied along with the result.

pub mod algebra;
mod build;
mod consts;
pub mod equation;
pub mod number;
pub mod primitive;
pub mod scope;
pub mod tree;

pub use algebra::{Step, StepCollector};
pub use equation::Equation;
pub use number::Number;
pub use scope::Scope;
pub use symalg_parser::error::Error;
pub use tree::{Constant, Expression, Function, Node, Term, TermFactor, Variable};

/// Parses an expression into a tree.
pub fn parse(input: &str) -> Result<Node, Error> {
    parse_at(input, 0)
}

/// Parses an expression that starts `offset` bytes into a larger input, so that the spans of any
/// error point into the larger input.
pub fn parse_at(input: &str, offset: usize) -> Result<Node, Error> {
    let tokens = symalg_parser::postfix_at(input, offset)?;
    build::build(tokens)
}

/// Simplifies the tree, returning the result and the steps taken.
pub fn simplify_with_steps(node: &Node) -> (Node, Vec<Step>) {
    let mut steps = Vec::new();
    let result = node.simplify_with(&mut steps);
    (result, steps)
}

/// Expands the tree, returning the result and the steps taken.
pub fn expand_with_steps(node: &Node) -> (Node, Vec<Step>) {
    let mut steps = Vec::new();
    let result = node.expand_with(&mut steps);
    (result, steps)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use super::*;

    fn simplified(input: &str) -> String {
        parse(input).unwrap().simplify().to_string()
    }

    fn value_at(node: &Node, bindings: &[(&str, i32)]) -> Option<Number> {
        let mut scope = Scope::new();
        for &(name, value) in bindings {
            scope.set(Variable::new(name), Node::from(value));
        }
        node.evaluate(&scope).to_number()
    }

    #[test]
    fn like_terms() {
        assert_eq!(simplified("2x+3x"), "5x");
        assert_eq!(simplified("x + y - x"), "y");
        assert_eq!(simplified("3x^2 - x + 2x^2 + 1"), "5x^2 - x + 1");
    }

    #[test]
    fn fractions() {
        assert_eq!(simplified("4/6"), "2/3");
        assert_eq!(simplified("0.5x + 0.25x"), "3x/4");
        assert_eq!(simplified("6x/(4y)"), "3x/(2y)");
        assert_eq!(simplified("x/0"), "NaN");
    }

    #[test]
    fn simplified_coefficients_have_no_common_factor() {
        for input in ["12x/18", "-8/12", "1.5/4.5", "100x*y/75"] {
            let Node::Term(term) = parse(input).unwrap().simplify() else {
                panic!("`{}` did not simplify into a term", input);
            };
            let (Number::Rational(numer), Number::Rational(denom)) = (term.coeff_numer(), term.coeff_denom()) else {
                panic!("`{}` has an inexact coefficient", input);
            };
            assert!(numer.denom() == &1 && denom.denom() == &1);
            assert_eq!(numer.numer().clone().gcd(denom.numer()), 1);
            assert!(!term.coeff_denom().is_negative());
        }
    }

    #[test]
    fn expand_then_evaluate() {
        let expanded = parse("(x-1)*(x+1)").unwrap().expand();
        assert_eq!(value_at(&expanded, &[("x", 5)]), Some(Number::from(24)));
    }

    #[test]
    fn equations() {
        assert_eq!(Equation::parse("x=x").unwrap().to_string(), "x = x");
        assert_eq!(Equation::parse("2=3").unwrap().to_string(), "2 ≠ 3");
        let err = Equation::parse("x==y").unwrap_err();
        assert!(err.to_string().contains("more than one equality separator"));
    }

    #[test]
    fn parse_errors() {
        assert!(parse("(x + 1").unwrap_err().to_string().contains("missing closing parenthesis"));
        assert!(parse("x + 1)").unwrap_err().to_string().contains("missing opening parenthesis"));
        assert!(parse("2 *").unwrap_err().to_string().contains("too many operators"));
        assert_eq!(parse("x $ 2").unwrap_err().to_string(), "unknown token `$`");
    }

    #[test]
    fn display_reparses() {
        let inputs = [
            "2x*y - 3",
            "x^2 + 2x + 1",
            "x/(2y) + 1",
            "-x^3 + sin(x)",
            "(x + 1)*(x - 1)",
            "sin(-x^2) + 1",
            "(1 - x^2)^3",
            "max(1, -x^2)",
            "x^(1/2)*x^(1/3) - x^(3/2)",
        ];
        for input in inputs {
            let tree = parse(input).unwrap().simplify();
            let reparsed = parse(&tree.to_string()).unwrap().simplify();
            assert_eq!(reparsed, tree, "`{}` rendered as `{}`", input, tree);
        }
    }

    #[test]
    fn negation_applies_to_its_operand() {
        let value = |input: &str| value_at(&parse(input).unwrap(), &[("x", 3)]);
        assert_eq!(value("2*-x^2"), Some(Number::from(18)));
        assert_eq!(value("-x^2"), Some(Number::from(-9)));
        assert_eq!(value("(-x^2)"), Some(Number::from(-9)));
        assert_eq!(value("1 - -x^2"), Some(Number::from(-8)));
    }

    #[test]
    fn exact_exponents() {
        assert_eq!(simplified("x^(1/2)*x^(1/2)"), "x");
        assert_eq!(simplified("x^(4/2) + x^2"), "2x^2");
        assert_eq!(simplified("x^(1/2)/x^(1/2)"), "1");
        assert_eq!(parse("x^(1/2)*x^(1/2)").unwrap().simplify().reduce().to_string(), "x");
    }

    #[test]
    fn steps() {
        let (result, steps) = simplify_with_steps(&parse("4/6").unwrap());
        assert_eq!(result.to_string(), "2/3");
        assert_eq!(steps, vec![Step::ReduceCoefficient]);

        let (result, steps) = expand_with_steps(&parse("(x+1)^2").unwrap());
        assert_eq!(result.to_string(), "x^2 + 2x + 1");
        assert!(steps.contains(&Step::ExpandPower));
        assert!(steps.contains(&Step::CombineLikeTerms));
    }

    #[test]
    fn idempotence() {
        let inputs = [
            "2x + 3y - x",
            "(x+1)(x-1)",
            "4x^2/(6x)",
            "sin(x)^2 + 2",
            "x % 3 + 1",
            "x^(1/2)*x^(1/2)",
            "x^(4/2) + x^2",
            "x^(2/3)/x^(1/6) + 2x^(1/2)",
            "(x^(1/2))^2 + y^(3/3)",
        ];
        for input in inputs {
            let tree = parse(input).unwrap();
            let once = tree.simplify();
            assert_eq!(once.simplify(), once, "simplify `{}`", input);
            let reduced = once.reduce();
            assert_eq!(reduced.reduce(), reduced, "reduce `{}`", input);
        }
    }

    fn small_int() -> impl Strategy<Value = i32> {
        -20..=20i32
    }

    fn fractional_power() -> impl Strategy<Value = String> {
        (1..=6i32, 1..=4i32).prop_map(|(a, b)| format!("x^({}/{})", a, b))
    }

    proptest! {
        #[test]
        fn expanded_square_matches_polynomial(x in small_int()) {
            let square = parse("(x+1)*(x+1)").unwrap().expand();
            let polynomial = parse("x^2+2*x+1").unwrap();
            prop_assert_eq!(value_at(&square, &[("x", x)]), value_at(&polynomial, &[("x", x)]));
        }

        #[test]
        fn addition_commutes(x in small_int(), y in small_int()) {
            let a = parse("3x^2 - y/2").unwrap();
            let b = parse("(x + y)(x - 4) + 7").unwrap();
            let ab = a.add(&b).simplify();
            let ba = b.add(&a).simplify();
            let bindings = [("x", x), ("y", y)];
            prop_assert_eq!(value_at(&ab, &bindings), value_at(&ba, &bindings));
        }

        #[test]
        fn fractional_exponents_are_canonical(p in fractional_power(), q in fractional_power(), c in 1..=5i32) {
            let input = format!("{} * {} + {}x - {}", p, q, c, p);
            let once = parse(&input).unwrap().simplify();
            prop_assert_eq!(once.simplify(), once.clone(), "simplify `{}`", input);

            let reduced = once.reduce();
            prop_assert_eq!(reduced.reduce(), reduced.clone(), "reduce `{}`", input);

            let reparsed = parse(&once.to_string()).unwrap().simplify();
            prop_assert_eq!(reparsed, once, "`{}` rendered", input);
        }

        #[test]
        fn simplify_preserves_value(x in small_int(), y in 1..=9i32) {
            let tree = parse("2x*x/(4y) + x^2 - 3x + y/y").unwrap();
            let bindings = [("x", x), ("y", y)];
            prop_assert_eq!(value_at(&tree, &bindings), value_at(&tree.simplify(), &bindings));
        }
    }
}
