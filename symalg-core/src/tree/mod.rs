//! The expression tree.
//!
//! Every parsed expression is a [`Node`]. Products are represented by [`Term`]s, which hold a
//! rational coefficient and two lists of [`TermFactor`]s (the numerator and the denominator), and
//! sums are represented by [`Expression`]s, which hold a list of [`Term`]s. The remaining variants
//! are leaves, powers, and function calls.
//!
//! Nodes are values. Every operation takes `&self` and returns a freshly built tree, so a tree
//! that is shared between two owners is never changed behind the back of either one.
//!
//! # Strict equality
//!
//! The [`PartialEq`] implementation for [`Node`] implements **strict equality**: two nodes are
//! strictly equal if they have the same shape, where the factors of a [`Term`] and the terms of
//! an [`Expression`] may appear in any order. Strict equality never reports false positives, but
//! it does not detect that, for example, `(x + 1)^2` and `x^2 + 2x + 1` are the same value. It is
//! what the algebra uses to find like bases and like terms.

mod constant;
mod expression;
mod factor;
mod fmt;
mod function;
mod term;
mod variable;

pub use constant::Constant;
pub use expression::Expression;
pub use factor::TermFactor;
pub use function::Function;
pub use term::Term;
pub use variable::Variable;

use crate::number::Number;

/// A node of the expression tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// A number, such as `2`, `5/4`, or a real value.
    Number(Number),

    /// A named constant, such as `π`.
    Constant(Constant),

    /// A variable, such as `x` or `x_1`.
    Variable(Variable),

    /// A base raised to an exponent.
    Factor(TermFactor),

    /// A product of factors over a product of factors, scaled by a rational coefficient.
    Term(Term),

    /// A sum of terms.
    Expression(Expression),

    /// A call to a builtin function.
    Function(Function),
}

impl Node {
    /// Returns true if the node is a [`Number`], [`Constant`], or [`Variable`].
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Constant(_) | Self::Variable(_))
    }

    /// If the node is a [`Number`], returns a reference to it.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the node contains no variables.
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Number(_) | Self::Constant(_) => true,
            Self::Variable(_) => false,
            Self::Factor(factor) => factor.base().is_constant() && factor.exponent().is_constant(),
            Self::Term(term) => term.is_constant(),
            Self::Expression(expr) => expr.terms().iter().all(Term::is_constant),
            Self::Function(func) => func.args().iter().all(Node::is_constant),
        }
    }

    /// Returns true if the node is structurally zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Number(n) => n.is_zero(),
            Self::Factor(factor) => factor.base().is_zero()
                && factor.exponent().as_number().is_some_and(|n| !n.is_negative() && !n.is_zero()),
            Self::Term(term) => term.is_zero(),
            Self::Expression(expr) => expr.terms().iter().all(Term::is_zero),
            Self::Constant(_) | Self::Variable(_) | Self::Function(_) => false,
        }
    }

    /// Returns true if the node is structurally one.
    pub fn is_one(&self) -> bool {
        match self {
            Self::Number(n) => n.is_one(),
            Self::Factor(factor) => factor.is_placeholder()
                || factor.exponent().is_zero()
                || factor.base().is_one(),
            Self::Term(term) => term.is_one(),
            Self::Expression(expr) => matches!(expr.terms(), [term] if term.is_one()),
            Self::Constant(_) | Self::Variable(_) | Self::Function(_) => false,
        }
    }

    /// Returns true if the node carries a negative sign: a negative number, a term with a
    /// negative coefficient, or an expression whose leading term is negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Number(n) => n.is_negative(),
            Self::Term(term) => term.is_negative(),
            Self::Expression(expr) => expr.terms().first().is_some_and(Term::is_negative),
            Self::Constant(_) | Self::Variable(_) | Self::Factor(_) | Self::Function(_) => false,
        }
    }

    /// Returns the exact numeric value of the node, if it is made only of numbers combined in
    /// ways that can be computed exactly.
    pub fn extract_numbers(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(n.clone()),
            Self::Factor(factor) => factor.extract_numbers(),
            Self::Term(term) => term.extract_numbers(),
            Self::Expression(expr) => expr.terms()
                .iter()
                .map(Term::extract_numbers)
                .try_fold(Number::zero(), |acc, n| Some(acc.add(&n?))),
            Self::Constant(_) | Self::Variable(_) | Self::Function(_) => None,
        }
    }

    /// Returns the numeric value of the node, approximating constants and functions where
    /// needed. Returns [`None`] if the node contains a variable, or a function that is never
    /// evaluated numerically.
    pub fn to_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(n.clone()),
            Self::Constant(c) => Some(c.value()),
            Self::Variable(_) => None,
            Self::Factor(factor) => {
                let base = factor.base().to_number()?;
                let exponent = factor.exponent().to_number()?;
                Some(base.pow(&exponent))
            },
            Self::Term(term) => term.to_number(),
            Self::Expression(expr) => expr.terms()
                .iter()
                .map(Term::to_number)
                .try_fold(Number::zero(), |acc, n| Some(acc.add(&n?))),
            Self::Function(func) => {
                let args = func.args()
                    .iter()
                    .map(Node::to_number)
                    .collect::<Option<Vec<_>>>()?;
                func.apply(&args)
            },
        }
    }

    /// Calls `f` on every variable in the tree, in left-to-right order.
    pub fn for_each_variable(&self, f: &mut impl FnMut(&Variable)) {
        match self {
            Self::Number(_) | Self::Constant(_) => (),
            Self::Variable(var) => f(var),
            Self::Factor(factor) => {
                factor.base().for_each_variable(f);
                factor.exponent().for_each_variable(f);
            },
            Self::Term(term) => {
                for factor in term.factors() {
                    factor.base().for_each_variable(f);
                    factor.exponent().for_each_variable(f);
                }
            },
            Self::Expression(expr) => {
                for factor in expr.terms().iter().flat_map(Term::factors) {
                    factor.base().for_each_variable(f);
                    factor.exponent().for_each_variable(f);
                }
            },
            Self::Function(func) => {
                for arg in func.args() {
                    arg.for_each_variable(f);
                }
            },
        }
    }
}

/// Checks if two nodes are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(lhs), Self::Number(rhs)) => lhs == rhs,
            (Self::Constant(lhs), Self::Constant(rhs)) => lhs == rhs,
            (Self::Variable(lhs), Self::Variable(rhs)) => lhs == rhs,
            (Self::Factor(lhs), Self::Factor(rhs)) => lhs == rhs,
            (Self::Term(lhs), Self::Term(rhs)) => lhs == rhs,
            (Self::Expression(lhs), Self::Expression(rhs)) => lhs == rhs,
            (Self::Function(lhs), Self::Function(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl From<Number> for Node {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<Constant> for Node {
    fn from(c: Constant) -> Self {
        Self::Constant(c)
    }
}

impl From<Variable> for Node {
    fn from(var: Variable) -> Self {
        Self::Variable(var)
    }
}

impl From<TermFactor> for Node {
    fn from(factor: TermFactor) -> Self {
        Self::Factor(factor)
    }
}

impl From<Term> for Node {
    fn from(term: Term) -> Self {
        Self::Term(term)
    }
}

impl From<Expression> for Node {
    fn from(expr: Expression) -> Self {
        Self::Expression(expr)
    }
}

impl From<Function> for Node {
    fn from(func: Function) -> Self {
        Self::Function(func)
    }
}

/// Returns true if both slices hold the same elements, in any order, where each element of one
/// slice is matched with a distinct element of the other.
pub(crate) fn same_multiset<T: PartialEq>(lhs: &[T], rhs: &[T]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|item| {
        match (0..rhs.len()).find(|&i| !used[i] && rhs[i] == *item) {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}
