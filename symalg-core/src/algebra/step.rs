//! The rewrite steps reported by the algebra, and the sink that receives them.

use std::fmt::{self, Display, Formatter};

/// A rewrite applied to a tree while simplifying, expanding, or evaluating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `x^2 * x^3 = x^5`
    CombineLikeFactors,

    /// `x^3 / x = x^2`
    CancelCommonFactors,

    /// `4/6 = 2/3`
    ReduceCoefficient,

    /// `x^0 = 1`
    DropZeroExponent,

    /// `(x^2)^3 = x^6`
    PowerOfPower,

    /// `x + 0 = x`
    DropZeroTerms,

    /// `2x + 3x = 5x`
    CombineLikeTerms,

    /// `1 + x^2 = x^2 + 1`
    SortTerms,

    /// `(x + 1) + y = x + 1 + y`
    FlattenSum,

    /// `(a + b)(c + d) = ac + ad + bc + bd`
    Foil,

    /// `(x + 1)^2 = (x + 1)(x + 1)`
    ExpandPower,

    /// `2(x + 1) = 2x + 2`
    Distribute,

    /// A variable was replaced by its value.
    Substitute,

    /// A constant was replaced by its numeric value.
    MaterializeConstant,

    /// A builtin function was computed.
    ComputeFunction,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::CombineLikeFactors => "combine like factors",
            Self::CancelCommonFactors => "cancel factors common to the numerator and denominator",
            Self::ReduceCoefficient => "reduce the coefficient",
            Self::DropZeroExponent => "drop factors raised to the power zero",
            Self::PowerOfPower => "multiply the exponents of a power of a power",
            Self::DropZeroTerms => "drop zero terms",
            Self::CombineLikeTerms => "combine like terms",
            Self::SortTerms => "sort terms by descending power",
            Self::FlattenSum => "flatten nested sums",
            Self::Foil => "multiply out the product of two sums",
            Self::ExpandPower => "expand a power of a sum",
            Self::Distribute => "distribute a factor over a sum",
            Self::Substitute => "substitute a variable",
            Self::MaterializeConstant => "replace a constant with its value",
            Self::ComputeFunction => "compute a function",
        };
        write!(f, "{}", description)
    }
}

/// A sink for the steps taken by the algebra.
///
/// Implemented for `()`, which discards every step, and for `Vec<S>`, which records them in
/// order.
pub trait StepCollector<S> {
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
