//! Algebraic operations on expression trees.
//!
//! Every operation is a method on [`Node`](crate::tree::Node) that takes `&self` and returns a
//! new tree:
//!
//! - [`add`](crate::tree::Node::add) and [`multiply`](crate::tree::Node::multiply) combine two
//!   trees without simplifying more than necessary,
//! - [`simplify`](crate::tree::Node::simplify) brings a tree into canonical form,
//! - [`expand`](crate::tree::Node::expand) multiplies out products and powers of sums,
//! - [`reduce`](crate::tree::Node::reduce) unwraps terms, factors and sums that hold a single
//!   value,
//! - [`evaluate`](crate::tree::Node::evaluate) substitutes the values bound in a
//!   [`Scope`](crate::scope::Scope).
//!
//! The `_with` variants of these methods report the rewrites they apply to a [`StepCollector`].
//! Pass `&mut ()` to ignore them, or a `&mut Vec<Step>` to record them.

mod arith;
mod evaluate;
mod expand;
mod reduce;
mod simplify;
mod step;

pub use step::{Step, StepCollector};
