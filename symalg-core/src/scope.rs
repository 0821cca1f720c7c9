//! Variable bindings used while evaluating a tree.

use crate::tree::{Node, Variable};
use std::{collections::BTreeMap, fmt::{self, Display, Formatter}};

/// A set of variables, each either bound to a value or declared without one, plus the options
/// that control evaluation.
///
/// ```
/// use symalg_core::{parse, Scope, Variable};
///
/// let mut scope = Scope::new();
/// scope.set(Variable::new("x"), parse("3").unwrap());
/// scope.add(Variable::new("y"));
/// assert_eq!(scope.to_string(), "x = 3; y = ?");
///
/// let value = parse("2x + y").unwrap().evaluate(&scope);
/// assert_eq!(value.to_string(), "y + 6");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    bindings: BTreeMap<Variable, Option<Node>>,
    keep_constants: bool,
}

impl Default for Scope {
    fn default() -> Self {
        Self { bindings: BTreeMap::new(), keep_constants: true }
    }
}

impl Scope {
    /// Creates an empty scope that keeps constants symbolic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether constants such as `π` stay symbolic during evaluation. If `false`, they are
    /// replaced by their numeric values.
    pub fn with_keep_constants(mut self, keep_constants: bool) -> Self {
        self.keep_constants = keep_constants;
        self
    }

    pub fn keep_constants(&self) -> bool {
        self.keep_constants
    }

    pub fn set_keep_constants(&mut self, keep_constants: bool) {
        self.keep_constants = keep_constants;
    }

    /// Returns a copy of the value bound to the variable, if any.
    pub fn get(&self, var: &Variable) -> Option<Node> {
        self.bindings.get(var).cloned().flatten()
    }

    /// Binds the variable to a value, replacing any previous value.
    pub fn set(&mut self, var: Variable, value: Node) {
        self.bindings.insert(var, Some(value));
    }

    /// Declares the variable without a value. A value the variable already has is kept.
    pub fn add(&mut self, var: Variable) {
        self.bindings.entry(var).or_insert(None);
    }

    /// Removes the variable, returning its value if it had one.
    pub fn remove(&mut self, var: &Variable) -> Option<Node> {
        self.bindings.remove(var).flatten()
    }

    /// Removes every variable. Options are kept.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Returns true if the variable is declared, with or without a value.
    pub fn contains(&self, var: &Variable) -> bool {
        self.bindings.contains_key(var)
    }

    /// Iterates over the variables in name order, along with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, Option<&Node>)> + '_ {
        self.bindings.iter().map(|(var, value)| (var, value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Node {
    /// Declares every variable of the tree in the scope, without changing any existing values.
    pub fn fill_scope(&self, scope: &mut Scope) {
        self.for_each_variable(&mut |var| scope.add(var.clone()));
    }
}

fn write_binding(f: &mut Formatter<'_>, var: &Variable, value: Option<&Node>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{} = {}", var, value),
        None => write!(f, "{} = ?", var),
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut iter = self.iter();
        if let Some((var, value)) = iter.next() {
            write_binding(f, var, value)?;
            for (var, value) in iter {
                write!(f, "; ")?;
                write_binding(f, var, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str) -> Variable {
        Variable::new(name)
    }

    #[test]
    fn bindings() {
        let mut scope = Scope::new();
        assert!(scope.is_empty());

        scope.set(var("x"), Node::from(5));
        scope.add(var("y"));
        assert_eq!(scope.len(), 2);
        assert_eq!(scope.get(&var("x")), Some(Node::from(5)));
        assert_eq!(scope.get(&var("y")), None);
        assert!(scope.contains(&var("y")));
        assert!(!scope.contains(&var("z")));

        scope.add(var("x"));
        assert_eq!(scope.get(&var("x")), Some(Node::from(5)));

        assert_eq!(scope.remove(&var("x")), Some(Node::from(5)));
        assert!(!scope.contains(&var("x")));

        scope.clear();
        assert!(scope.is_empty());
    }

    #[test]
    fn display() {
        let mut scope = Scope::new();
        assert_eq!(scope.to_string(), "");
        scope.set(var("b"), Node::from(2));
        scope.add(var("a"));
        assert_eq!(scope.to_string(), "a = ?; b = 2");
    }

    #[test]
    fn options() {
        assert!(Scope::new().keep_constants());
        let mut scope = Scope::new().with_keep_constants(false);
        assert!(!scope.keep_constants());
        scope.set_keep_constants(true);
        assert!(scope.keep_constants());
    }

    #[test]
    fn fill_from_tree() {
        let tree = Node::Variable(var("x")).multiply(&Node::Variable(var("y")));
        let mut scope = Scope::new();
        scope.set(var("x"), Node::from(1));
        tree.fill_scope(&mut scope);
        assert_eq!(scope.to_string(), "x = 1; y = ?");
    }
}
