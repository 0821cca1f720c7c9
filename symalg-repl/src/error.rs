use ariadne::Source;
use symalg_attrs::ErrorKind;
use symalg_core::Error;

/// The line started with `:` but did not name a known command.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `:{}`", name),
    labels = ["this command does not exist"],
    help = "type `:help` to list the available commands",
)]
pub struct UnknownCommand {
    pub name: String,
}

/// A command was given without the argument it needs.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`:{}` needs an argument", command),
    labels = ["add an argument after this"],
    help = format!("usage: {}", usage),
)]
pub struct MissingArgument {
    pub command: String,
    pub usage: &'static str,
}

/// A switch command was given something other than `on` or `off`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected `on` or `off`, found `{}`", value),
    labels = ["this is not a switch value"],
)]
pub struct InvalidSwitch {
    pub value: String,
}

/// A binding command named something that is not a variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a variable name", name),
    labels = ["cannot bind a value to this"],
    help = "variables are single letters, optionally followed by `_` and digits, such as `x` or `x_1`",
)]
pub struct InvalidVariable {
    pub name: String,
}

/// `:unset` was given a variable that is not in the scope.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not in the scope", name),
    labels = ["this variable was never bound"],
    help = "type `:scope` to list the bound variables",
)]
pub struct UnboundVariable {
    pub name: String,
}

/// Report the error to stderr, highlighting its spans in the input.
///
/// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
/// implementation, so we can only use its `eprint` method to print to stderr.
pub fn report_to_stderr(err: &Error, input: &str) {
    let report = err.build_report("input");
    if let Err(io_err) = report.eprint(("input", Source::from(input))) {
        log::warn!("could not render report: {}", io_err);
        eprintln!("error: {}", err);
    }
}
