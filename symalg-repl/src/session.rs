//! State of an interactive session and the commands that act on it.

use crate::error::{InvalidSwitch, InvalidVariable, MissingArgument, UnboundVariable, UnknownCommand};
use symalg_core::{parse_at, Equation, Error, Scope, Step, Variable};
use symalg_parser::classify::is_variable_name;

const HELP: &str = "\
<expr>               evaluate an expression or equation under the scope
:simplify <expr>     simplify without substituting variables
:expand <expr>       multiply out products and powers of sums
:reduce <expr>       unwrap trivial terms and sums
:eval <expr>         same as typing the expression alone
:let <var> = <expr>  bind a variable to the value of an expression (also `:set`)
:unset <var>         remove a binding
:scope               list the bound variables
:constants on|off    keep constants such as π symbolic (on) or use their values (off)
:steps on|off        print the rewrite steps taken by each command
:help                show this message
:quit                leave the session";

/// The transformation to apply to an expression or equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Evaluate,
    Simplify,
    Expand,
    Reduce,
}

/// What the caller should do after a line has been run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Print these lines.
    Print(Vec<String>),

    /// End the session.
    Quit,
}

impl Outcome {
    fn line(text: impl Into<String>) -> Self {
        Self::Print(vec![text.into()])
    }
}

/// A session: the scope of bound variables, and the switches set by commands.
#[derive(Debug, Clone)]
pub struct Session {
    scope: Scope,
    show_steps: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self { scope: Scope::new(), show_steps: false }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Runs one line of input. The spans of a returned error point into `line`.
    pub fn run_line(&mut self, line: &str) -> Result<Outcome, Error> {
        let start = line.len() - line.trim_start().len();
        let Some(command) = line[start..].strip_prefix(':') else {
            return self.transform(Mode::Evaluate, line, 0);
        };

        let name_len = command.find(char::is_whitespace).unwrap_or(command.len());
        let name = &command[..name_len];
        let name_span = start..start + 1 + name_len;
        let rest = command[name_len..].trim_start();
        let arg_offset = line.len() - rest.len();
        let arg = rest.trim_end();

        let required = |usage: &'static str| {
            if arg.is_empty() {
                Err(Error::new(
                    vec![name_span.clone()],
                    MissingArgument { command: name.to_string(), usage },
                ))
            } else {
                Ok(arg)
            }
        };

        match name {
            "simplify" => self.transform(Mode::Simplify, required(":simplify <expr>")?, arg_offset),
            "expand" => self.transform(Mode::Expand, required(":expand <expr>")?, arg_offset),
            "reduce" => self.transform(Mode::Reduce, required(":reduce <expr>")?, arg_offset),
            "eval" => self.transform(Mode::Evaluate, required(":eval <expr>")?, arg_offset),
            "let" | "set" => self.bind(required(":let <var> = <expr>")?, arg_offset),
            "unset" => self.unbind(required(":unset <var>")?, arg_offset),
            "scope" if self.scope.is_empty() => Ok(Outcome::line("(empty)")),
            "scope" => Ok(Outcome::line(self.scope.to_string())),
            "constants" => {
                let on = switch(required(":constants on|off")?, arg_offset)?;
                self.scope.set_keep_constants(on);
                Ok(Outcome::Print(Vec::new()))
            },
            "steps" => {
                self.show_steps = switch(required(":steps on|off")?, arg_offset)?;
                Ok(Outcome::Print(Vec::new()))
            },
            "help" => Ok(Outcome::line(HELP)),
            "quit" | "q" => Ok(Outcome::Quit),
            _ => Err(Error::new(vec![name_span], UnknownCommand { name: name.to_string() })),
        }
    }

    /// Applies the transformation to the expression or equation in `input`, which starts `offset`
    /// bytes into the line.
    fn transform(&self, mode: Mode, input: &str, offset: usize) -> Result<Outcome, Error> {
        let mut steps = Vec::new();
        let result = if input.contains('=') {
            let eq = Equation::parse(input).map_err(|err| err.offset_spans(offset))?;
            let eq = match mode {
                Mode::Evaluate => eq.evaluate_with(&self.scope, &mut steps),
                Mode::Simplify => eq.simplify_with(&mut steps),
                Mode::Expand => eq.expand_with(&mut steps),
                Mode::Reduce => eq.reduce(),
            };
            eq.to_string()
        } else {
            let node = parse_at(input, offset)?;
            let node = match mode {
                Mode::Evaluate => node.evaluate_with(&self.scope, &mut steps),
                Mode::Simplify => node.simplify_with(&mut steps),
                Mode::Expand => node.expand_with(&mut steps),
                Mode::Reduce => node.reduce(),
            };
            node.to_string()
        };
        log::debug!("{:?} `{}` -> `{}` in {} step(s)", mode, input, result, steps.len());

        let mut lines = Vec::new();
        if self.show_steps {
            lines.extend(describe_steps(&steps));
        }
        lines.push(result);
        Ok(Outcome::Print(lines))
    }

    /// Binds a variable to the value of an expression, evaluated under the current scope.
    fn bind(&mut self, arg: &str, offset: usize) -> Result<Outcome, Error> {
        let Some((name, value)) = arg.split_once('=') else {
            return Err(Error::new(
                vec![offset..offset + arg.len()],
                MissingArgument { command: "let".to_string(), usage: ":let <var> = <expr>" },
            ));
        };

        let name = name.trim();
        if !is_variable_name(name) {
            let name_start = offset + (arg.len() - arg.trim_start().len());
            return Err(Error::new(
                vec![name_start..name_start + name.len()],
                InvalidVariable { name: name.to_string() },
            ));
        }

        let value_offset = offset + arg.len() - value.len();
        let value = parse_at(value, value_offset)?.evaluate(&self.scope);
        let var = Variable::new(name);
        let line = format!("{} = {}", var, value);
        self.scope.set(var, value);
        Ok(Outcome::line(line))
    }

    fn unbind(&mut self, name: &str, offset: usize) -> Result<Outcome, Error> {
        let var = Variable::new(name);
        if !self.scope.contains(&var) {
            return Err(Error::new(
                vec![offset..offset + name.len()],
                UnboundVariable { name: name.to_string() },
            ));
        }
        self.scope.remove(&var);
        Ok(Outcome::Print(Vec::new()))
    }
}

/// Parses `on` or `off`.
fn switch(value: &str, offset: usize) -> Result<bool, Error> {
    match value {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(Error::new(
            vec![offset..offset + value.len()],
            InvalidSwitch { value: value.to_string() },
        )),
    }
}

/// Numbers the steps, merging runs of the same step.
fn describe_steps(steps: &[Step]) -> Vec<String> {
    let mut runs: Vec<(&Step, usize)> = Vec::new();
    for step in steps {
        match runs.last_mut() {
            Some((last, count)) if *last == step => *count += 1,
            _ => runs.push((step, 1)),
        }
    }

    runs.into_iter()
        .enumerate()
        .map(|(i, (step, count))| match count {
            1 => format!("{:>3}. {}", i + 1, step),
            _ => format!("{:>3}. {} (x{})", i + 1, step, count),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(session: &mut Session, line: &str) -> Vec<String> {
        match session.run_line(line).unwrap() {
            Outcome::Print(lines) => lines,
            Outcome::Quit => panic!("`{}` ended the session", line),
        }
    }

    #[test]
    fn expressions_are_evaluated() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "2x + 3x"), ["5x"]);
        assert_eq!(run(&mut session, "  4/6  "), ["2/3"]);
    }

    #[test]
    fn transformations() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, ":expand (x - 1)(x + 1)"), ["x^2 - 1"]);
        assert_eq!(run(&mut session, ":simplify x*x*x"), ["x^3"]);
        assert_eq!(run(&mut session, ":reduce x^1"), ["x"]);
    }

    #[test]
    fn bindings() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, ":let x = 2 + 3"), ["x = 5"]);
        assert_eq!(run(&mut session, ":set y = x * 2"), ["y = 10"]);
        assert_eq!(run(&mut session, "x + y"), ["15"]);
        assert_eq!(run(&mut session, ":scope"), ["x = 5; y = 10"]);

        assert_eq!(run(&mut session, ":unset x"), Vec::<String>::new());
        assert_eq!(run(&mut session, "x + y"), ["x + 10"]);
        assert_eq!(session.scope().len(), 1);
    }

    #[test]
    fn equations() {
        let mut session = Session::new();
        run(&mut session, ":let x = 3");
        assert_eq!(run(&mut session, "2x = 6"), ["6 = 6"]);
        assert_eq!(run(&mut session, "x = 4"), ["3 ≠ 4"]);
        assert_eq!(run(&mut session, ":expand (y+1)^2 = 0"), ["y^2 + 2y + 1 = 0"]);
    }

    #[test]
    fn constants_switch() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "2π"), ["2π"]);
        run(&mut session, ":constants off");
        assert!(run(&mut session, "2π")[0].starts_with("6.283185307"));
    }

    #[test]
    fn steps_switch() {
        let mut session = Session::new();
        run(&mut session, ":steps on");
        let lines = run(&mut session, ":simplify 4/6");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1. "));
        assert_eq!(lines[1], "2/3");

        run(&mut session, ":steps off");
        assert_eq!(run(&mut session, ":simplify 4/6"), ["2/3"]);
    }

    #[test]
    fn repeated_steps_are_merged() {
        let steps = [Step::Foil, Step::Foil, Step::CombineLikeTerms];
        let lines = describe_steps(&steps);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("(x2)"));
    }

    #[test]
    fn quit() {
        assert_eq!(Session::new().run_line(":quit").unwrap(), Outcome::Quit);
    }

    #[test]
    fn error_spans_point_into_line() {
        let mut session = Session::new();

        let err = session.run_line(":simplify 2 + foo").unwrap_err();
        assert_eq!(err.to_string(), "unknown token `foo`");
        assert_eq!(err.spans, vec![14..17]);

        let err = session.run_line(":eval x = y = z").unwrap_err();
        assert_eq!(err.spans, vec![12..13]);

        let err = session.run_line(":frob").unwrap_err();
        assert_eq!(err.to_string(), "unknown command `:frob`");
        assert_eq!(err.spans, vec![0..5]);

        let err = session.run_line(":steps maybe").unwrap_err();
        assert_eq!(err.spans, vec![7..12]);

        let err = session.run_line(":let 2 = 3").unwrap_err();
        assert_eq!(err.to_string(), "`2` is not a variable name");
        assert_eq!(err.spans, vec![5..6]);

        let err = session.run_line(":unset z").unwrap_err();
        assert_eq!(err.spans, vec![7..8]);

        let err = session.run_line(":expand").unwrap_err();
        assert_eq!(err.to_string(), "`:expand` needs an argument");
    }
}
