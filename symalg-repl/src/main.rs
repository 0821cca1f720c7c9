mod error;
mod session;

use rustyline::{error::ReadlineError, DefaultEditor};
use session::{Outcome, Session};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}};

/// Runs one line in the session, printing the output or reporting the error. Returns false if the
/// session should end.
fn run_line(line: &str, session: &mut Session) -> bool {
    match session.run_line(line) {
        Ok(Outcome::Print(lines)) => {
            lines.iter().for_each(|line| println!("{}", line));
            true
        },
        Ok(Outcome::Quit) => false,
        Err(err) => {
            error::report_to_stderr(&err, line);
            true
        },
    }
}

/// Runs every non-empty line of the input in a fresh session.
fn execute(input: &str) {
    let mut session = Session::new();
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        if !run_line(line, &mut session) {
            break;
        }
    }
}

fn read_source(filename: Option<String>) -> io::Result<String> {
    let mut input = String::new();
    match filename {
        Some(filename) => BufReader::new(File::open(filename)?).read_to_string(&mut input)?,
        None => io::stdin().read_to_string(&mut input)?,
    };
    Ok(input)
}

fn main() {
    env_logger::init();

    let mut args = std::env::args();
    args.next();

    let filename = args.next();
    if filename.is_some() || !io::stdin().is_terminal() {
        // run a source file, or source piped into stdin
        match read_source(filename) {
            Ok(input) => execute(&input),
            Err(err) => {
                eprintln!("error: {}", err);
                std::process::exit(1);
            },
        }
        return;
    }

    // run the repl / interactive mode
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        },
    };
    let mut session = Session::new();

    fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<bool, ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(true);
        }

        rl.add_history_entry(&input)?;
        Ok(run_line(&input, session))
    }

    loop {
        match process_line(&mut rl, &mut session) {
            Ok(true) => (),
            Ok(false) => break,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(err) => {
                eprintln!("{}", err);
                break;
            },
        }
    }
}
