mod command;
mod error;
mod session;

use command::Command;
use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use std::io::{self, BufRead, IsTerminal};
use tracing_subscriber::EnvFilter;

/// Parses and runs a line of input, printing the result or reporting the failure.
fn read_eval(input: &str, session: &mut Session) {
    if input.trim().is_empty() {
        return;
    }

    match Command::parse(input).and_then(|command| session.run(command)) {
        Ok(Some(output)) if !output.is_empty() => println!("{}", output),
        Ok(_) => (), // intentionally print nothing
        Err(err) => err.report_to_stderr(),
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut session = Session::new();

    if !io::stdin().is_terminal() {
        // read commands from stdin, one per line
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => read_eval(&line, &mut session),
                Err(err) => {
                    eprintln!("{}", err);
                    break;
                },
            }
        }
        return;
    }

    // run the repl / interactive mode
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}", err);
            return;
        },
    };

    fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        read_eval(&input, session);
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, &mut session) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }
}
