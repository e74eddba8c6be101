use std::process::ExitCode;

use clap::Parser;
use help::help;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use dentaku_lib::prelude::*;

mod help;
mod snippets;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Evaluate an expression and exit; may be given more than once
    #[arg(short, long = "expr", value_name = "EXPRESSION")]
    exprs: Vec<String>,
}

const WELCOME: &str = "Welcome to dentaku!";
const TIP: &str =
    "Type an expression to evaluate it, 'help' if you're unsure what to do, or CTRL+C to exit.";
const PROMPT: &str = "dentaku +-> ";
const SIDEBAR: &str = "        |   ";
const REPL_SOURCE: &str = "<repl>";
const EXPR_SOURCE: &str = "<expr>";

fn print_arrowed(banner: &str) {
    let padded = format!(" {banner} ");
    println!("--------+-{padded:-<24}->");
}

fn print_sidebarred(text: &str) {
    println!("{SIDEBAR}{text}");
}

/// Handles one line of input, returning false once it is time to leave.
fn process_input(input: &str) -> bool {
    let lc_input = input.trim().to_lowercase();
    match lc_input.as_str() {
        "" => {}
        "exit" | "quit" => return false,
        _ if lc_input.starts_with("help") => help(&lc_input),
        _ => match evaluate(input) {
            Ok(value) => print_sidebarred(&value.to_string()),
            Err(errs) => render_error_vec(&errs, REPL_SOURCE, input),
        },
    }
    true
}

fn repl() -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    #[cfg(feature = "with-file-history")]
    if rl.load_history(".dentaku_history").is_err() {
        println!("No previous history.");
    }

    loop {
        let readline = rl.readline(PROMPT);
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                if !process_input(&line) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL+C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL+D");
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }

    #[cfg(feature = "with-file-history")]
    if let Err(err) = rl.save_history(".dentaku_history") {
        eprintln!("Failed to save history file:");
        eprintln!("{err}");
    };

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.exprs.is_empty() {
        let mut failed = false;
        for text in &cli.exprs {
            match evaluate(text) {
                Ok(value) => println!("{value}"),
                Err(errs) => {
                    render_error_vec(&errs, EXPR_SOURCE, text);
                    failed = true;
                }
            }
        }
        return if failed {
            ExitCode::from(2)
        } else {
            ExitCode::SUCCESS
        };
    }

    print_arrowed(WELCOME);
    print_sidebarred(TIP);
    match repl() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
