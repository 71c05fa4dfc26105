use std::{fs, path::PathBuf, process};

use clap::Parser;
use giant::Interpreter;
use rustyline::{Config, DefaultEditor, error::ReadlineError};

const HISTORY_FILE: &str = ".giant_history";
const PROMPT: &str = ">>> ";
const CONTINUATION_PROMPT: &str = "... ";

/// GIANT is an interpreted language where values know their position
/// relative to named anchors.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file to execute; starts the interactive REPL when omitted.
    script: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    match args.script {
        Some(path) => run_file(&path),
        None => repl(),
    }
}

fn run_file(path: &PathBuf) {
    let source = fs::read_to_string(path).unwrap_or_else(|_| {
                     eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                               path.display());
                     process::exit(1);
                 });

    let mut interpreter = Interpreter::new();
    if !interpreter.execute(&source) {
        process::exit(1);
    }
}

fn repl() {
    let config = Config::builder().auto_add_history(true).build();
    let mut editor = match DefaultEditor::with_config(config) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to start the REPL: {e}");
            process::exit(1);
        },
    };
    let _ = editor.load_history(HISTORY_FILE);

    println!("GIANT v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'stop' to quit.");
    println!();

    let mut interpreter = Interpreter::new();
    let mut pending: Option<String> = None;

    loop {
        let line = if let Some(dedented) = pending.take() {
            dedented
        } else {
            match editor.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    eprintln!("Press Ctrl-D or type 'stop' to quit");
                    continue;
                },
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("Unexpected error: {e}");
                    break;
                },
            }
        };

        if line.trim() == "stop" {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let mut source = line;

        // A header ending in ':' opens an indented block. Keep reading until
        // a blank line or a dedent; a dedented statement is executed next.
        if source.trim_end().ends_with(':') {
            loop {
                match editor.readline(CONTINUATION_PROMPT) {
                    Ok(next) => {
                        if next.trim().is_empty() {
                            break;
                        }
                        if !next.starts_with([' ', '\t']) {
                            pending = Some(next);
                            break;
                        }
                        source.push('\n');
                        source.push_str(&next);
                    },
                    Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                    Err(e) => {
                        eprintln!("Unexpected error: {e}");
                        break;
                    },
                }
            }
        }

        interpreter.execute(&source);
    }

    if let Err(e) = editor.save_history(HISTORY_FILE) {
        eprintln!("Failed to save history: {e}");
    }
}
