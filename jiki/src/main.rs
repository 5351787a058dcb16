use clap::{Parser, Subcommand};
use jikiscript_interpreter::{interpret, EvaluationContext, FrameStatus, InterpretResult};
use miette::{IntoDiagnostic, MietteHandlerOpts, Result};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "jiki",
    version,
    about = "The JikiScript toolchain",
    long_about = "JikiScript is a small teaching language whose runs are recorded as replayable frames."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a JikiScript program
    Run {
        /// Source file to run (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Run a program and print every recorded execution frame
    Trace {
        /// Source file to trace (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Show the variable snapshot on each frame
        #[arg(short, long)]
        variables: bool,
    },

    /// Parse JikiScript source files and display their AST (debug only)
    Parse {
        /// Source files to parse (use '-' to read from stdin)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { file }) => {
            handle_run_command(file, false, false);
        }
        Some(Commands::Trace { file, variables }) => {
            handle_run_command(file, true, variables);
        }
        Some(Commands::Parse { files }) => {
            handle_parse_command(files);
        }
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["jiki", "--help"]);
        }
    }
}

fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

fn handle_run_command(file: PathBuf, trace: bool, variables: bool) {
    let result = read_source(&file).map(|source| run_source(&source, trace, variables));

    match result {
        Ok(run) => {
            if run.error.is_some() {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{:?}", e);
            process::exit(1);
        }
    }
}

fn run_source(source: &str, trace: bool, variables: bool) -> InterpretResult {
    let result = interpret(source, EvaluationContext::with_stdlib());

    if trace {
        for frame in &result.frames {
            let marker = match frame.status {
                FrameStatus::Succeeded => "✅",
                FrameStatus::Errored => "❌",
            };
            println!(
                "{marker} [{:>4}] L{:<3} {}",
                frame.index, frame.line, frame.description
            );
            if variables {
                for (name, value) in &frame.variables {
                    println!("              {name} = {value}");
                }
            }
        }
    }

    if let Some(error) = &result.error {
        eprintln!(
            "error (line {}, column {}): {}",
            error.line, error.column, error.message
        );
    }
    result
}

fn handle_parse_command(files: Vec<PathBuf>) {
    let mut success = true;
    let multiple_files = files.len() > 1;

    for file_path in files {
        let display_name = if file_path.to_str() == Some("-") {
            "<stdin>".to_string()
        } else {
            file_path.display().to_string()
        };

        match parse_single_file(&file_path) {
            Ok(()) => {
                if multiple_files {
                    println!("✅ {}", display_name);
                }
            }
            Err(e) => {
                eprintln!("{:?}", e);
                success = false;
            }
        }
    }

    if !success {
        process::exit(1);
    }
}

fn parse_single_file(file_path: &PathBuf) -> Result<()> {
    let source = read_source(file_path)?;
    let program = jikiscript_parser::parse_program(&source)?;
    println!("{:#?}", program);
    Ok(())
}

fn read_source(file_path: &PathBuf) -> Result<String> {
    if file_path.to_str() == Some("-") {
        // Read from stdin
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).into_diagnostic()?;
        return Ok(buffer);
    }

    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }

    if file_path.extension().and_then(|s| s.to_str()) != Some("jiki") {
        return Err(miette::miette!(
            "Expected .jiki file, got: {}",
            file_path.display()
        ));
    }

    fs::read_to_string(file_path).into_diagnostic()
}
