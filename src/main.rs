use clap::Parser;
use egg::cli::{generate_completions, Args, Commands};
use egg::config::{init_logging, AppConfig};
use egg::diagnostic::render_diagnostics;
use egg::interpreter::{Environment, Interpreter, InterpreterError};
use egg::Value;
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() {
    let args = Args::parse();

    if let Some(Commands::Complete { shell }) = args.command {
        generate_completions(shell);
        return;
    }

    let config = AppConfig::from_args(&args);
    init_logging(&config);

    let mut interp = Interpreter::builder()
        .output(io::stdout())
        .max_depth(config.max_depth)
        .build();

    let (name, fragments) = if let Some(program) = &args.eval {
        ("<eval>".to_string(), vec![program.clone()])
    } else if !args.files.is_empty() {
        let mut fragments = Vec::with_capacity(args.files.len());
        for file in &args.files {
            match read_file(file) {
                Ok(text) => fragments.push(text),
                Err(e) => {
                    error_message(&config, &e);
                    std::process::exit(1);
                }
            }
        }
        (args.files[0].display().to_string(), fragments)
    } else {
        run_interactive_mode(&mut interp, &config);
        return;
    };

    tracing::debug!(source = %name, fragments = fragments.len(), "running program");
    let fragments: Vec<&str> = fragments.iter().map(String::as_str).collect();
    match interp.run(&fragments) {
        Ok(value) => print_result(&config, &value),
        Err(err) => {
            report(&config, &fragments.join("\n"), &name, &err);
            std::process::exit(1);
        }
    }
}

/// One program per line. Definitions persist in a session frame below the
/// global environment until the user leaves.
fn run_interactive_mode(interp: &mut Interpreter, config: &AppConfig) {
    let interactive = atty::is(atty::Stream::Stdin);
    if interactive && !config.quiet {
        println!("Egg {}. Type exit or quit to leave.", env!("CARGO_PKG_VERSION"));
    }

    let session = Environment::with_parent(interp.global());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("egg> ");
            let _ = io::stdout().flush();
        }

        let line = match lines.next() {
            None => break,
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                error_message(config, &format!("Error reading input: {}", e));
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }

        match interp.run_in(&line, &session) {
            Ok(value) => print_result(config, &value),
            Err(err) => report(config, &line, "<repl>", &err),
        }
    }
}

fn print_result(config: &AppConfig, value: &Value) {
    if !config.quiet {
        println!("{}", value);
    }
}

fn report(config: &AppConfig, source: &str, name: &str, err: &InterpreterError) {
    let rendered = render_diagnostics(source, name, &[err.to_diagnostic()], config.color_enabled);
    eprint!("{}", rendered);
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

fn error_message(config: &AppConfig, message: &str) {
    if config.color_enabled {
        eprintln!("{}", message.red().bold());
    } else {
        eprintln!("{}", message);
    }
}
