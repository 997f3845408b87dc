//! Bystander CLI entry point.

use bystander_runtime::{Document, Mode, OutputFormat, Repl, encode, process_path, process_source};
use bystander_script::{BatchConfig, ErrorPolicy};
use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    tokens: bool,
    dialogue: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
    skip_errors: bool,
    parallel: bool,
    verbose: bool,
}

impl CliConfig {
    fn mode(&self) -> Mode {
        if self.dialogue {
            Mode::Dialogue
        } else if self.tokens {
            Mode::Tokens
        } else {
            Mode::Parse
        }
    }

    fn batch_config(&self) -> BatchConfig {
        let policy = if self.skip_errors {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        };
        BatchConfig::new()
            .with_policy(policy)
            .with_parallel(self.parallel)
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--tokens" => config.tokens = true,
            "--dialogue" => config.dialogue = true,
            "--skip-errors" => config.skip_errors = true,
            "--parallel" => config.parallel = true,
            "-v" | "--verbose" => config.verbose = true,
            "--format" => {
                let value = args.next().ok_or("--format requires a value")?;
                config.format = value.parse()?;
            }
            "-o" | "--output" => {
                let value = args.next().ok_or("--output requires a path")?;
                config.output = Some(PathBuf::from(value));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
    }

    Ok(config)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("bystander {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_tracing(config.verbose);

    let mode = config.mode();
    let batch = config.batch_config();

    if config.batch_mode || !config.files.is_empty() {
        let documents = if config.files.is_empty() {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            vec![process_source(&raw, mode, &batch)?]
        } else {
            config
                .files
                .iter()
                .map(|path| process_path(path, mode, &batch))
                .collect::<Result<Vec<Document>, _>>()?
        };

        debug!(documents = documents.len(), format = ?config.format, "writing output");
        let bytes = encode(&documents, config.format)?;
        bystander_runtime::write_output(&bytes, config.output.as_deref())?;
        return Ok(());
    }

    let mut repl = Repl::new()?
        .with_config(batch)
        .with_tokens(config.tokens)
        .with_dialogue(config.dialogue);
    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mBystander\x1b[0m - Story script tokenizer and parser

\x1b[1mUSAGE:\x1b[0m
    bystander [OPTIONS] [PATHS...]

\x1b[1mARGUMENTS:\x1b[0m
    [PATHS...]    Script files to process; directories are read as chapters
                  in dialogue mode. Without paths, starts the REPL.

\x1b[1mOPTIONS:\x1b[0m
    -h, --help           Print help information
    -V, --version        Print version information
    -b, --batch          Process input and exit; reads stdin if no paths
    --tokens             Output token streams instead of parsed lines
    --dialogue           Output speaker/text pairs
    --format FORMAT      Output format: text, json, msgpack (default: text)
    -o, --output PATH    Write output to PATH instead of stdout
    --skip-errors        Skip lines that fail to parse instead of stopping
    --parallel           Parse lines on all cores
    -v, --verbose        Log debug events (otherwise RUST_LOG applies)

\x1b[1mEXAMPLES:\x1b[0m
    bystander                              Start interactive REPL
    bystander level_01.txt                 Print parsed lines
    bystander --dialogue --format json ch1 Extract a chapter as JSON
    cat a.txt | bystander -b --tokens      Dump tokens from stdin

\x1b[1mREPL COMMANDS:\x1b[0m
    :tokens on|off   Show or hide token streams
    :dialogue        Toggle dialogue mode
    :load PATH       Process a script file or chapter directory
    :help            Show commands
    :quit            Exit (or Ctrl+D)"
    );
}
