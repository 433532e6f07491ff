use std::process::ExitCode;

use mixrun::runner::{run_command, RunnerError};
use mixrun::ui::{MessageBlock, OutputMode, PlainRenderer, Renderer};
use mixrun::{parse_command, print_usage, Command};

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    mixrun::init_tracing();
    let output_mode = OutputMode::from_env();

    let command = match parse_command(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            report(
                output_mode,
                &MessageBlock::new("Invalid command arguments", err.to_string())
                    .with_hint("Run `mixrun --help` for the accepted command forms"),
            );
            print_usage();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if let Command::Help = command {
        print_usage();
        return ExitCode::SUCCESS;
    }

    match run_command(command) {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(output_mode, &failure_block(&err));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn failure_block(err: &RunnerError) -> MessageBlock {
    let body = err.to_string();
    match err {
        RunnerError::MissingPath { .. } => MessageBlock::new("Point of interest not found", body)
            .with_hint("Pass an existing test directory or file"),
        RunnerError::Config(_) => MessageBlock::new("Invalid project configuration", body)
            .with_hint("Fix mixrun.toml or pass another file with --config"),
        RunnerError::Scan { .. } => MessageBlock::new("Could not scan the project", body),
        _ => MessageBlock::new("mixrun failed", body),
    }
}

fn report(mode: OutputMode, block: &MessageBlock) {
    let mut renderer = PlainRenderer::stderr(mode);
    if renderer.error_block(block).is_err() {
        eprintln!("{}: {}", block.title, block.body);
    }
}
