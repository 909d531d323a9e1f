//! dupsearch - report files with identical content.
//!
//! Entry point for the dupsearch CLI application.

use clap::Parser;
use dupsearch::{
    cli::Cli,
    error::{ExitCode, StructuredError},
};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and exit 0
            let code = if err.use_stderr() {
                ExitCode::UsageError.as_i32()
            } else {
                ExitCode::Success.as_i32()
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    let json_errors = cli.json_errors;

    match dupsearch::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::for_error(&err);

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{}", json);
                } else {
                    eprintln!("[{}] Error: {}", exit_code.code_prefix(), err);
                }
            } else {
                eprintln!("[{}] Error: {}", exit_code.code_prefix(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
