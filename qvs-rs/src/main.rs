use std::process::ExitCode;

use clap::Parser;
use qvs::cli::{self, CliArgs};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    qvs::init_tracing(if args.debug { "debug" } else { "warn" });

    let report = match cli::run(&args) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("qvs: {e}");
            return ExitCode::from(1);
        }
    };

    if !args.quiet {
        if args.json {
            match cli::render_json(&report.vars) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("qvs: {e}");
                    return ExitCode::from(1);
                }
            }
        } else {
            print!("{}", cli::render_table(&report.vars));
        }
    }

    ExitCode::from(cli::exit_status(&args, &report))
}
