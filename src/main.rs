//! AccentStrip - rename audio files to accent-free names

use clap::Parser;
use std::process;
use accentstrip::output::ConsolePrinter;
use accentstrip::{init_logging, Args, BatchRenamer, Config, RenameError, Report, Result};

const EXIT_OK: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_DIRECTORY: i32 = 2;
const EXIT_PARTIAL: i32 = 3;

fn main() {
    let args = Args::parse();

    match run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(error_exit_code(&e));
        }
    }
}

fn error_exit_code(e: &RenameError) -> i32 {
    if e.is_directory_error() { EXIT_DIRECTORY } else { EXIT_ERROR }
}

fn report_exit_code(report: &Report) -> i32 {
    if report.has_failures() { EXIT_PARTIAL } else { EXIT_OK }
}

fn run(args: Args) -> Result<i32> {
    if let Some(path) = &args.init_config {
        init_logging(args.verbose);
        Config::create_default_config(path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(EXIT_OK);
    }

    let config = Config::from_args_and_config(args)?;
    init_logging(config.verbose());

    if config.verbose() {
        println!("{}", accentstrip::get_library_info());
    }

    let renamer = BatchRenamer::new(config);
    let mut printer = ConsolePrinter::stdout();
    let report = renamer.run(&mut printer)?;

    if let Some(path) = renamer.config().report_path() {
        report.save_to_file(path)?;
        println!("Report written to {}", path.display());
    }

    Ok(report_exit_code(&report))
}
