use std::process::ExitCode;

use clap::Parser;
use npyplot::cli::Args;
use npyplot::{ViewerSettings, logging, plot};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let options = args.to_display_options();
    let settings = ViewerSettings::default().with_title(window_title(&args));

    match plot(&args.paths, &options, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("run failed: {e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn window_title(args: &Args) -> String {
    match args.paths.as_slice() {
        [single] => format!("npyplot - {}", single.display()),
        paths => format!("npyplot - {} arrays", paths.len()),
    }
}
