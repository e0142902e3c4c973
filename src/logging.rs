//! Logger setup for the binary.
//!
//! Our own crates log at a level chosen by `-v`; wgpu, naga, winit and the
//! font stack are held at `error` so a normal run stays quiet.

use log::LevelFilter;

const OWN_CRATES: &[&str] = &["npyplot", "npyplot_gpu"];

/// Level for our crates given the number of `-v` flags.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. Later calls are ignored.
pub fn init(verbosity: u8) {
    let level = level_for(verbosity);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Error);
    for name in OWN_CRATES {
        builder.filter_module(name, level);
    }

    if builder.try_init().is_err() {
        log::debug!("Logger already installed");
    }
}
