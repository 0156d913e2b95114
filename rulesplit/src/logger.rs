// rulesplit/src/logger.rs
//! Logger setup for the CLI. Logs always go to stderr so that stdout only
//! carries rendered output.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes `env_logger`.
///
/// `RUST_LOG` is honoured, defaulting to `warn`. An explicit `level` replaces
/// whatever `RUST_LOG` selected. Calling this twice is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(Target::Stderr);
    let _ = builder.try_init();
}
