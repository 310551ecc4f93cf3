//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::Env;

/// Install the global subscriber. `RUST_LOG` overrides the per-env default.
///
/// `local` logs human-readable text at debug, `dev` text at info and
/// `prod` JSON at info.
pub fn init(env: Env) {
    let default_level = match env {
        Env::Local => "debug",
        Env::Dev | Env::Prod => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match env {
        Env::Prod => builder.json().init(),
        Env::Local | Env::Dev => builder.init(),
    }
}
