//! Tracing setup for the desktop binary.
//!
//! `QUIZDECK_LOG` takes `EnvFilter` directives; `QUIZDECK_LOG_FORMAT=json`
//! switches to structured output.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,quizdeck=debug,services=debug,api=debug";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("QUIZDECK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match std::env::var("QUIZDECK_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
