use std::{env, ffi::OsStr};

use tracing::{dispatcher, Subscriber};
use tracing_subscriber::{
    layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer, Registry,
};

fn init_once_subscriber() {
    // Skip init if has been set
    if dispatcher::has_been_set() {
        return;
    }

    fn init_layer_env_filter<S>() -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        ::tracing_subscriber::EnvFilter::from_default_env()
    }

    fn init_layer_stdfmt<S>() -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        // stdout is reserved for manifests
        ::tracing_subscriber::fmt::layer().with_writer(::std::io::stderr)
    }

    Registry::default()
        .with(init_layer_env_filter())
        .with(init_layer_stdfmt())
        .try_init()
        .ok();
}

pub fn init_once_with(level: impl AsRef<OsStr>) {
    // Skip init if has been set
    if dispatcher::has_been_set() {
        return;
    }

    // set custom tracing level
    env::set_var(KEY, level);

    init_once_subscriber()
}

pub fn init_once_with_level_int(level: u8) {
    init_once_with(level_from_int(level))
}

/// Maps a `-d` flag count onto a tracing level.
pub fn level_from_int(level: u8) -> &'static str {
    match level {
        0 => "WARN",
        1 => "INFO",
        2 => "DEBUG",
        _ => "TRACE",
    }
}

const KEY: &str = "RUST_LOG";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_levels() {
        assert_eq!(level_from_int(0), "WARN");
        assert_eq!(level_from_int(1), "INFO");
        assert_eq!(level_from_int(2), "DEBUG");
        assert_eq!(level_from_int(3), "TRACE");
        assert_eq!(level_from_int(42), "TRACE");
    }
}
