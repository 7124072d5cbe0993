use std::io;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub fn configure_logging() {
    // Console log configuration, overridable through RUST_LOG.
    // Written to stderr; stdout carries command results.
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,news_pipeline=info,news_fetch=warn,news_cache=warn")
    });
    let console_log = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(console_filter);

    // File log configuration
    let file_appender = rolling::daily("logs", "herald.log");
    let file_log = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(EnvFilter::new(
            "info,news_pipeline=debug,news_fetch=debug,news_cache=debug,reqwest=warn",
        ));

    tracing_subscriber::Registry::default()
        .with(console_log)
        .with(file_log)
        .init();
}
