//! Tracing subscriber for the plugin binary.
//!
//! Events go to stdout and to a log file next to the config file. Panics are
//! logged as well, so a crash inside a diagram callback leaves a record in
//! the log file.

use std::{
    any::Any,
    fs::File,
    path::Path,
    sync::Arc,
    env,
    panic,
};
use backtrace::Backtrace;
use tracing_subscriber::{
    filter::Directive,
    fmt::{
        self,
        time::uptime,
    },
    prelude::*,
    Registry,
    EnvFilter,
};
use anyhow::{Context, Result};


/// Directives applied before any from `RUST_LOG`. Engine and plugin crates
/// log at debug, dependencies only warn.
const BASE_DIRECTIVES: &[&'static str] = &[
    "warn",
    "custom_diagram=debug",
    "diagram=debug",
    "draw=info",
];

/// Default log file, relative to the working directory.
pub const LOG_FILE_NAME: &'static str = "custom_diagram.log";


/// Log to stdout and `LOG_FILE_NAME`.
pub fn init_logging() -> Result<()> {
    init_logging_to(LOG_FILE_NAME)
}

/// Log to stdout and the given file, truncating it.
///
/// `RUST_LOG` directives are layered over the base directives. Any that
/// don't parse are reported once the subscriber is up, rather than
/// discarding the whole filter.
pub fn init_logging_to(log_path: impl AsRef<Path>) -> Result<()> {
    let log_path = log_path.as_ref();
    let (filter, rejected) = build_filter(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

    let stdout_log = fmt::layer()
        .compact()
        .with_timer(uptime())
        .with_target(false)
        .with_line_number(true);

    let log_file = File::create(log_path)
        .with_context(|| format!("unable to create log file {}", log_path.display()))?;
    let file_log = fmt::layer()
        .with_ansi(false)
        .with_timer(uptime())
        .with_file(true)
        .with_line_number(true)
        .with_writer(Arc::new(log_file));

    let subscriber = Registry::default()
        .with(filter)
        .with(stdout_log)
        .with(file_log);
    tracing::subscriber::set_global_default(subscriber)
        .context("unable to install log subscriber")?;

    for directive in rejected {
        warn!(%directive, "ignoring unparseable {} directive", EnvFilter::DEFAULT_ENV);
    }
    info!(log_file = %log_path.display(), "logging initialized");

    panic::set_hook(Box::new(|info| {
        let message = panic_message(info.payload());
        match info.location() {
            Some(location) => error!(
                file = location.file(),
                line = location.line(),
                "panicked: {}", message,
            ),
            None => error!("panicked: {}", message),
        }
        if backtrace_enabled(env::var("RUST_BACKTRACE").ok().as_deref()) {
            error!("{:?}", Backtrace::new());
        }
    }));
    Ok(())
}

/// Base directives plus those in `env_directives`, and whichever of the
/// latter failed to parse.
fn build_filter(env_directives: Option<&str>) -> (EnvFilter, Vec<String>) {
    let mut filter = EnvFilter::new(BASE_DIRECTIVES.join(","));
    let mut rejected = Vec::new();
    let env_directives = env_directives.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|directive| !directive.is_empty());
    for directive in env_directives {
        match directive.parse::<Directive>() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(_) => rejected.push(directive.to_owned()),
        }
    }
    (filter, rejected)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload.downcast_ref::<&str>().copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string payload>")
}

/// Backtraces are on unless `RUST_BACKTRACE` explicitly turns them off.
fn backtrace_enabled(rust_backtrace: Option<&str>) -> bool {
    rust_backtrace.map(|val| val != "0").unwrap_or(true)
}


#[test]
fn test_base_directives_parse() {
    for base in BASE_DIRECTIVES {
        assert!(base.parse::<Directive>().is_ok(), "{}", base);
    }
    let (_, rejected) = build_filter(None);
    assert!(rejected.is_empty());
}

#[test]
fn test_bad_env_directives_are_rejected_individually() {
    let (filter, rejected) = build_filter(Some("diagram=trace, draw=loud ,,custom_diagram=info"));
    assert_eq!(rejected, vec!["draw=loud".to_owned()]);
    let shown = filter.to_string();
    assert!(shown.contains("diagram=trace"));
    assert!(shown.contains("custom_diagram=info"));
}

#[test]
fn test_panic_message_payloads() {
    let literal: Box<dyn Any + Send> = Box::new("literal");
    let formatted: Box<dyn Any + Send> = Box::new(format!("page {}", 3));
    let other: Box<dyn Any + Send> = Box::new(3u8);
    assert_eq!(panic_message(&*literal), "literal");
    assert_eq!(panic_message(&*formatted), "page 3");
    assert_eq!(panic_message(&*other), "<non-string payload>");
}

#[test]
fn test_backtrace_toggle() {
    assert!(backtrace_enabled(None));
    assert!(backtrace_enabled(Some("1")));
    assert!(backtrace_enabled(Some("full")));
    assert!(!backtrace_enabled(Some("0")));
}
