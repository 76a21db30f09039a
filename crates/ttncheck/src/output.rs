//! Plugin-line rendering and process exit.
//!
//! A monitoring core reads exactly one thing from us: a
//! `message|perfdata` line on stdout plus the exit code. Logs stay on
//! stderr.

use std::error::Error;

use ttncheck_core::{CheckError, CheckOutcome, PerfdataToken, ServiceState, perfdata};

/// Print the outcome line and exit with the verdict's code.
pub fn report(outcome: &CheckOutcome, always_ok: bool) -> ! {
    println!("{}", plugin_line(&outcome.message, &outcome.perfdata));
    exit_with(outcome.state, always_ok)
}

/// Print a sanitized diagnostic for `err` and exit UNKNOWN.
pub fn report_error(err: &CheckError, always_ok: bool) -> ! {
    println!("{}", sanitize(&error_chain(err)));
    exit_with(ServiceState::Unknown, always_ok)
}

fn exit_with(state: ServiceState, always_ok: bool) -> ! {
    let state = if always_ok { ServiceState::Ok } else { state };
    std::process::exit(state.exit_code())
}

/// `message|perfdata`, both sides trimmed; no `|` when there is no
/// perfdata.
fn plugin_line(message: &str, perfdata: &[PerfdataToken]) -> String {
    let message = message.trim();
    let rendered = perfdata::render(perfdata);
    let rendered = rendered.trim();
    if rendered.is_empty() {
        message.to_owned()
    } else {
        format!("{message}|{rendered}")
    }
}

/// Error display plus its source chain, joined into one line.
fn error_chain(err: &CheckError) -> String {
    let mut line = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        line.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    line
}

/// Angle brackets break the web UIs of some monitoring frontends;
/// swap them for quotes before the line goes out.
fn sanitize(text: &str) -> String {
    text.replace(['<', '>'], "'")
}
