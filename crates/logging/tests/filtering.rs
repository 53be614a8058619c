//! Integration tests for verbosity-driven filtering of the tracing macros.
//!
//! Each test installs a scoped subscriber writing into a buffer and checks
//! which events pass the filter built from [`Verbosity::directives`].

use std::io;
use std::sync::{Arc, Mutex};

use logging::{
    Verbosity, targets, trace_create, trace_delete, trace_resolve, trace_scan, trace_skip,
    trace_update,
};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("capture lock")).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("capture lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn emit_all(verbosity: Verbosity) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(verbosity.directives()))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        trace_create!(path = "out/a", "created file");
        trace_delete!(path = "out/b", "removed entry");
        trace_skip!(path = "out/c", "unchanged");
        trace_scan!(path = "src", entries = 3_usize, "scanned directory");
        trace_resolve!(link = "src/l", "followed link");
        trace_update!(output = "out", "update complete");
        tracing::warn!(target: targets::UPDATE, "update failed; rebuilding");
    });
    capture.contents()
}

#[test]
fn normal_shows_only_warnings() {
    let output = emit_all(Verbosity::Normal);
    assert!(output.contains("rebuilding"));
    assert!(!output.contains("update complete"));
    assert!(!output.contains("created file"));
}

#[test]
fn quiet_hides_recovered_failures() {
    let output = emit_all(Verbosity::Quiet);
    assert!(output.is_empty(), "{output}");
}

#[test]
fn verbose_adds_update_lifecycle() {
    let output = emit_all(Verbosity::Verbose);
    assert!(output.contains("update complete"));
    assert!(!output.contains("removed entry"));
}

#[test]
fn debug_adds_mutations_and_scans() {
    let output = emit_all(Verbosity::Debug);
    assert!(output.contains("created file"));
    assert!(output.contains("removed entry"));
    assert!(output.contains("scanned directory"));
    assert!(!output.contains("unchanged"));
    assert!(!output.contains("followed link"));
}

#[test]
fn trace_shows_everything_with_targets() {
    let output = emit_all(Verbosity::Trace);
    for (target, message) in [
        (targets::APPLY, "created file"),
        (targets::DELETE, "removed entry"),
        (targets::APPLY, "unchanged"),
        (targets::SCAN, "scanned directory"),
        (targets::RESOLVE, "followed link"),
        (targets::UPDATE, "update complete"),
    ] {
        let line = output
            .lines()
            .find(|line| line.contains(message))
            .unwrap_or_else(|| panic!("missing '{message}' in {output}"));
        assert!(line.contains(target), "{line}");
    }
}
