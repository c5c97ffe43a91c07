//! Tracing integration for observability.
//!
//! With the `tracing` feature enabled (the default), the crate emits events
//! under the `ability` target:
//!
//! | Level   | Event                                                  |
//! |---------|--------------------------------------------------------|
//! | `debug` | every decision (`action`, `subject`, `allowed`, `reason`) |
//! | `error` | configuration errors raised by a check                 |
//! | `warn`  | duplicate registrations under `DuplicatePolicy::Warn`  |
//! | `trace` | ability creation (`policies`)                          |
//!
//! ## Example
//!
//! ```rust,ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("ability=debug")
//!     .init();
//!
//! let allowed = ability.can("update", &book)?;
//! // DEBUG ability: ability check action="update" subject="Book" allowed=true reason=rule
//! ```
//!
//! Without the feature these helpers compile to nothing.

use crate::{Result, types::Decision};

/// Records the outcome of a single check.
#[cfg(feature = "tracing")]
pub(crate) fn record_check(action: &str, subject: &str, result: &Result<Decision>) {
    match result {
        Ok(decision) => tracing::debug!(
            target: "ability",
            action,
            subject,
            allowed = decision.is_allowed(),
            reason = %decision.reason(),
            "ability check"
        ),
        Err(err) => tracing::error!(
            target: "ability",
            action,
            subject,
            kind = %err.kind(),
            error = %err,
            "ability misconfigured"
        ),
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn record_check(_action: &str, _subject: &str, _result: &Result<Decision>) {}

/// Records a subject name registered more than once.
#[cfg(feature = "tracing")]
pub(crate) fn record_duplicate(subject: &str) {
    tracing::warn!(target: "ability", subject, "policy registered more than once, keeping the last");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn record_duplicate(_subject: &str) {}

/// Records the creation of an ability.
#[cfg(feature = "tracing")]
pub(crate) fn record_created(policies: usize) {
    tracing::trace!(target: "ability", policies, "ability created");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn record_created(_policies: usize) {}

#[cfg(all(test, feature = "tracing"))]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::{io, sync::Arc};

    use parking_lot::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::Error;

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CaptureWriter {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        writer.contents()
    }

    #[test]
    fn test_record_check_decision() {
        let output = capture(|| record_check("update", "Book", &Ok(Decision::rule(true))));
        assert!(output.contains("ability check"));
        assert!(output.contains("action=\"update\""));
        assert!(output.contains("subject=\"Book\""));
        assert!(output.contains("allowed=true"));
        assert!(output.contains("reason=rule"));
    }

    #[test]
    fn test_record_check_error() {
        let output = capture(|| record_check("view", "Magazine", &Err(Error::policy_not_found("Magazine"))));
        assert!(output.contains("ERROR"));
        assert!(output.contains("ability misconfigured"));
        assert!(output.contains("policy not found"));
    }

    #[test]
    fn test_record_duplicate() {
        let output = capture(|| record_duplicate("Book"));
        assert!(output.contains("WARN"));
        assert!(output.contains("subject=\"Book\""));
    }

    #[test]
    fn test_record_created() {
        let output = capture(|| record_created(3));
        assert!(output.contains("policies=3"));
    }
}
