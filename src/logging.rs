//! Status output.
//!
//! Every line is written as `glock: <message>`. Warnings and errors go to
//! stderr, everything else to stdout. The filter is read from `GLOCK_LOG`
//! (default `info`), e.g. `GLOCK_LOG=debug` to see owner probes.

use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Prefix of every status line.
pub const TAG: &str = "glock";

/// Environment variable holding the filter directive.
pub const FILTER_ENV: &str = "GLOCK_LOG";

/// Formats events as `TAG: message field=value`, without time or level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedFormat;

impl<S, N> FormatEvent<S, N> for TaggedFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{}: ", TAG)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(TaggedFormat)
        .with_writer(writer)
        .try_init();
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `emit` with a tagged subscriber and return everything it logged.
    pub(crate) fn capture(emit: impl FnOnce()) -> String {
        let buf = SharedBuf::default();
        let sink = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .event_format(TaggedFormat)
            .with_writer(move || sink.clone())
            .with_max_level(Level::DEBUG)
            .finish();

        tracing::subscriber::with_default(subscriber, emit);

        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn lines_carry_the_tag() {
        let out = capture(|| tracing::info!("obtained lockfile: {}", "/tmp/glockfile"));
        assert_eq!(out, "glock: obtained lockfile: /tmp/glockfile\n");
    }

    #[test]
    fn structured_fields_follow_the_message() {
        let out = capture(|| tracing::warn!(attempt = 2, "lock file error"));
        assert!(out.starts_with("glock: lock file error"), "got {:?}", out);
        assert!(out.contains("attempt=2"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init();
        init();
    }
}
