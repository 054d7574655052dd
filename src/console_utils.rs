//! Logging setup for binaries and tools built on this crate

use tracing_core::{Event, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    filter::LevelFilter,
    fmt::{
        self, FmtContext, FormatEvent, FormatFields,
        format::{Format, Writer},
    },
    prelude::*,
    registry::LookupSpan,
    util::TryInitError,
};

/// Prints `INFO` events of this workspace as bare messages and every other
/// event with its level, without timestamps or targets.
pub struct TracingFormatter;

impl<S, N> FormatEvent<S, N> for TracingFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        if *metadata.level() == tracing_core::metadata::Level::INFO
            && metadata.target().starts_with("variantlib")
        {
            ctx.format_fields(writer.by_ref(), event)?;
            writeln!(writer)
        } else {
            Format::default()
                .without_time()
                .with_target(false)
                .format_event(ctx, writer, event)
        }
    }
}

/// Constructs the [`EnvFilter`] used when `RUST_LOG` is not set.
pub fn get_default_env_filter(verbosity: LevelFilter) -> EnvFilter {
    EnvFilter::new(format!("warn,variantlib={verbosity}"))
}

/// Install a global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbosity` when it is set.
pub fn init_logging(verbosity: LevelFilter) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| get_default_env_filter(verbosity));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .event_format(TracingFormatter),
        )
        .try_init()
}
