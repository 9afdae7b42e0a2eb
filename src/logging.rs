use std::sync::Arc;

/// Destination for component debug output.
///
/// Each component receives its sink explicitly; there is no global logger
/// behind the library API.
pub trait DebugSink: Send + Sync {
    fn debug(&self, component: &'static str, message: &str);
}

pub type SharedSink = Arc<dyn DebugSink>;

/// Forwards to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DebugSink for TracingSink {
    fn debug(&self, component: &'static str, message: &str) {
        tracing::debug!(component, "{message}");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DebugSink for NoopSink {
    fn debug(&self, _component: &'static str, _message: &str) {}
}

pub fn tracing_sink() -> SharedSink {
    Arc::new(TracingSink)
}

pub fn noop_sink() -> SharedSink {
    Arc::new(NoopSink)
}

/// Install the stderr subscriber used by the `disperse` binary.
///
/// `RUST_LOG` overrides the default `disperse_engine=info` filter.
#[cfg(feature = "full")]
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose {
        "disperse_engine=debug"
    } else {
        "disperse_engine=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Already installed (tests call this more than once).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
