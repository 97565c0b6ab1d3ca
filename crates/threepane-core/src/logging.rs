/// Install the process-wide tracing subscriber.
///
/// Intended for binary entry points; library code and tests only emit
/// events and never install a subscriber themselves.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,threepane=debug".into()),
        )
        .init();
}
