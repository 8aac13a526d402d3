use tracing_subscriber::{EnvFilter, FmtSubscriber, filter::LevelFilter};

/// Compact output at INFO unless `RUST_LOG` says otherwise
pub fn configure_logger() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .compact()
        .with_file(false)
        .with_target(false)
        .with_env_filter(filter)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("A global logger was already configured");
    }
}
