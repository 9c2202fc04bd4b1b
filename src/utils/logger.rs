use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` always wins; otherwise `verbose` beats a configured level.
pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    let fallback = match (verbose, level) {
        (true, _) => "cart_store=debug,info".to_string(),
        (false, Some(level)) => format!("cart_store={}", level),
        (false, None) => "cart_store=info".to_string(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
