//! Logging and tracing initialization.

use crate::config::LoggingConfig;

/// Install the global tracing subscriber described by `config`.
///
/// `RUST_LOG` overrides the configured level when set. With a log file
/// configured (kiosk installs) output is appended there without ANSI
/// escapes; otherwise it goes to the console, human-readable or as
/// JSON lines.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    fn install(subscriber: impl tracing::Subscriber + Send + Sync + 'static) {
        // Repeated init attempts (tests) keep the first subscriber.
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = fmt::Subscriber::builder().with_env_filter(filter);

    if let Some(path) = &config.file {
        match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                install(
                    builder
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false)
                        .finish(),
                );
                return;
            }
            // Fall through to the console rather than silencing logs.
            Err(e) => eprintln!("could not open log file {}: {}", path.display(), e),
        }
    }

    if config.json {
        install(builder.json().finish());
    } else {
        install(
            builder
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        );
    }
}
