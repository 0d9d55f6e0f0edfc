//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize logging at `level`, keeping any module filters from `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_with_level(log::LevelFilter::Debug);
        init_with_level(log::LevelFilter::Trace);
        info!("logging initialised twice");
    }
}
