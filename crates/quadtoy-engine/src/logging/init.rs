use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "quadtoy_engine=debug,wgpu=warn"). `write_style` controls ANSI coloring.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Default filter when neither `LoggingConfig` nor `RUST_LOG` specifies one.
///
/// Demo code logs at info; the GPU stack is chatty at that level, so its
/// layers are held at warn.
fn default_filter() -> &'static str {
    "info,wgpu_core=warn,wgpu_hal=warn,naga=warn"
}

/// Initializes the global logger once.
///
/// Idempotent; subsequent calls are ignored. Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.parse_filters(default_filter());
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_quiets_gpu_stack() {
        let filter = default_filter();
        assert!(filter.starts_with("info"));
        for quiet in ["wgpu_core=warn", "wgpu_hal=warn", "naga=warn"] {
            assert!(filter.contains(quiet));
        }
    }
}
