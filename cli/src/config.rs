use clap::Args;
use neuronet_core::{EngineConfig, DEFAULT_DUMP_COLS, DEFAULT_DUMP_ROWS};

/// Engine and front-end settings. Each flag falls back to an environment
/// variable, then to its default.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Maximum memory for the CSR arrays (MB). A load exceeding it fails
    /// and keeps the previous graph. Unset = no cap.
    #[arg(
        long,
        env = "NEURONET_MAX_MEMORY_MB",
        value_parser = clap::value_parser!(u32).range(1..=131072)
    )]
    pub max_memory_mb: Option<u32>,

    /// row_ptr entries shown by the debug dump.
    #[arg(long, env = "NEURONET_DUMP_ROWS", default_value_t = DEFAULT_DUMP_ROWS)]
    pub dump_rows: usize,

    /// column_indices entries shown by the debug dump.
    #[arg(long, env = "NEURONET_DUMP_COLS", default_value_t = DEFAULT_DUMP_COLS)]
    pub dump_cols: usize,

    /// Log filter when RUST_LOG is not set (e.g. "info", "neuronet_core=debug").
    #[arg(long, env = "NEURONET_LOG", default_value = "info")]
    pub log_level: String,
}

impl Settings {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_memory_mb: self.max_memory_mb.map(|mb| mb as usize),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_memory_mb: None,
            dump_rows: DEFAULT_DUMP_ROWS,
            dump_cols: DEFAULT_DUMP_COLS,
            log_level: "info".to_string(),
        }
    }
}

/// Install the stderr log subscriber. RUST_LOG takes precedence.
pub fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (e.g. in tests) is harmless; ignore the error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
