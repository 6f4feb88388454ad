use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Initialize the global configuration from `path` (or `config.toml`)
///
/// If the file doesn't exist, uses environment overrides and defaults.
/// Later calls return the already-loaded value. Request handlers never read
/// the global; they receive the settings they need at construction.
pub fn init_config(path: Option<&str>) -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::load(path)))
        .load_full()
}
