use gloaming_core::SkyConfig;

const EMBEDDED_CONFIG: &str = include_str!("../assets/sky.ron");

/// Configuration baked into the module at build time.
pub fn embedded_config() -> SkyConfig {
    load_config(EMBEDDED_CONFIG)
}

/// Parse a RON config, falling back to defaults on any error.
pub fn load_config(source: &str) -> SkyConfig {
    match SkyConfig::from_ron_str(source) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{e}; using built-in defaults");
            SkyConfig::default()
        }
    }
}
