//! Render config loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable config files.

use std::fs;
use std::path::Path;

use crate::error::RenderError;
use crate::rasterizer::RenderConfig;

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, RenderError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &RenderConfig, path: P) -> Result<(), RenderError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(2)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Parse a config from a RON string. Missing fields take their defaults.
pub fn load_config_from_str(s: &str) -> Result<RenderConfig, RenderError> {
    let config: RenderConfig = ron::from_str(s)?;
    if config.width == 0 || config.height == 0 {
        return Err(RenderError::InvalidDimensions { width: config.width, height: config.height });
    }
    Ok(config)
}
