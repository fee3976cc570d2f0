//! Viewer configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Command-line flags are applied on top by the binary.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::Mode;

/// Key that hides the mask overlay while held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuppressKey {
    #[default]
    Shift,
    Ctrl,
    Alt,
    Space,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Interaction mode for the session.
    pub mode: Mode,
    /// Masks covering more than this fraction of the image are not drawn.
    pub mask_area_threshold: f32,
    /// Initial state of the overlay.
    pub show_overlay: bool,
    pub suppress_key: SuppressKey,
    pub window_title: String,
    /// Initial window size; the image is fitted inside it.
    pub max_window: [usize; 2],
    pub debug_log: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Click,
            mask_area_threshold: 1.0,
            show_overlay: true,
            suppress_key: SuppressKey::Shift,
            window_title: "Mask Overlay".to_string(),
            max_window: [1280, 800],
            debug_log: false,
        }
    }
}

impl ViewerConfig {
    /// Load from a JSON file and validate.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: ViewerConfig =
            serde_json::from_str(&text).map_err(|source| Error::Config { path: path.to_path_buf(), source })?;
        config.validated()
    }

    /// Clamp the threshold into [0,1]; reject values that cannot be used at all.
    pub fn validated(mut self) -> Result<Self> {
        if self.mask_area_threshold.is_nan() {
            return Err(Error::InvalidConfig {
                field: "mask_area_threshold",
                message: "must be a number in [0, 1]".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.mask_area_threshold) {
            let clamped = self.mask_area_threshold.clamp(0.0, 1.0);
            warn!(value = self.mask_area_threshold, clamped, "mask_area_threshold out of range");
            self.mask_area_threshold = clamped;
        }
        if self.max_window[0] == 0 || self.max_window[1] == 0 {
            return Err(Error::InvalidConfig {
                field: "max_window",
                message: format!("{:?} has a zero side", self.max_window),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_object_gives_defaults() {
        let file = write_config("{}");
        assert_eq!(ViewerConfig::load(file.path()).unwrap(), ViewerConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let file = write_config(r#"{"mode":"box","mask_area_threshold":0.25,"suppress_key":"alt"}"#);
        let cfg = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(cfg.mode, Mode::Box);
        assert_eq!(cfg.mask_area_threshold, 0.25);
        assert_eq!(cfg.suppress_key, SuppressKey::Alt);
        assert!(cfg.show_overlay);
    }

    #[test]
    fn threshold_is_clamped() {
        let file = write_config(r#"{"mask_area_threshold":1.7}"#);
        assert_eq!(ViewerConfig::load(file.path()).unwrap().mask_area_threshold, 1.0);
    }

    #[test]
    fn unknown_mode_is_a_config_error() {
        let file = write_config(r#"{"mode":"lasso"}"#);
        assert!(matches!(ViewerConfig::load(file.path()), Err(Error::Config { .. })));
    }

    #[test]
    fn zero_window_is_rejected() {
        let cfg = ViewerConfig { max_window: [0, 600], ..Default::default() };
        assert!(matches!(cfg.validated(), Err(Error::InvalidConfig { field: "max_window", .. })));
    }
}
