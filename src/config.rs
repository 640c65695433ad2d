//! Extension configuration types.
//!
//! Configuration is organized into a few plain structures:
//!
//! - [`ExtensionConfig`] - Top-level configuration container
//! - [`PreviewPalette`] - Overlay colors per occupant filter kind
//! - [`LogConfig`] - Session log level and file name
//! - [`CursorSet`] - Cursor resource ids (re-exported from [`crate::mode`])
//!
//! Nothing is read from disk and nothing is persisted; the defaults describe
//! the shipped plugin.
//!
//! # Example
//!
//! ```rust
//! use bulldoze_extensions::config::{ExtensionConfig, LogConfig};
//!
//! let config = ExtensionConfig::default()
//!     .with_max_thickness(5)
//!     .with_log(LogConfig::default().with_level(log::LevelFilter::Debug));
//!
//! assert_eq!(config.supported_build, 641);
//! assert_eq!(config.max_thickness, 5);
//! ```

use std::path::PathBuf;

use crate::{
    geometry::MAX_THICKNESS,
    mode::{OccupantFilterKind, VK_B},
};

pub use crate::mode::CursorSet;

/// The only game build the extensions are written against.
pub const SUPPORTED_BUILD: u16 = 641;

/// An RGBA color as the host stores it: four `f32` channels in `0.0..=1.0`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PreviewColor {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl PreviewColor {
    /// Creates a color from its four channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        PreviewColor { r, g, b, a }
    }

    /// The channels in host order.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Overlay colors used for the "demolition OK" preview, per filter kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewPalette {
    /// Unrestricted demolition
    pub none: PreviewColor,
    /// Flora only
    pub flora: PreviewColor,
    /// Transportation networks only
    pub network: PreviewColor,
}

impl Default for PreviewPalette {
    fn default() -> Self {
        PreviewPalette {
            none: PreviewColor::new(0.30, 0.60, 0.85, 0.5),
            flora: PreviewColor::new(0.38, 0.69, 0.38, 0.5),
            network: PreviewColor::new(0.98, 0.60, 0.20, 0.5),
        }
    }
}

impl PreviewPalette {
    /// The preview color for a filter kind.
    #[must_use]
    pub const fn color_for(&self, kind: OccupantFilterKind) -> PreviewColor {
        match kind {
            OccupantFilterKind::None => self.none,
            OccupantFilterKind::Flora => self.flora,
            OccupantFilterKind::Network => self.network,
        }
    }
}

/// Session log configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Maximum level written to the log file.
    ///
    /// `RUST_LOG` overrides this when set.
    pub level: log::LevelFilter,

    /// File name of the log, created next to the plugin.
    pub file_name: String,

    /// Directory for the log file; `None` means the plugin's own directory.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: log::LevelFilter::Info,
            file_name: "SC4BulldozeExtensions.log".to_string(),
            directory: None,
        }
    }
}

impl LogConfig {
    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: log::LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Sets the log file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Places the log file in `directory` instead of the plugin directory.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }
}

/// Top-level configuration of the bulldoze extensions.
///
/// # Presets
///
/// - [`default()`](Self::default) - the shipped plugin
/// - [`verbose()`](Self::verbose) - same behavior, debug-level session log
#[derive(Clone, Debug, PartialEq)]
pub struct ExtensionConfig {
    /// Game build required for installation.
    pub supported_build: u16,

    /// Largest stripe thickness in either direction, clamped to `1..=9`.
    pub max_thickness: i32,

    /// Virtual key code of the mode toggle key.
    pub toggle_key: u32,

    /// Preview overlay colors.
    pub palette: PreviewPalette,

    /// Cursor resource ids.
    pub cursors: CursorSet,

    /// Session log settings.
    pub log: LogConfig,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        ExtensionConfig {
            supported_build: SUPPORTED_BUILD,
            max_thickness: MAX_THICKNESS,
            toggle_key: VK_B,
            palette: PreviewPalette::default(),
            cursors: CursorSet::default(),
            log: LogConfig::default(),
        }
    }
}

impl ExtensionConfig {
    /// The shipped configuration with a debug-level session log.
    #[must_use]
    pub fn verbose() -> Self {
        ExtensionConfig {
            log: LogConfig::default().with_level(log::LevelFilter::Debug),
            ..Default::default()
        }
    }

    /// Sets the thickness limit. Values outside `1..=9` are clamped.
    #[must_use]
    pub fn with_max_thickness(mut self, max: i32) -> Self {
        self.max_thickness = max.clamp(1, MAX_THICKNESS);
        self
    }

    /// Sets the mode toggle key.
    #[must_use]
    pub fn with_toggle_key(mut self, key: u32) -> Self {
        self.toggle_key = key;
        self
    }

    /// Replaces the preview palette.
    #[must_use]
    pub fn with_palette(mut self, palette: PreviewPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Replaces the cursor ids.
    #[must_use]
    pub fn with_cursors(mut self, cursors: CursorSet) -> Self {
        self.cursors = cursors;
        self
    }

    /// Replaces the log settings.
    #[must_use]
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_matches_kinds() {
        let palette = PreviewPalette::default();
        assert_eq!(
            palette.color_for(OccupantFilterKind::Flora).to_array(),
            [0.38, 0.69, 0.38, 0.5]
        );
        assert_eq!(
            palette.color_for(OccupantFilterKind::Network).to_array(),
            [0.98, 0.60, 0.20, 0.5]
        );
        assert_eq!(
            palette.color_for(OccupantFilterKind::None).to_array(),
            [0.30, 0.60, 0.85, 0.5]
        );
    }

    #[test]
    fn max_thickness_is_clamped() {
        assert_eq!(ExtensionConfig::default().with_max_thickness(0).max_thickness, 1);
        assert_eq!(ExtensionConfig::default().with_max_thickness(12).max_thickness, 9);
    }

    #[test]
    fn verbose_preset() {
        let config = ExtensionConfig::verbose();
        assert_eq!(config.log.level, log::LevelFilter::Debug);
        assert_eq!(config.supported_build, SUPPORTED_BUILD);
        assert_eq!(config.toggle_key, 0x42);
    }
}
