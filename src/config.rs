use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Environment variable that overrides the configured backend
pub const BACKEND_ENV: &str = "HEX_ARGB_BACKEND";

/// Backend requested in configuration.
///
/// `Auto` picks the fastest backend the CPU supports at startup.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendChoice {
    #[default]
    Auto,
    Scalar,
    Simd,
    SimdGather,
}

impl BackendChoice {
    /// The explicitly requested backend, `None` for auto-detection
    pub fn requested(self) -> Option<crate::Backend> {
        match self {
            BackendChoice::Auto => None,
            BackendChoice::Scalar => Some(crate::Backend::Scalar),
            BackendChoice::Simd => Some(crate::Backend::Simd),
            BackendChoice::SimdGather => Some(crate::Backend::SimdGather),
        }
    }
}

impl FromStr for BackendChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(BackendChoice::Auto),
            "scalar" => Ok(BackendChoice::Scalar),
            "simd" => Ok(BackendChoice::Simd),
            "simd_gather" | "simd-gather" | "gather" => Ok(BackendChoice::SimdGather),
            other => Err(format!(
                "unknown backend '{}' (expected auto, scalar, simd or simd_gather)",
                other
            )),
        }
    }
}

/// Decoder settings loaded from TOML.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Backend to dispatch to (auto-detected if not specified)
    #[serde(default)]
    pub backend: Option<BackendChoice>,
}

impl DecoderConfig {
    /// Parses decoder settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the built-in settings bundled with the library.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../config/default.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Loads settings from a custom file path.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Loads settings with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in settings (from library)
    /// 2. `~/.config/hex-argb/config.toml` (user overrides)
    /// 3. `./hex-argb.toml` (project-local overrides)
    /// 4. The `HEX_ARGB_BACKEND` environment variable
    ///
    /// Unreadable override files are skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("hex-argb").join("config.toml");
            config.merge_file(&user_config_path);
        }

        config.merge_file(Path::new("hex-argb.toml"));
        config.apply_env_override(std::env::var(BACKEND_ENV).ok().as_deref());

        Ok(config)
    }

    /// Loads the built-in settings with only the `HEX_ARGB_BACKEND` override.
    ///
    /// Touches no files, so it is safe to call lazily from a hot path.
    pub fn load_builtin_with_env() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::load_default()?;
        config.apply_env_override(std::env::var(BACKEND_ENV).ok().as_deref());
        Ok(config)
    }

    /// Merges another configuration into this one.
    ///
    /// Settings present in `other` win.
    pub fn merge(&mut self, other: DecoderConfig) {
        if other.backend.is_some() {
            self.backend = other.backend;
        }
    }

    /// Returns the effective backend choice, `Auto` if not set.
    pub fn effective_backend(&self) -> BackendChoice {
        self.backend.unwrap_or_default()
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::load_from_file(path) {
            Ok(file_config) => self.merge(file_config),
            Err(e) => {
                log::warn!("failed to load config from {:?}: {}", path, e);
            }
        }
    }

    fn apply_env_override(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            return;
        };
        match value.parse::<BackendChoice>() {
            Ok(choice) => self.backend = Some(choice),
            Err(e) => log::warn!("ignoring {}: {}", BACKEND_ENV, e),
        }
    }
}
