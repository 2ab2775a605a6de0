use anyconf_pager::PagerConfig;
use anyhow::{Context, anyhow, ensure};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Height given to every session card when no layout engine measures them.
const DEFAULT_ITEM_HEIGHT: f32 = 120.0;

const PATH_VAR: &str = "ANYCONF_CONFIG_PATH";
const INLINE_VAR: &str = "ANYCONF_CONFIG_JSON";

/// Files probed, in order, relative to the working directory.
const DEFAULT_FILES: &[&str] = &[
    "anyconf.toml",
    "anyconf.json",
    "config/anyconf.toml",
    "config/anyconf.json",
];

/// Source that produced the viewer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Document format of a config source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    /// Unknown extension: TOML is tried first, then JSON.
    Either,
}

impl ConfigFormat {
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            Some("toml" | "tml") => Self::Toml,
            _ => Self::Either,
        }
    }
}

/// Viewer settings. The `pager` table tunes page geometry, gesture feel
/// and transition timing; the remaining keys only affect replays.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub pager: PagerConfig,
    /// Fixed card height used when packing sessions for a replay.
    pub item_height: f32,
    /// Restrict the collection to sessions on this date (`YYYY-MM-DD`).
    pub day: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            pager: PagerConfig::default(),
            item_height: DEFAULT_ITEM_HEIGHT,
            day: None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl ViewerConfig {
    /// Resolve the configuration from `$ANYCONF_CONFIG_PATH`, then inline
    /// JSON in `$ANYCONF_CONFIG_JSON`, then the first default file present,
    /// then built-in defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, ViewerConfigSource)> {
        if let Some(path) = non_empty_var(PATH_VAR).map(PathBuf::from) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ViewerConfigSource::EnvPath(path)));
        }

        if let Some(raw) = non_empty_var(INLINE_VAR) {
            let config = Self::parse(&raw, ConfigFormat::Json)
                .with_context(|| format!("invalid {INLINE_VAR}"))?;
            return Ok((config, ViewerConfigSource::EnvInline));
        }

        match DEFAULT_FILES.iter().map(Path::new).find(|path| path.exists()) {
            Some(path) => {
                let config = Self::load_from_file(path)?;
                Ok((config, ViewerConfigSource::File(path.to_path_buf())))
            }
            None => Ok((Self::default(), ViewerConfigSource::Default)),
        }
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read viewer config from {}", path.display())
        })?;
        Self::parse(&contents, ConfigFormat::of(path)).with_context(|| {
            format!("invalid viewer config {}", path.display())
        })
    }

    /// Deserialize and validate a config document.
    pub fn parse(contents: &str, format: ConfigFormat) -> anyhow::Result<Self> {
        let config: Self = match format {
            ConfigFormat::Toml => toml::from_str(contents)?,
            ConfigFormat::Json => serde_json::from_str(contents)?,
            ConfigFormat::Either => {
                toml::from_str(contents).or_else(|toml_err| {
                    serde_json::from_str(contents).map_err(|json_err| {
                        anyhow!(
                            "not TOML ({toml_err}) and not JSON ({json_err})"
                        )
                    })
                })?
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.pager.validate().context("invalid pager settings")?;
        ensure!(
            self.item_height.is_finite() && self.item_height > 0.0,
            "item_height must be a positive number, got {}",
            self.item_height
        );
        Ok(())
    }
}
