//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`~/.config/tintlog/config.toml` or `$XDG_CONFIG_HOME/tintlog/config.toml`)
//! 3. Built-in defaults

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::cli::{Cli, ColorMode, ColorizeArgs, Command};
use crate::error::TintError;
use crate::level::Level;
use crate::logger::{DEFAULT_ARCHIVE_DIR, DEFAULT_LOG_FILE, LoggerConfig};
use crate::pipeline::Pipeline;
use crate::processor::{StaticFieldStyles, StaticFieldTransform};
use crate::profile::Profile;
use crate::style::StyleSpan;
use crate::theme::{Theme, ThemeName};

/// Runtime configuration merged from defaults, config file, and CLI arguments.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::default`] for built-in defaults (useful in tests and benchmarks).
#[derive(Debug, Clone)]
pub struct Config {
    /// Color output mode (auto/always/never).
    pub color_mode: ColorMode,
    /// Minimum level written by the logger sinks.
    pub min_level: Level,
    pub theme: ThemeName,
    pub log_file: PathBuf,
    pub archive_dir: PathBuf,
    pub profile: Profile,
    /// Static field styles from `[fields]`, layered over the theme's own.
    pub field_styles: HashMap<String, StyleSpan>,
    /// Static value transforms from `[transforms.<key>]`.
    pub transforms: HashMap<String, HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            min_level: Level::Info,
            theme: ThemeName::Default,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            profile: Profile::default(),
            field_styles: HashMap::new(),
            transforms: HashMap::new(),
        }
    }
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// Merge precedence: CLI flags > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, TintError> {
        let mut config = Self::default();

        let config_path = cli.config.clone().unwrap_or_else(Self::default_config_path);
        if config_path.exists() {
            let file_config = FileConfig::load(&config_path)?;
            config.apply_file_config(file_config)?;
            log::debug!("loaded config from {}", config_path.display());
        } else if cli.config.is_some() {
            return Err(TintError::Config(format!(
                "config file {} does not exist",
                config_path.display()
            )));
        }

        if let Some(color) = cli.color {
            config.color_mode = color;
        }
        if let Some(level) = cli.level {
            config.min_level = level;
        }
        if let Some(theme) = cli.theme {
            config.theme = theme;
        }
        if let Some(path) = &cli.log_file {
            config.log_file.clone_from(path);
        }
        if let Some(dir) = &cli.archive_dir {
            config.archive_dir.clone_from(dir);
        }
        if let Some(Command::Colorize(args)) = &cli.command {
            config.apply_colorize_args(args);
        }

        Ok(config)
    }

    /// Default config file path: `$XDG_CONFIG_HOME/tintlog/config.toml` or `~/.config/tintlog/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("tintlog").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("tintlog")
                .join("config.toml")
        } else {
            PathBuf::from(".config/tintlog/config.toml")
        }
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) -> Result<(), TintError> {
        if let Some(color) = file.color {
            self.color_mode = color;
        }
        if let Some(level) = file.level {
            self.min_level = level;
        }
        if let Some(theme) = file.theme {
            self.theme = theme;
        }
        if let Some(path) = file.log_file {
            self.log_file = path;
        }
        if let Some(dir) = file.archive_dir {
            self.archive_dir = dir;
        }

        if let Some(profile) = file.profile {
            if let Some(compact) = profile.compact {
                self.profile.compact = compact;
            }
            self.profile.hide_keys.extend(profile.hide_keys);
            self.profile.level_labels.extend(
                profile
                    .level_labels
                    .into_iter()
                    .map(|(level, label)| (level.to_uppercase(), label)),
            );
        }

        for (key, spec) in file.fields {
            self.field_styles.insert(key, StyleSpan::parse(&spec)?);
        }
        for (key, values) in file.transforms {
            self.transforms.entry(key).or_default().extend(values);
        }
        Ok(())
    }

    fn apply_colorize_args(&mut self, args: &ColorizeArgs) {
        if args.no_compact {
            self.profile.compact = false;
        }
        for key in &args.show_keys {
            self.profile.hide_keys.insert(key.clone(), false);
        }
    }

    /// The theme after color resolution.
    pub fn resolved_theme(&self, use_color: bool) -> Theme {
        self.theme.theme().with_enabled(use_color)
    }

    /// Field styles: the theme's `player` / `world` styles, overridden by
    /// `[fields]`.
    fn styles(&self, use_color: bool) -> StaticFieldStyles {
        let mut styles = StaticFieldStyles::new();
        for (key, style) in self.resolved_theme(use_color).field_styles() {
            styles = styles.with(key, style);
        }
        for (key, style) in &self.field_styles {
            styles = styles.with(key.clone(), style.with_enabled(use_color));
        }
        styles
    }

    /// The colorizing pipeline this config describes.
    pub fn pipeline(&self, use_color: bool) -> Pipeline {
        Pipeline::builder()
            .theme(self.resolved_theme(use_color))
            .profile(self.profile.clone())
            .styler(self.styles(use_color))
            .transformer(StaticFieldTransform(self.transforms.clone()))
            .build()
    }

    /// Logger setup for this config.
    pub fn logger_config(&self, use_color: bool) -> LoggerConfig {
        LoggerConfig {
            log_file: self.log_file.clone(),
            archive_dir: self.archive_dir.clone(),
            level: self.min_level,
            theme: self.theme.theme(),
            profile: self.profile.clone(),
            styler: Some(Arc::new(self.styles(use_color))),
            transformer: Some(Arc::new(StaticFieldTransform(self.transforms.clone()))),
            color: use_color,
            ..LoggerConfig::default()
        }
    }
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    color: Option<ColorMode>,
    level: Option<Level>,
    theme: Option<ThemeName>,
    log_file: Option<PathBuf>,
    archive_dir: Option<PathBuf>,
    profile: Option<ProfileConfig>,
    #[serde(default)]
    fields: HashMap<String, String>,
    #[serde(default)]
    transforms: HashMap<String, HashMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileConfig {
    compact: Option<bool>,
    #[serde(default)]
    hide_keys: HashMap<String, bool>,
    #[serde(default)]
    level_labels: HashMap<String, String>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, TintError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TintError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
