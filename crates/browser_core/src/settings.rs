use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::{host::SitePaths, source::SiteRoot};

pub const DEFAULT_SETTINGS_FILE: &str = "paper_browser.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub site: String,
    pub catalog_path: String,
    pub data_dir: String,
    pub daily_index: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site: ".".into(),
            catalog_path: crate::CATALOG_PATH.into(),
            data_dir: crate::DATA_DIR.into(),
            daily_index: crate::DAILY_INDEX_PATH.into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    site: Option<String>,
    catalog_path: Option<String>,
    data_dir: Option<String>,
    daily_index: Option<String>,
    log: Option<String>,
}

impl Settings {
    pub fn site_root(&self) -> anyhow::Result<SiteRoot> {
        SiteRoot::parse(&self.site)
    }

    pub fn site_paths(&self) -> SitePaths {
        SitePaths {
            catalog: self.catalog_path.clone(),
            data_dir: self.data_dir.clone(),
            daily_index: self.daily_index.clone(),
        }
    }

    fn merge_file(&mut self, file: SettingsFile) {
        if let Some(v) = file.site {
            self.site = v;
        }
        if let Some(v) = file.catalog_path {
            self.catalog_path = v;
        }
        if let Some(v) = file.data_dir {
            self.data_dir = v;
        }
        if let Some(v) = file.daily_index {
            self.daily_index = v;
        }
        if let Some(v) = file.log {
            self.log_filter = v;
        }
    }

    /// Applies environment overrides. `lookup` is `std::env::var` in
    /// production.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PAPER_BROWSER_SITE") {
            self.site = v;
        }
        if let Some(v) = lookup("APP__SITE") {
            self.site = v;
        }
        if let Some(v) = lookup("APP__CATALOG_PATH") {
            self.catalog_path = v;
        }
        if let Some(v) = lookup("APP__DATA_DIR") {
            self.data_dir = v;
        }
        if let Some(v) = lookup("APP__DAILY_INDEX") {
            self.daily_index = v;
        }
        if let Some(v) = lookup("APP__LOG") {
            self.log_filter = v;
        }
    }
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<SettingsFile>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    let parsed = toml::from_str::<SettingsFile>(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    Ok(Some(parsed))
}

/// Resolves settings: defaults, then the settings file, then environment.
/// An explicitly named file must exist; the default file is optional.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };
    match read_settings_file(&path)? {
        Some(file) => settings.merge_file(file),
        None if required => bail!("settings file not found '{}'", path.display()),
        None => {}
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}
