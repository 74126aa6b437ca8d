//! Where the managed files live.
//!
//! Loaded from `$HOME/.config/trackcfg/layout.toml` (or `--layout`), with
//! defaults matching the Sky1 distro checkout. Services only ever see a
//! [`Layout`], never hard-coded paths.

use crate::error::TrackError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TrackSpec {
    pub label: String,
    pub file: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Layout {
    pub config_dir: PathBuf,
    pub policy: PathBuf,
    pub readme: PathBuf,
    pub dev_dir: PathBuf,
    pub dev_pattern: String,
    pub tracks: Vec<TrackSpec>,
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_default())
}

fn default_tracks() -> Vec<TrackSpec> {
    [
        ("LTS", "config.sky1"),
        ("Latest", "config.sky1-latest"),
        ("RC", "config.sky1-rc"),
        ("Next", "config.sky1-next"),
    ]
    .into_iter()
    .map(|(label, file)| TrackSpec {
        label: label.to_string(),
        file: PathBuf::from(file),
    })
    .collect()
}

impl Default for Layout {
    fn default() -> Self {
        Self::for_config_dir(home_dir().join("sky1-linux-distro/linux-sky1/config"))
    }
}

impl Layout {
    /// Layout rooted at `config_dir` with the default file names.
    pub fn for_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            policy: PathBuf::from("config-policy.ini"),
            readme: PathBuf::from("README.md"),
            dev_dir: home_dir().join("mainline-linux"),
            dev_pattern: "config.sky1*".to_string(),
            tracks: default_tracks(),
        }
    }

    fn in_config_dir(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.config_dir.join(p)
        }
    }

    pub fn policy_path(&self) -> PathBuf {
        self.in_config_dir(&self.policy)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.in_config_dir(&self.readme)
    }

    pub fn track_path(&self, track: &TrackSpec) -> PathBuf {
        self.in_config_dir(&track.file)
    }

    /// Untracked dev-build copies, sorted by path. A missing dev dir yields none.
    pub fn dev_configs(&self) -> anyhow::Result<Vec<PathBuf>> {
        if !self.dev_dir.is_dir() {
            return Ok(vec![]);
        }
        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&self.dev_dir.to_string_lossy()),
            self.dev_pattern
        );
        let mut out = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry?;
            if path.is_file() {
                out.push(path);
            }
        }
        out.sort();
        Ok(out)
    }

    fn rebase(mut self, base: &Path) -> Self {
        if self.config_dir.is_relative() {
            self.config_dir = base.join(&self.config_dir);
        }
        if self.dev_dir.is_relative() {
            self.dev_dir = base.join(&self.dev_dir);
        }
        self
    }
}

fn default_layout_path() -> PathBuf {
    home_dir().join(".config/trackcfg/layout.toml")
}

/// Relative directories in a layout file resolve against the file's own directory.
pub fn load_layout(explicit: Option<&Path>) -> anyhow::Result<Layout> {
    let path = match explicit {
        Some(p) if !p.exists() => return Err(TrackError::LayoutNotFound(p.to_path_buf()).into()),
        Some(p) => p.to_path_buf(),
        None => {
            let p = default_layout_path();
            if !p.exists() {
                tracing::debug!("no layout file, using built-in defaults");
                return Ok(Layout::default());
            }
            p
        }
    };
    tracing::debug!(path = %path.display(), "loading layout");
    let raw = std::fs::read_to_string(&path)?;
    let layout: Layout = toml::from_str(&raw)?;
    let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(layout.rebase(&base))
}
