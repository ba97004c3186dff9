//! Where static site assets come from: an HTTP origin or a local directory.

use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use shared::error::FetchError;
use url::Url;

#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetches the asset at a site-relative path such as
    /// `assets/conference-list.json`.
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}

pub struct HttpAssetSource {
    http: Client,
    base: Url,
}

impl HttpAssetSource {
    pub fn new(base: Url) -> Self {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(http: Client, mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { http, base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| FetchError::Transport {
                path: path.to_string(),
                message: format!("invalid asset url: {err}"),
            })
    }
}

#[async_trait]
impl AssetSource for HttpAssetSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let url = self.resolve(path)?;
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport {
                path: path.to_string(),
                message: err.to_string(),
            })?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        res.text().await.map_err(|err| FetchError::Transport {
            path: path.to_string(),
            message: err.to_string(),
        })
    }
}

pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(FetchError::NotFound {
                path: path.to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetSource for DirAssetSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let full = self.resolve(path)?;
        match tokio::fs::read_to_string(&full).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(FetchError::NotFound {
                path: path.to_string(),
            }),
            Err(err) => Err(FetchError::Io {
                path: path.to_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// Site root as configured: `http(s)://` origins are fetched over HTTP,
/// anything else is a directory on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteRoot {
    Http(Url),
    Dir(PathBuf),
}

impl SiteRoot {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            let url = Url::parse(raw).with_context(|| format!("invalid site url '{raw}'"))?;
            return Ok(SiteRoot::Http(url));
        }
        if raw.is_empty() {
            return Ok(SiteRoot::Dir(PathBuf::from(".")));
        }
        Ok(SiteRoot::Dir(PathBuf::from(raw)))
    }

    pub fn into_source(self) -> Arc<dyn AssetSource> {
        match self {
            SiteRoot::Http(url) => Arc::new(HttpAssetSource::new(url)),
            SiteRoot::Dir(root) => Arc::new(DirAssetSource::new(root)),
        }
    }
}

impl std::fmt::Display for SiteRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteRoot::Http(url) => write!(f, "{url}"),
            SiteRoot::Dir(root) => write!(f, "{}", root.display()),
        }
    }
}
