// Player data sources: the live FPL API or a saved bootstrap document.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use xfpl_core::config::SourceConfig;
use xfpl_core::player::PlayerStatRecord;

use crate::fetch::{parse_bootstrap, FetchError};

/// Anything that can produce the current season's player records.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    async fn fetch_players(&self) -> Result<Vec<PlayerStatRecord>, FetchError>;

    /// Human-readable origin, shown in the status bar.
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: PlayerSource + ?Sized> PlayerSource for Box<T> {
    async fn fetch_players(&self) -> Result<Vec<PlayerStatRecord>, FetchError> {
        (**self).fetch_players().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn from_config(config: &SourceConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|source| FetchError::Http {
                url: config.url.clone(),
                source,
            })?;
        Ok(HttpSource {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl PlayerSource for HttpSource {
    async fn fetch_players(&self) -> Result<Vec<PlayerStatRecord>, FetchError> {
        info!("fetching bootstrap data from {}", self.url);
        let http_err = |source| FetchError::Http {
            url: self.url.clone(),
            source,
        };

        let response = self.client.get(&self.url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(http_err)?;
        debug!(bytes = body.len(), "bootstrap response received");
        parse_bootstrap(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

/// Reads a bootstrap document saved to disk. Useful offline and in tests.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

#[async_trait]
impl PlayerSource for FileSource {
    async fn fetch_players(&self) -> Result<Vec<PlayerStatRecord>, FetchError> {
        info!("reading bootstrap data from {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        parse_bootstrap(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
