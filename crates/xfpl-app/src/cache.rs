// In-memory fetch cache with a time-to-live.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use xfpl_core::player::PlayerStatRecord;

use crate::fetch::FetchError;
use crate::source::PlayerSource;

// Keeps the TTL arithmetic inside chrono's range.
const MAX_TTL_SECS: i64 = 100 * 365 * 24 * 60 * 60;

/// Player records plus the moment they were fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub players: Vec<PlayerStatRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Wraps a [`PlayerSource`] and serves the last snapshot until it is older
/// than the TTL. A TTL of zero disables caching.
pub struct CachedSource<S> {
    source: S,
    ttl: Duration,
    entry: Option<Snapshot>,
}

impl<S: PlayerSource> CachedSource<S> {
    pub fn new(source: S, ttl_secs: u64) -> Self {
        let secs = i64::try_from(ttl_secs).unwrap_or(MAX_TTL_SECS).min(MAX_TTL_SECS);
        CachedSource {
            source,
            ttl: Duration::seconds(secs),
            entry: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match &self.entry {
            Some(entry) => now.signed_duration_since(entry.fetched_at) < self.ttl,
            None => false,
        }
    }

    /// Return the cached snapshot when fresh, otherwise fetch a new one.
    /// A failed fetch leaves any previous snapshot in place.
    pub async fn get(&mut self, now: DateTime<Utc>) -> Result<Snapshot, FetchError> {
        if self.is_fresh(now) {
            if let Some(entry) = &self.entry {
                debug!(fetched_at = %entry.fetched_at, "serving cached snapshot");
                return Ok(entry.clone());
            }
        }

        let players = self.source.fetch_players().await?;
        info!(
            players = players.len(),
            source = %self.source.describe(),
            "fetched fresh snapshot"
        );
        let snapshot = Snapshot {
            players,
            fetched_at: now,
        };
        self.entry = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Drop the cached snapshot so the next `get` fetches.
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            debug!("cache invalidated");
        }
    }
}
