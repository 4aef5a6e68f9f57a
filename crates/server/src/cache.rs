//! Hot-reloadable data cache.
//!
//! Holds the warm recommender (catalog + similarity matrix) and the
//! cold-start recommender as two independent snapshots. Each request checks
//! the modification times of the files behind a snapshot and rebuilds it
//! when they changed. A failed reload keeps the previous snapshot around
//! and reports the error to the caller.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::RwLock;
use tracing::{info, warn};

use data_loader::{Catalog, CatalogSchema, ContentIndex, DataLoadError};

use crate::orchestrator::{ColdStartRecommender, FeedRecommender};

/// Locations of the three data files
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub catalog: PathBuf,
    pub similarity: PathBuf,
    pub cold_start: PathBuf,
}

/// Modification time per source file, `None` when unreadable
type Stamp = Vec<Option<SystemTime>>;

struct Snapshot<T> {
    value: Arc<T>,
    stamp: Stamp,
}

type Slot<T> = RwLock<Option<Snapshot<T>>>;

pub struct DataCache {
    paths: Option<DataPaths>,
    reload_on_change: bool,
    feed: Slot<FeedRecommender>,
    cold_start: Slot<ColdStartRecommender>,
}

impl DataCache {
    /// Empty cache that loads lazily from `paths`
    pub fn new(paths: DataPaths, reload_on_change: bool) -> Self {
        Self {
            paths: Some(paths),
            reload_on_change,
            feed: RwLock::new(None),
            cold_start: RwLock::new(None),
        }
    }

    /// Cache over already-built recommenders that never touches the disk
    pub fn preloaded(feed: FeedRecommender, cold_start: ColdStartRecommender) -> Self {
        Self {
            paths: None,
            reload_on_change: false,
            feed: RwLock::new(Some(Snapshot {
                value: Arc::new(feed),
                stamp: Vec::new(),
            })),
            cold_start: RwLock::new(Some(Snapshot {
                value: Arc::new(cold_start),
                stamp: Vec::new(),
            })),
        }
    }

    /// Current warm recommender, reloading it if its files changed
    pub async fn feed(&self) -> Result<Arc<FeedRecommender>, DataLoadError> {
        let files = self
            .paths
            .as_ref()
            .map(|p| vec![p.catalog.clone(), p.similarity.clone()])
            .unwrap_or_default();

        self.get_or_load(&self.feed, files, |files| {
            let content = ContentIndex::load_from_files(&files[0], &files[1])?;
            Ok(FeedRecommender::new(Arc::new(content)))
        })
        .await
    }

    /// Current cold-start recommender, reloading it if its file changed
    pub async fn cold_start(&self) -> Result<Arc<ColdStartRecommender>, DataLoadError> {
        let files = self
            .paths
            .as_ref()
            .map(|p| vec![p.cold_start.clone()])
            .unwrap_or_default();

        self.get_or_load(&self.cold_start, files, |files| {
            let catalog = Catalog::load_from_file(&files[0], CatalogSchema::ColdStart)?;
            Ok(ColdStartRecommender::new(Arc::new(catalog)))
        })
        .await
    }

    async fn get_or_load<T, F>(
        &self,
        slot: &Slot<T>,
        files: Vec<PathBuf>,
        load: F,
    ) -> Result<Arc<T>, DataLoadError>
    where
        T: Send + Sync + 'static,
        F: FnOnce(&[PathBuf]) -> Result<T, DataLoadError> + Send + 'static,
    {
        let current = if self.reload_on_change {
            Some(stamp_files(&files).await)
        } else {
            None
        };

        // Fast path: a fresh snapshot under the read lock
        {
            let guard = slot.read().await;
            if let Some(snapshot) = guard.as_ref()
                && is_fresh(snapshot, current.as_ref())
            {
                return Ok(snapshot.value.clone());
            }
        }

        let mut guard = slot.write().await;
        // Another request may have reloaded while we waited
        if let Some(snapshot) = guard.as_ref()
            && is_fresh(snapshot, current.as_ref())
        {
            return Ok(snapshot.value.clone());
        }

        if files.is_empty() {
            return Err(DataLoadError::FileNotFound {
                path: "<no data source configured>".to_string(),
            });
        }

        let stamp = match current {
            Some(stamp) => stamp,
            None => stamp_files(&files).await,
        };
        let reloading = guard.is_some();

        let loaded = tokio::task::spawn_blocking(move || load(&files))
            .await
            .map_err(|e| DataLoadError::IoError(io::Error::other(e.to_string())))?;

        match loaded {
            Ok(value) => {
                let value = Arc::new(value);
                if reloading {
                    info!("Data files changed, snapshot reloaded");
                }
                *guard = Some(Snapshot {
                    value: value.clone(),
                    stamp,
                });
                Ok(value)
            }
            Err(e) => {
                if reloading {
                    warn!("Reload failed, keeping previous snapshot: {}", e);
                }
                Err(e)
            }
        }
    }
}

fn is_fresh<T>(snapshot: &Snapshot<T>, current: Option<&Stamp>) -> bool {
    match current {
        Some(stamp) => snapshot.stamp == *stamp,
        None => true,
    }
}

async fn stamp_files(files: &[PathBuf]) -> Stamp {
    let mut stamp = Vec::with_capacity(files.len());
    for file in files {
        stamp.push(modified_at(file).await);
    }
    stamp
}

async fn modified_at(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path)
        .await
        .ok()
        .and_then(|meta| meta.modified().ok())
}
