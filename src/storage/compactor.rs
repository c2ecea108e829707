use crate::storage::UrlStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{error, info};

/// Periodic expiry sweeper.
///
/// Every tick it asks the store to drop records whose lifetime has elapsed.
/// The sweep runs through the store's own lock, so it never interleaves
/// with foreground CRUD. A tick that finds no store file yet does nothing;
/// a tick that finds undecodable content logs and leaves the file alone.
pub struct Compactor {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Compactor {
    /// Spawn the sweep task with the given period.
    pub fn start(store: Arc<dyn UrlStore>, period: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            // Skip the first tick which fires immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        sweep(store.as_ref()).await;
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            info!("compactor shutting down");
                            break;
                        }
                    }
                }
            }
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Signal the sweep task to stop and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.handle.await;
    }
}

async fn sweep(store: &dyn UrlStore) {
    let now = Utc::now().timestamp();
    match store.remove_expired(now).await {
        Ok(0) => {}
        Ok(removed) => info!(removed, "swept expired url records"),
        Err(err) => error!(error = %err, "expiry sweep failed, store left untouched"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UrlRecord;
    use crate::storage::FileStore;

    #[tokio::test]
    async fn compactor_sweeps_expired_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path().join("urls.json")));

        // Already past its lifetime at any present timestamp.
        store
            .create(UrlRecord {
                id: "stale".to_string(),
                url: "https://a.com".to_string(),
                created_at: 0,
                hits: 0,
                ttl: 1,
            })
            .await
            .unwrap();

        let compactor = Compactor::start(
            Arc::clone(&store) as Arc<dyn UrlStore>,
            Duration::from_millis(20),
        );

        // A couple of periods is plenty for one sweep to land.
        time::sleep(Duration::from_millis(100)).await;
        compactor.shutdown().await;

        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn shutdown_stops_the_task() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path().join("urls.json")));

        let compactor = Compactor::start(store as Arc<dyn UrlStore>, Duration::from_secs(3600));
        compactor.shutdown().await;
    }
}
