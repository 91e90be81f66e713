//! Durable queue of writes that could not reach the server yet.
//!
//! Mutations are replayed in the order they were queued. An entry leaves the
//! queue only after it was delivered, so a crash mid-replay can send an entry
//! twice but never loses one.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingMutation {
    pub id: String,
    pub method: Method,
    /// Path relative to the server root, e.g. `/api/quick-add`
    pub path: String,
    pub body: Value,
    pub queued_at: DateTime<Utc>,
}

/// Something that can deliver a queued mutation
pub trait Dispatch {
    fn dispatch(&self, mutation: &PendingMutation) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayReport {
    pub sent: usize,
    pub remaining: usize,
}

pub struct Outbox {
    path: PathBuf,
    queue: Vec<PendingMutation>,
}

impl Outbox {
    /// Loads the queue file, starting empty if it does not exist yet
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let queue = if path.exists() {
            let json = fs::read_to_string(&path).context("Failed to read outbox file")?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse outbox file {}", path.display()))?
        } else {
            Vec::new()
        };

        Ok(Self { path, queue })
    }

    pub fn pending(&self) -> &[PendingMutation] {
        &self.queue
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Appends a mutation and persists the queue before returning
    pub fn enqueue(&mut self, method: Method, path: &str, body: Value) -> Result<&PendingMutation> {
        self.queue.push(PendingMutation {
            id: Uuid::new_v4().to_string(),
            method,
            path: path.to_string(),
            body,
            queued_at: Utc::now(),
        });
        self.persist()?;

        info!("Queued {:?} {} for later sync ({} pending)", method, path, self.queue.len());
        Ok(&self.queue[self.queue.len() - 1])
    }

    /// Sends every pending mutation in order. Failed entries stay queued,
    /// still in order, for the next replay.
    pub async fn replay<D: Dispatch>(&mut self, dispatcher: &D) -> Result<ReplayReport> {
        if self.queue.is_empty() {
            return Ok(ReplayReport { sent: 0, remaining: 0 });
        }

        info!("Syncing {} offline actions...", self.queue.len());
        let mut remaining = Vec::new();
        let mut sent = 0;

        for mutation in std::mem::take(&mut self.queue) {
            match dispatcher.dispatch(&mutation).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    warn!("Sync failed for {} {}: {:?}", mutation.id, mutation.path, e);
                    remaining.push(mutation);
                }
            }
        }

        self.queue = remaining;
        self.persist()?;

        let report = ReplayReport {
            sent,
            remaining: self.queue.len(),
        };
        if report.remaining == 0 {
            info!("All offline changes synced ({} sent)", report.sent);
        } else {
            warn!("{} items failed to sync", report.remaining);
        }
        Ok(report)
    }

    fn persist(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).context("Failed to create outbox directory")?;
        }

        let json = serde_json::to_string_pretty(&self.queue).context("Failed to serialize outbox")?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).context("Failed to write outbox file")?;
        fs::rename(&temp_path, &self.path).context("Failed to replace outbox file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records deliveries and refuses any mutation whose body is marked
    struct FakeServer {
        delivered: Mutex<Vec<String>>,
    }

    impl FakeServer {
        fn new() -> Self {
            Self {
                delivered: Mutex::new(Vec::new()),
            }
        }
    }

    impl Dispatch for FakeServer {
        async fn dispatch(&self, mutation: &PendingMutation) -> Result<()> {
            if mutation.body["reject"] == true {
                anyhow::bail!("server refused");
            }
            self.delivered.lock().unwrap().push(mutation.path.clone());
            Ok(())
        }
    }

    #[test]
    fn test_enqueue_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outbox.json");

        let mut outbox = Outbox::open(&path).unwrap();
        outbox.enqueue(Method::Post, "/api/quick-add", json!({"myDeck": "Burn"})).unwrap();
        outbox.enqueue(Method::Delete, "/api/tournaments/t1", Value::Null).unwrap();

        let reopened = Outbox::open(&path).unwrap();
        assert_eq!(reopened.pending().len(), 2);
        assert_eq!(reopened.pending()[0].path, "/api/quick-add");
        assert_eq!(reopened.pending()[1].method, Method::Delete);
    }

    #[tokio::test]
    async fn test_replay_keeps_failures_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outbox.json");
        let mut outbox = Outbox::open(&path).unwrap();
        outbox.enqueue(Method::Post, "/a", json!({})).unwrap();
        outbox.enqueue(Method::Post, "/b", json!({"reject": true})).unwrap();
        outbox.enqueue(Method::Post, "/c", json!({})).unwrap();
        outbox.enqueue(Method::Post, "/d", json!({"reject": true})).unwrap();
        let server = FakeServer::new();

        let report = outbox.replay(&server).await.unwrap();

        assert_eq!(report, ReplayReport { sent: 2, remaining: 2 });
        assert_eq!(*server.delivered.lock().unwrap(), vec!["/a", "/c"]);
        let left: Vec<&str> = outbox.pending().iter().map(|m| m.path.as_str()).collect();
        assert_eq!(left, vec!["/b", "/d"]);

        let reopened = Outbox::open(&path).unwrap();
        assert_eq!(reopened.pending().len(), 2);
    }

    #[tokio::test]
    async fn test_replay_empty_queue() {
        let dir = tempfile::tempdir().unwrap();
        let mut outbox = Outbox::open(dir.path().join("outbox.json")).unwrap();

        let report = outbox.replay(&FakeServer::new()).await.unwrap();

        assert_eq!(report, ReplayReport { sent: 0, remaining: 0 });
        assert!(outbox.is_empty());
    }
}
