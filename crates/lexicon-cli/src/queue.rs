//! Single-consumer queue for dictionary mutations.
//!
//! The interactive menu never mutates the dictionary itself. It submits
//! [`Mutation`]s to a bounded channel drained by one worker task, so at most
//! one mutation is in flight at a time, and each result is reported exactly
//! once through a caller-supplied callback.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use lexicon_store::{Dictionary, StoreError};

const QUEUE_CAPACITY: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    Add { word: String, definition: String },
    Remove { word: String },
}

impl Mutation {
    pub fn word(&self) -> &str {
        match self {
            Self::Add { word, .. } | Self::Remove { word } => word,
        }
    }
}

/// Result of one applied mutation.
#[derive(Debug)]
pub struct Outcome {
    pub mutation: Mutation,
    /// Set when the change was applied in memory but could not be saved.
    pub error: Option<StoreError>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.mutation {
            Mutation::Add { .. } => "added",
            Mutation::Remove { .. } => "removed",
        };
        match &self.error {
            None => write!(f, "Word {verb} successfully!"),
            Some(e) => write!(
                f,
                "Word '{}' {verb}, but the dictionary could not be saved: {e}",
                self.mutation.word()
            ),
        }
    }
}

pub struct MutationQueue {
    tx: mpsc::Sender<Mutation>,
    worker: JoinHandle<usize>,
}

impl MutationQueue {
    /// Start the worker task. `report` is called once per applied mutation,
    /// in submission order.
    pub fn spawn<F>(dictionary: Arc<dyn Dictionary>, mut report: F) -> Self
    where
        F: FnMut(Outcome) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<Mutation>(QUEUE_CAPACITY);
        let worker = tokio::spawn(async move {
            let mut applied = 0usize;
            while let Some(mutation) = rx.recv().await {
                let dictionary = Arc::clone(&dictionary);
                let outcome = tokio::task::spawn_blocking(move || apply(dictionary.as_ref(), mutation))
                    .await;
                match outcome {
                    Ok(outcome) => {
                        applied += 1;
                        report(outcome);
                    }
                    Err(e) => tracing::error!(error = %e, "mutation task failed"),
                }
            }
            debug!(applied, "mutation queue drained");
            applied
        });
        Self { tx, worker }
    }

    /// Enqueue a mutation, waiting if the queue is full.
    pub async fn submit(&self, mutation: Mutation) -> anyhow::Result<()> {
        self.tx
            .send(mutation)
            .await
            .map_err(|_| anyhow::anyhow!("mutation queue is closed"))
    }

    /// Stop accepting mutations, wait for queued ones to finish, and return
    /// how many were applied.
    pub async fn close(self) -> anyhow::Result<usize> {
        drop(self.tx);
        Ok(self.worker.await?)
    }
}

fn apply(dictionary: &dyn Dictionary, mutation: Mutation) -> Outcome {
    let result = match &mutation {
        Mutation::Add { word, definition } => dictionary.add(word, definition),
        Mutation::Remove { word } => dictionary.remove(word).map(|_| ()),
    };
    debug!(word = mutation.word(), ok = result.is_ok(), "mutation applied");
    Outcome {
        mutation,
        error: result.err(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use lexicon_store::{FileDictionary, InMemoryDictionary};

    fn collector() -> (Arc<Mutex<Vec<Outcome>>>, impl FnMut(Outcome) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |o| sink.lock().unwrap().push(o))
    }

    #[tokio::test]
    async fn applies_in_submission_order() {
        let dict = Arc::new(InMemoryDictionary::new());
        let (seen, report) = collector();
        let queue = MutationQueue::spawn(dict.clone(), report);

        queue
            .submit(Mutation::Add { word: "go".into(), definition: "v1".into() })
            .await
            .unwrap();
        queue
            .submit(Mutation::Add { word: "go".into(), definition: "v2".into() })
            .await
            .unwrap();
        queue.submit(Mutation::Remove { word: "ghost".into() }).await.unwrap();

        assert_eq!(queue.close().await.unwrap(), 3);
        assert_eq!(dict.get("go").unwrap().definition(), "v2");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|o| o.error.is_none()));
        assert_eq!(seen[2].mutation, Mutation::Remove { word: "ghost".into() });
    }

    #[tokio::test]
    async fn close_drains_pending_mutations() {
        let dict = Arc::new(InMemoryDictionary::new());
        let (_seen, report) = collector();
        let queue = MutationQueue::spawn(dict.clone(), report);
        for i in 0..100 {
            queue
                .submit(Mutation::Add { word: format!("w{i}"), definition: "d".into() })
                .await
                .unwrap();
        }
        assert_eq!(queue.close().await.unwrap(), 100);
        assert_eq!(dict.len(), 100);
    }

    #[tokio::test]
    async fn persistence_failure_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();
        let dict = Arc::new(FileDictionary::open(blocker.join("dictionary.json")));

        let (seen, report) = collector();
        let queue = MutationQueue::spawn(dict.clone(), report);
        queue
            .submit(Mutation::Add { word: "go".into(), definition: "v1".into() })
            .await
            .unwrap();
        queue.close().await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].error.as_ref().unwrap().is_persistence());
        assert!(seen[0].to_string().contains("could not be saved"));
        assert!(dict.contains("go"));
    }

    #[test]
    fn outcome_messages() {
        let ok = Outcome {
            mutation: Mutation::Add { word: "a".into(), definition: "b".into() },
            error: None,
        };
        assert_eq!(ok.to_string(), "Word added successfully!");

        let removed = Outcome {
            mutation: Mutation::Remove { word: "a".into() },
            error: None,
        };
        assert_eq!(removed.to_string(), "Word removed successfully!");
    }
}
