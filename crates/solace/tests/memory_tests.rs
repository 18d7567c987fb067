//! Integration tests for the memory layer
//!
//! Exercises the bounded per-user ledger through the public store API,
//! backed by real files in temporary directories.

use std::path::Path;
use std::sync::Arc;

use solace::memory::{MEMORY_LIMIT, MemoryStore, UserId};
use solace::storage::{BlobStore, FileBlobStore};
use solace::testing::MockEmbedder;
use tempfile::tempdir;

/// Test fixture: a store persisting under the given directory
fn open_store(dir: &Path) -> Arc<MemoryStore> {
    let blobs = Arc::new(FileBlobStore::new(dir).unwrap());
    Arc::new(MemoryStore::new(blobs, Arc::new(MockEmbedder::new())))
}

/// Test fixture: a validated user id
fn user(id: &str) -> UserId {
    UserId::try_from(id).unwrap()
}

mod capacity_tests {
    use super::*;

    #[tokio::test]
    async fn test_ledger_never_exceeds_limit() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let alice = user("alice");

        for i in 0..12 {
            store.append(&alice, &format!("entry {i}")).await.unwrap();
            let len = store.all(&alice).await.len();
            assert!(
                len <= MEMORY_LIMIT,
                "ledger grew to {len} after {} appends",
                i + 1
            );
        }

        assert_eq!(store.all(&alice).await.len(), MEMORY_LIMIT);
    }

    #[tokio::test]
    async fn test_eviction_drops_oldest_first() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let alice = user("alice");

        for text in ["t1", "t2", "t3", "t4", "t5", "t6"] {
            store.append(&alice, text).await.unwrap();
        }

        let texts: Vec<String> = store
            .all(&alice)
            .await
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(texts, ["t2", "t3", "t4", "t5", "t6"]);
    }

    #[tokio::test]
    async fn test_latest_tracks_newest_entry() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let alice = user("alice");

        assert!(store.latest(&alice).await.is_none());

        for text in ["t1", "t2", "t3", "t4", "t5", "t6", "t7"] {
            store.append(&alice, text).await.unwrap();
            let latest = store.latest(&alice).await.unwrap();
            assert_eq!(latest.text, text, "latest should always be the newest");
        }
    }
}

mod persistence_tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_across_reopen_for_every_fill_level() {
        for n in 0..=MEMORY_LIMIT {
            let dir = tempdir().unwrap();
            let alice = user("alice");

            {
                let store = open_store(dir.path());
                for i in 0..n {
                    store.append(&alice, &format!("entry {i}")).await.unwrap();
                }
            }

            // Fresh store handle over the same directory
            let reopened = open_store(dir.path());
            let records = reopened.all(&alice).await;
            assert_eq!(records.len(), n, "should restore {n} records");
            for (i, record) in records.iter().enumerate() {
                assert_eq!(record.text, format!("entry {i}"));
            }
        }
    }

    #[tokio::test]
    async fn test_reopen_preserves_vectors_and_timestamps() {
        let dir = tempdir().unwrap();
        let alice = user("alice");

        let original = {
            let store = open_store(dir.path());
            store.append(&alice, "rough day at work").await.unwrap();
            store.latest(&alice).await.unwrap()
        };

        let reopened = open_store(dir.path());
        let restored = reopened.latest(&alice).await.unwrap();

        assert_eq!(restored.text, original.text);
        assert_eq!(restored.vector, original.vector);
        assert_eq!(restored.created_at, original.created_at);
        assert_eq!(
            restored.vector,
            MockEmbedder::new().embed_text("rough day at work")
        );
    }

    #[tokio::test]
    async fn test_users_keep_separate_ledgers_on_disk() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let alice = user("alice");
        let bob = user("bob");

        store.append(&alice, "alice only").await.unwrap();
        store.append(&bob, "bob one").await.unwrap();
        store.append(&bob, "bob two").await.unwrap();

        let reopened = open_store(dir.path());
        assert_eq!(reopened.all(&alice).await.len(), 1);
        assert_eq!(reopened.all(&bob).await.len(), 2);
        assert_eq!(reopened.latest(&alice).await.unwrap().text, "alice only");
    }

    #[tokio::test]
    async fn test_corrupt_ledger_recovers_to_empty_then_accepts_appends() {
        let dir = tempdir().unwrap();
        let blobs = Arc::new(FileBlobStore::new(dir.path()).unwrap());
        blobs.write("alice", b"not json at all").await.unwrap();

        let store = Arc::new(MemoryStore::new(blobs, Arc::new(MockEmbedder::new())));
        let alice = user("alice");

        assert!(store.all(&alice).await.is_empty());

        store.append(&alice, "clean slate").await.unwrap();
        let records = store.all(&alice).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "clean slate");
    }
}

mod concurrency_tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_appends_to_empty_ledger_both_land() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let alice = user("alice");

        let s1 = Arc::clone(&store);
        let s2 = Arc::clone(&store);
        let u1 = alice.clone();
        let u2 = alice.clone();

        let (r1, r2) = tokio::join!(
            tokio::spawn(async move { s1.append(&u1, "left entry").await }),
            tokio::spawn(async move { s2.append(&u2, "right entry").await }),
        );
        r1.unwrap().unwrap();
        r2.unwrap().unwrap();

        let texts: Vec<String> = store
            .all(&alice)
            .await
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(texts.len(), 2, "neither append may be lost");
        assert!(texts.contains(&"left entry".to_string()));
        assert!(texts.contains(&"right entry".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_appends_near_capacity_stay_bounded() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let alice = user("alice");

        for i in 0..4 {
            store.append(&alice, &format!("earlier {i}")).await.unwrap();
        }

        let s1 = Arc::clone(&store);
        let s2 = Arc::clone(&store);
        let u1 = alice.clone();
        let u2 = alice.clone();

        let (r1, r2) = tokio::join!(
            tokio::spawn(async move { s1.append(&u1, "left entry").await }),
            tokio::spawn(async move { s2.append(&u2, "right entry").await }),
        );
        r1.unwrap().unwrap();
        r2.unwrap().unwrap();

        let texts: Vec<String> = store
            .all(&alice)
            .await
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(texts.len(), MEMORY_LIMIT, "ledger must stay bounded");
        assert!(texts.contains(&"left entry".to_string()));
        assert!(texts.contains(&"right entry".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_appends_to_different_users_do_not_interfere() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let alice = user("alice");
        let bob = user("bob");

        let s1 = Arc::clone(&store);
        let s2 = Arc::clone(&store);
        let u1 = alice.clone();
        let u2 = bob.clone();

        let (r1, r2) = tokio::join!(
            tokio::spawn(async move { s1.append(&u1, "alice writes").await }),
            tokio::spawn(async move { s2.append(&u2, "bob writes").await }),
        );
        r1.unwrap().unwrap();
        r2.unwrap().unwrap();

        assert_eq!(store.all(&alice).await.len(), 1);
        assert_eq!(store.all(&bob).await.len(), 1);
        assert_eq!(store.latest(&alice).await.unwrap().text, "alice writes");
        assert_eq!(store.latest(&bob).await.unwrap().text, "bob writes");
    }
}
