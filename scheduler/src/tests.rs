use super::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use crawl_frontier_core::async_trait;
use crawl_frontier_core::error::Result;
use crawl_frontier_core::request::Request;
use tokio::sync::Mutex;

fn request(id: u32) -> Request {
    Request::get(format!("https://example.com/{}", id)).unwrap()
}

#[tokio::test]
async fn test_fifo_scheduler_scenario() {
    let scheduler = QueueDuplicateRemovedScheduler::new();

    scheduler.push(request(1)).await.unwrap();
    scheduler.push(request(2)).await.unwrap();
    scheduler.push(request(3)).await.unwrap();

    let next = scheduler.poll().await.unwrap();
    assert_eq!(next.url.as_str(), "https://example.com/1");

    let next = scheduler.poll().await.unwrap();
    assert_eq!(next.url.as_str(), "https://example.com/2");

    // Already dispatched, but still a duplicate
    scheduler.push(request(1)).await.unwrap();
    assert_eq!(scheduler.pending_count().await, 1);

    let next = scheduler.poll().await.unwrap();
    assert_eq!(next.url.as_str(), "https://example.com/3");

    assert!(scheduler.poll().await.is_none());
    assert!(scheduler.is_empty().await);
    assert_eq!(scheduler.total_accepted_count(), 3);
    assert_eq!(scheduler.pending_count().await, 0);
}

#[tokio::test]
async fn test_total_accepted_counts_unique_requests() {
    let scheduler = QueueDuplicateRemovedScheduler::new();

    for url in ["https://a.test/", "https://a.test/", "https://b.test/", "https://c.test/"] {
        scheduler.push(Request::get(url).unwrap()).await.unwrap();
    }

    assert_eq!(scheduler.total_accepted_count(), 3);
    assert_eq!(scheduler.len().await, 3);
}

#[tokio::test]
async fn test_pending_set_never_holds_duplicates() {
    let scheduler = QueueDuplicateRemovedScheduler::new();

    for i in 0..50 {
        scheduler.push(request(i % 7)).await.unwrap();
    }

    assert_eq!(scheduler.len().await, 7);
    assert_eq!(scheduler.to_snapshot().await.len(), 7);
}

#[tokio::test]
async fn test_duplicate_with_different_metadata_is_dropped() {
    let scheduler = QueueDuplicateRemovedScheduler::new();

    scheduler
        .push(request(1).with_meta("source", "seed"))
        .await
        .unwrap();
    scheduler
        .push(request(1).with_meta("source", "link").with_depth(3))
        .await
        .unwrap();

    let next = scheduler.poll().await.unwrap();
    assert_eq!(next.meta.get("source").unwrap(), "seed");
    assert!(scheduler.poll().await.is_none());
}

#[tokio::test]
async fn test_reset_duplicate_check_allows_repush() {
    let scheduler = QueueDuplicateRemovedScheduler::new();

    scheduler.push(request(1)).await.unwrap();
    scheduler.push(request(2)).await.unwrap();
    scheduler.poll().await.unwrap();

    scheduler.reset_duplicate_check().await.unwrap();
    assert_eq!(scheduler.pending_count().await, 0);
    assert_eq!(scheduler.total_accepted_count(), 0);

    scheduler.push(request(1)).await.unwrap();
    assert_eq!(scheduler.pending_count().await, 1);
    assert_eq!(scheduler.poll().await.unwrap(), request(1));
}

#[tokio::test]
async fn test_reset_keeps_completion_counters() {
    let scheduler = QueueDuplicateRemovedScheduler::new();
    scheduler.notify_success();
    scheduler.notify_error();

    scheduler.reset_duplicate_check().await.unwrap();

    assert_eq!(scheduler.success_count(), 1);
    assert_eq!(scheduler.error_count(), 1);

    scheduler.reset_counters();
    assert_eq!(scheduler.success_count(), 0);
    assert_eq!(scheduler.error_count(), 0);
}

#[tokio::test]
async fn test_load_replaces_pending_without_dedup_check() {
    let scheduler = QueueDuplicateRemovedScheduler::new();
    scheduler.push(request(1)).await.unwrap();

    let checkpoint: HashSet<Request> = (10..13).map(request).collect();
    scheduler.load(checkpoint.clone()).await.unwrap();

    assert_eq!(scheduler.to_snapshot().await, checkpoint);
    // Loaded requests were never recorded in the index
    assert_eq!(scheduler.total_accepted_count(), 1);
    assert!(!scheduler.duplicate_remover().contains(&request(10)));

    let mut drained = HashSet::new();
    while let Some(req) = scheduler.poll().await {
        drained.insert(req);
    }
    assert_eq!(drained, checkpoint);
}

#[tokio::test]
async fn test_snapshot_restores_into_fresh_scheduler() {
    let source = QueueDuplicateRemovedScheduler::new();
    for i in 0..5 {
        source.push(request(i)).await.unwrap();
    }
    source.poll().await.unwrap();

    let json = serde_json::to_string(&source.to_snapshot().await).unwrap();
    let restored: HashSet<Request> = serde_json::from_str(&json).unwrap();

    let target = QueueDuplicateRemovedScheduler::new();
    target.load(restored).await.unwrap();

    assert_eq!(target.to_snapshot().await, source.to_snapshot().await);
    assert_eq!(target.pending_count().await, 4);
}

#[tokio::test]
async fn test_stats_snapshot() {
    let scheduler = create_scheduler(&SchedulerConfig {
        initial_capacity: 8,
        log_duplicates: true,
    });

    scheduler.push(request(1)).await.unwrap();
    scheduler.push(request(1)).await.unwrap();
    scheduler.push(request(2)).await.unwrap();
    scheduler.poll().await.unwrap();
    scheduler.notify_success();

    let stats = scheduler.stats().await;
    assert_eq!(
        stats,
        SchedulerStats {
            pending: 1,
            total_accepted: 2,
            success: 1,
            error: 0,
        }
    );
}

#[tokio::test]
async fn test_scheduler_as_trait_object() {
    let scheduler: std::sync::Arc<dyn MonitorableScheduler> =
        create_scheduler(&SchedulerConfig::default());

    scheduler.push(request(1)).await.unwrap();
    scheduler.notify_error();

    assert_eq!(scheduler.pending_count().await, 1);
    assert_eq!(scheduler.stats().await.error, 1);
}

/// Stack-ordered storage, used to check that the dedup layer is independent
/// of the queue strategy
#[derive(Default)]
struct StackQueue {
    stack: Mutex<Vec<Request>>,
}

#[async_trait]
impl FrontierQueue for StackQueue {
    async fn push_when_no_duplicate(&self, request: Request) -> Result<()> {
        self.stack.lock().await.push(request);
        Ok(())
    }

    async fn poll(&self) -> Option<Request> {
        self.stack.lock().await.pop()
    }

    async fn len(&self) -> usize {
        self.stack.lock().await.len()
    }

    async fn clear(&self) -> Result<()> {
        self.stack.lock().await.clear();
        Ok(())
    }

    async fn replace_all(&self, requests: HashSet<Request>) -> Result<()> {
        *self.stack.lock().await = requests.into_iter().collect();
        Ok(())
    }

    async fn snapshot(&self) -> HashSet<Request> {
        self.stack.lock().await.iter().cloned().collect()
    }
}

/// Index that accepts everything and counts how often it was consulted
#[derive(Default)]
struct CountingRemover {
    calls: AtomicUsize,
    clears: AtomicUsize,
}

impl DuplicateRemover for CountingRemover {
    fn is_new_and_record(&self, _request: &Request) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        true
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }

    fn count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst) as u64
    }
}

#[tokio::test]
async fn test_custom_queue_strategy() {
    let scheduler = DuplicateRemovedScheduler::with_components(
        StackQueue::default(),
        HashSetDuplicateRemover::new(),
    );

    scheduler.push(request(1)).await.unwrap();
    scheduler.push(request(2)).await.unwrap();
    scheduler.push(request(1)).await.unwrap();

    assert_eq!(scheduler.poll().await.unwrap(), request(2));
    assert_eq!(scheduler.poll().await.unwrap(), request(1));
    assert!(scheduler.poll().await.is_none());
}

#[tokio::test]
async fn test_every_push_consults_the_index() {
    let scheduler =
        DuplicateRemovedScheduler::with_components(FifoQueue::new(), CountingRemover::default());

    scheduler.push(request(1)).await.unwrap();
    scheduler.push(request(1)).await.unwrap();
    scheduler.load((5..8).map(request).collect()).await.unwrap();

    assert_eq!(scheduler.duplicate_remover().calls.load(Ordering::SeqCst), 2);
    // The loaded set replaced both pushed copies
    assert_eq!(scheduler.len().await, 3);

    scheduler.reset_duplicate_check().await.unwrap();
    assert_eq!(scheduler.duplicate_remover().clears.load(Ordering::SeqCst), 1);
    assert!(scheduler.is_empty().await);
}
