use std::collections::{HashSet, VecDeque};

use crawl_frontier_core::async_trait;
use crawl_frontier_core::error::Result;
use crawl_frontier_core::request::Request;
use log::trace;
use tokio::sync::Mutex;

use crate::scheduler_trait::FrontierQueue;

/// First-in-first-out storage for pending requests
pub struct FifoQueue {
    /// Queue of pending requests
    queue: Mutex<VecDeque<Request>>,
}

impl FifoQueue {
    /// Create a new FIFO queue
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Create a FIFO queue with room for `capacity` requests
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }
}

impl Default for FifoQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrontierQueue for FifoQueue {
    async fn push_when_no_duplicate(&self, request: Request) -> Result<()> {
        let mut queue = self.queue.lock().await;
        queue.push_back(request);
        Ok(())
    }

    async fn poll(&self) -> Option<Request> {
        let mut queue = self.queue.lock().await;
        let request = queue.pop_front();
        if let Some(ref request) = request {
            trace!("Dispatching {} {}", request.method, request.url);
        }
        request
    }

    async fn len(&self) -> usize {
        let queue = self.queue.lock().await;
        queue.len()
    }

    async fn clear(&self) -> Result<()> {
        let mut queue = self.queue.lock().await;
        queue.clear();
        Ok(())
    }

    async fn replace_all(&self, requests: HashSet<Request>) -> Result<()> {
        let mut queue = self.queue.lock().await;
        *queue = requests.into_iter().collect();
        Ok(())
    }

    async fn snapshot(&self) -> HashSet<Request> {
        let queue = self.queue.lock().await;
        queue.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = FifoQueue::new();

        for i in 1..=3 {
            let req = Request::get(format!("https://example.com/{}", i)).unwrap();
            queue.push_when_no_duplicate(req).await.unwrap();
        }
        assert_eq!(queue.len().await, 3);

        let next = queue.poll().await.unwrap();
        assert_eq!(next.url.as_str(), "https://example.com/1");

        let next = queue.poll().await.unwrap();
        assert_eq!(next.url.as_str(), "https://example.com/2");

        let next = queue.poll().await.unwrap();
        assert_eq!(next.url.as_str(), "https://example.com/3");

        assert!(queue.poll().await.is_none());
        assert_eq!(queue.len().await, 0);
    }

    #[tokio::test]
    async fn test_replace_all_discards_previous_contents() {
        let queue = FifoQueue::with_capacity(4);
        queue
            .push_when_no_duplicate(Request::get("https://example.com/old").unwrap())
            .await
            .unwrap();

        let loaded: HashSet<Request> = ["https://example.com/a", "https://example.com/b"]
            .iter()
            .map(|url| Request::get(url).unwrap())
            .collect();
        queue.replace_all(loaded.clone()).await.unwrap();

        assert_eq!(queue.len().await, 2);
        assert_eq!(queue.snapshot().await, loaded);
    }

    #[tokio::test]
    async fn test_snapshot_does_not_drain() {
        let queue = FifoQueue::new();
        queue
            .push_when_no_duplicate(Request::get("https://example.com/a").unwrap())
            .await
            .unwrap();

        let snapshot = queue.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(queue.len().await, 1);

        queue.clear().await.unwrap();
        assert!(queue.snapshot().await.is_empty());
    }
}
