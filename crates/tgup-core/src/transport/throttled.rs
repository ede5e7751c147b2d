use std::{path::Path, sync::Arc, time::Duration};

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

use crate::{
    domain::{Destination, MessageId},
    transport::port::UploadTransport,
    Result,
};

#[derive(Debug)]
struct IntervalLimiter {
    interval: Duration,
    next: Instant,
}

impl IntervalLimiter {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now(),
        }
    }

    /// Reserve the next slot and return the wait duration required before executing.
    fn reserve(&mut self) -> Duration {
        let now = Instant::now();
        let start = if now >= self.next { now } else { self.next };
        self.next = start + self.interval;
        start.saturating_duration_since(now)
    }
}

/// UploadTransport decorator that spaces out every outbound call.
///
/// One slot per `interval`: the first call goes out immediately, every later call waits
/// until at least `interval` has passed since the previous one started. Files and
/// folder announcements share the same limiter.
pub struct ThrottledTransport {
    inner: Arc<dyn UploadTransport>,
    limiter: Mutex<IntervalLimiter>,
}

impl ThrottledTransport {
    pub fn new(inner: Arc<dyn UploadTransport>, interval: Duration) -> Self {
        Self {
            inner,
            limiter: Mutex::new(IntervalLimiter::new(interval)),
        }
    }

    async fn throttle(&self) {
        let wait = { self.limiter.lock().await.reserve() };
        if wait > Duration::from_millis(0) {
            sleep(wait).await;
        }
    }
}

#[async_trait::async_trait]
impl UploadTransport for ThrottledTransport {
    async fn send_file(
        &self,
        destination: &Destination,
        path: &Path,
        caption: &str,
        reply_to: Option<MessageId>,
    ) -> Result<MessageId> {
        self.throttle().await;
        self.inner
            .send_file(destination, path, caption, reply_to)
            .await
    }

    async fn send_text(
        &self,
        destination: &Destination,
        text: &str,
        reply_to: Option<MessageId>,
    ) -> Result<MessageId> {
        self.throttle().await;
        self.inner.send_text(destination, text, reply_to).await
    }
}
