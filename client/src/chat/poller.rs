//! Polling client for keeping one conversation's messages fresh.
//!
//! There is no push channel; the selected conversation is re-fetched on a
//! fixed interval for as long as it stays selected. The poll task is the only
//! cancellable operation in the system: selecting another conversation or
//! dropping the poller aborts it. One-shot requests elsewhere are plain
//! awaited futures owned by the host and are not tracked or cancelled here
//! (a known gap, inherited by design).

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

use crate::api::client::ApiClient;
use crate::chat::models::Message;
use crate::errors::ClientResult;

/// Seam between the poll loop and the HTTP layer, so tests can poll against
/// a scripted fetcher.
#[async_trait]
pub trait MessageFetcher: Send + Sync + 'static {
    async fn fetch_messages(&self, conversation_id: &str) -> ClientResult<Vec<Message>>;
}

/// Production fetcher backed by the REST API.
pub struct ApiMessageFetcher {
    api: Arc<ApiClient>,
    access_token: String,
}

impl ApiMessageFetcher {
    pub fn new(api: Arc<ApiClient>, access_token: impl Into<String>) -> Self {
        Self {
            api,
            access_token: access_token.into(),
        }
    }
}

#[async_trait]
impl MessageFetcher for ApiMessageFetcher {
    async fn fetch_messages(&self, conversation_id: &str) -> ClientResult<Vec<Message>> {
        self.api
            .list_messages(&self.access_token, conversation_id)
            .await
    }
}

pub struct ChatPoller {
    fetcher: Arc<dyn MessageFetcher>,
    poll_interval: Duration,
    tx: watch::Sender<Vec<Message>>,
    task: Option<(String, JoinHandle<()>)>,
}

impl ChatPoller {
    pub fn new(fetcher: Arc<dyn MessageFetcher>, poll_interval: Duration) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        ChatPoller {
            fetcher,
            poll_interval,
            tx,
            task: None,
        }
    }

    /// Observe the currently published message list. Each successful poll
    /// replaces the whole list; no local merging or deduplication.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Message>> {
        self.tx.subscribe()
    }

    pub fn selected(&self) -> Option<&str> {
        self.task.as_ref().map(|(id, _)| id.as_str())
    }

    /// Start polling a conversation: one immediate fetch, then one per
    /// interval. Any previously selected conversation stops polling first.
    pub fn select(&mut self, conversation_id: impl Into<String>) {
        let conversation_id = conversation_id.into();
        if self.selected() == Some(conversation_id.as_str()) {
            return;
        }
        self.deselect();
        self.tx.send_replace(Vec::new());

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let poll_interval = self.poll_interval;
        let id = conversation_id.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match fetcher.fetch_messages(&id).await {
                    Ok(messages) => {
                        tx.send_replace(messages);
                    }
                    // Stale-but-present: keep the last published list and
                    // try again on the next tick.
                    Err(err) => {
                        warn!(conversation_id = %id, error = %err, "message poll failed");
                    }
                }
            }
        });

        debug!(conversation_id = %conversation_id, "polling started");
        self.task = Some((conversation_id, handle));
    }

    /// Stop polling. The published list is left as-is so the view can keep
    /// showing it until a new selection clears it.
    pub fn deselect(&mut self) {
        if let Some((conversation_id, handle)) = self.task.take() {
            handle.abort();
            debug!(conversation_id = %conversation_id, "polling stopped");
        }
    }
}

impl Drop for ChatPoller {
    fn drop(&mut self) {
        self.deselect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::errors::ClientError;

    fn message(conversation_id: &str, n: usize) -> Message {
        Message {
            id: format!("m-{n}"),
            conversation_id: conversation_id.to_string(),
            sender_id: "u-1".to_string(),
            content: format!("message {n}"),
            created_at: Utc::now(),
        }
    }

    /// Records every fetched conversation id and returns one message named
    /// after it.
    struct RecordingFetcher {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessageFetcher for RecordingFetcher {
        async fn fetch_messages(&self, conversation_id: &str) -> ClientResult<Vec<Message>> {
            self.calls.lock().unwrap().push(conversation_id.to_string());
            Ok(vec![message(conversation_id, 1)])
        }
    }

    /// Succeeds once, then fails every subsequent poll.
    struct FlakyFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MessageFetcher for FlakyFetcher {
        async fn fetch_messages(&self, conversation_id: &str) -> ClientResult<Vec<Message>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                Ok(vec![message(conversation_id, 1), message(conversation_id, 2)])
            } else {
                Err(ClientError::api(502, "upstream unavailable"))
            }
        }
    }

    #[tokio::test]
    async fn test_select_fetches_immediately_then_on_interval() {
        let fetcher = Arc::new(RecordingFetcher {
            calls: Mutex::new(Vec::new()),
        });
        let mut poller = ChatPoller::new(
            Arc::clone(&fetcher) as Arc<dyn MessageFetcher>,
            Duration::from_millis(20),
        );
        let rx = poller.subscribe();

        poller.select("conv-a");
        tokio::time::sleep(Duration::from_millis(70)).await;
        poller.deselect();

        let calls = fetcher.calls.lock().unwrap().clone();
        assert!(calls.len() >= 3, "expected repeated polls, got {calls:?}");
        assert!(calls.iter().all(|c| c == "conv-a"));
        assert_eq!(rx.borrow()[0].conversation_id, "conv-a");
    }

    #[tokio::test]
    async fn test_switching_conversations_stops_the_old_poll() {
        let fetcher = Arc::new(RecordingFetcher {
            calls: Mutex::new(Vec::new()),
        });
        let mut poller = ChatPoller::new(
            Arc::clone(&fetcher) as Arc<dyn MessageFetcher>,
            Duration::from_millis(15),
        );

        poller.select("conv-a");
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(poller.selected(), Some("conv-a"));

        poller.select("conv-b");
        let calls_at_switch = fetcher.calls.lock().unwrap().len();
        tokio::time::sleep(Duration::from_millis(50)).await;
        poller.deselect();

        let calls = fetcher.calls.lock().unwrap().clone();
        assert!(
            calls[calls_at_switch..].iter().all(|c| c == "conv-b"),
            "fetches for conv-a continued after switch: {calls:?}"
        );
        assert!(calls.iter().any(|c| c == "conv-b"));
    }

    #[tokio::test]
    async fn test_reselecting_same_conversation_is_a_no_op() {
        let fetcher = Arc::new(RecordingFetcher {
            calls: Mutex::new(Vec::new()),
        });
        let mut poller = ChatPoller::new(
            Arc::clone(&fetcher) as Arc<dyn MessageFetcher>,
            Duration::from_secs(60),
        );

        poller.select("conv-a");
        tokio::time::sleep(Duration::from_millis(10)).await;
        poller.select("conv-a");
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Only the immediate fetch from the first select.
        assert_eq!(fetcher.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_poll_keeps_previous_list_and_keeps_polling() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let fetcher = Arc::new(FlakyFetcher {
            calls: AtomicUsize::new(0),
        });
        let mut poller = ChatPoller::new(
            Arc::clone(&fetcher) as Arc<dyn MessageFetcher>,
            Duration::from_millis(15),
        );
        let rx = poller.subscribe();

        poller.select("conv-a");
        tokio::time::sleep(Duration::from_millis(80)).await;
        poller.deselect();

        // The first (successful) list is still what subscribers see.
        assert_eq!(rx.borrow().len(), 2);
        // And the loop kept ticking through the failures.
        assert!(fetcher.calls.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_deselect_aborts_polling() {
        let fetcher = Arc::new(RecordingFetcher {
            calls: Mutex::new(Vec::new()),
        });
        let mut poller = ChatPoller::new(
            Arc::clone(&fetcher) as Arc<dyn MessageFetcher>,
            Duration::from_millis(10),
        );

        poller.select("conv-a");
        tokio::time::sleep(Duration::from_millis(25)).await;
        poller.deselect();
        assert_eq!(poller.selected(), None);

        let calls_after_stop = fetcher.calls.lock().unwrap().len();
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(fetcher.calls.lock().unwrap().len(), calls_after_stop);
    }
}
