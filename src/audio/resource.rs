// Playback resource boundary
// The resource decodes and plays audio on its own schedule and reports back
// through a notification channel.

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Opaque capability that actually plays audio.
///
/// Requests are fire-and-forget: a successful return only means the request
/// was accepted. Whether playback really started is reported later through a
/// [`ResourceEvent`].
pub trait PlaybackResource {
    /// Bind a new source, replacing any previous binding
    fn load(&mut self, uri: &str) -> anyhow::Result<()>;

    fn play(&mut self) -> anyhow::Result<()>;

    fn pause(&mut self) -> anyhow::Result<()>;

    /// Stop playback and clear the bound source
    fn release(&mut self) -> anyhow::Result<()>;
}

impl<R: PlaybackResource + ?Sized> PlaybackResource for Box<R> {
    fn load(&mut self, uri: &str) -> anyhow::Result<()> {
        (**self).load(uri)
    }

    fn play(&mut self) -> anyhow::Result<()> {
        (**self).play()
    }

    fn pause(&mut self) -> anyhow::Result<()> {
        (**self).pause()
    }

    fn release(&mut self) -> anyhow::Result<()> {
        (**self).release()
    }
}

/// Lifecycle notification emitted by the resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceEvent {
    Started,
    Paused,
    Ended,
    Failed { reason: String },
}

/// Create the notification channel shared by a resource and its session
pub fn resource_channel() -> (ResourceNotifier, ResourceEvents) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ResourceNotifier { tx }, ResourceEvents { rx })
}

/// Sending half, handed to the resource implementation
#[derive(Debug, Clone)]
pub struct ResourceNotifier {
    tx: UnboundedSender<ResourceEvent>,
}

impl ResourceNotifier {
    pub fn notify(&self, event: ResourceEvent) {
        // The session may already be torn down; late notifications are dropped
        if self.tx.send(event).is_err() {
            tracing::trace!("resource notification dropped, session is gone");
        }
    }

    pub fn started(&self) {
        self.notify(ResourceEvent::Started);
    }

    pub fn paused(&self) {
        self.notify(ResourceEvent::Paused);
    }

    pub fn ended(&self) {
        self.notify(ResourceEvent::Ended);
    }

    pub fn failed(&self, reason: impl Into<String>) {
        self.notify(ResourceEvent::Failed {
            reason: reason.into(),
        });
    }
}

/// Receiving half, owned by the session
#[derive(Debug)]
pub struct ResourceEvents {
    rx: UnboundedReceiver<ResourceEvent>,
}

impl ResourceEvents {
    /// Next queued notification without waiting
    pub fn try_next(&mut self) -> Option<ResourceEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_arrive_in_order() {
        let (notifier, mut events) = resource_channel();
        notifier.started();
        notifier.failed("network");
        notifier.ended();

        assert_eq!(events.try_next(), Some(ResourceEvent::Started));
        assert_eq!(
            events.try_next(),
            Some(ResourceEvent::Failed {
                reason: "network".to_string()
            })
        );
        assert_eq!(events.try_next(), Some(ResourceEvent::Ended));
        assert_eq!(events.try_next(), None);
    }

    #[test]
    fn test_notify_after_receiver_dropped_is_silent() {
        let (notifier, events) = resource_channel();
        drop(events);
        notifier.started();
    }

    #[tokio::test]
    async fn test_notifications_sent_from_another_task() {
        let (notifier, mut events) = resource_channel();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            notifier.paused();
        })
        .await
        .unwrap();

        assert_eq!(events.try_next(), Some(ResourceEvent::Paused));
        assert_eq!(events.try_next(), None);
    }
}
