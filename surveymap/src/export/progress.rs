//! Non-blocking progress reporting.

use tokio::sync::mpsc;

/// Tiles settled so far out of the grid total.
///
/// `completed` counts failed tiles too, so a finished fetch always reports
/// `completed == total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub completed: usize,
    pub total: usize,
}

impl ProgressEvent {
    /// Completion in percent, 0 to 100.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed.min(self.total) * 100) / self.total) as u8
    }
}

/// Receiver of progress events. Implementations must not block.
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Forwards events to an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelProgress {
    /// Creates a sink and the receiver that observes it.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelProgress {
    fn report(&self, event: ProgressEvent) {
        // Receiver gone means nobody is watching any more
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(ProgressEvent { completed: 0, total: 9 }.percent(), 0);
        assert_eq!(ProgressEvent { completed: 3, total: 9 }.percent(), 33);
        assert_eq!(ProgressEvent { completed: 9, total: 9 }.percent(), 100);
        assert_eq!(ProgressEvent { completed: 0, total: 0 }.percent(), 100);
    }

    #[tokio::test]
    async fn test_channel_progress_delivers_in_order() {
        let (sink, mut rx) = ChannelProgress::new();
        sink.report(ProgressEvent { completed: 1, total: 2 });
        sink.report(ProgressEvent { completed: 2, total: 2 });
        drop(sink);

        assert_eq!(rx.recv().await, Some(ProgressEvent { completed: 1, total: 2 }));
        assert_eq!(rx.recv().await, Some(ProgressEvent { completed: 2, total: 2 }));
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_report_after_receiver_dropped_is_silent() {
        let (sink, rx) = ChannelProgress::new();
        drop(rx);
        sink.report(ProgressEvent { completed: 1, total: 1 });
    }
}
