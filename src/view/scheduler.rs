use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Host hook that arranges for one more frame callback.
pub trait FrameScheduler {
    fn schedule_next_frame(&mut self);
}

/// Frame requests go over a channel; [`FrameTicks`] turns them into
/// callbacks spaced by the frame interval.
#[derive(Debug, Clone)]
pub struct TokioFrameScheduler {
    tx: mpsc::UnboundedSender<()>,
}

impl TokioFrameScheduler {
    pub fn channel(interval: Duration) -> (Self, FrameTicks) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, FrameTicks { rx, interval })
    }
}

impl FrameScheduler for TokioFrameScheduler {
    fn schedule_next_frame(&mut self) {
        if self.tx.send(()).is_err() {
            log::warn!("Frame driver is gone, dropping frame request");
        }
    }
}

pub struct FrameTicks {
    rx: mpsc::UnboundedReceiver<()>,
    interval: Duration,
}

impl FrameTicks {
    /// Waits for the next requested frame. Returns false once the scheduler
    /// has been dropped.
    pub async fn next(&mut self) -> bool {
        if self.rx.recv().await.is_none() {
            return false;
        }
        sleep(self.interval).await;
        true
    }
}

/// Counts requests and never fires on its own; frames are driven by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pub requested: usize,
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next_frame(&mut self) {
        self.requested += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ticks_follow_requests() {
        let (mut scheduler, mut ticks) = TokioFrameScheduler::channel(Duration::from_millis(1));
        scheduler.schedule_next_frame();
        scheduler.schedule_next_frame();
        assert!(ticks.next().await);
        assert!(ticks.next().await);
        drop(scheduler);
        assert!(!ticks.next().await);
    }
}
