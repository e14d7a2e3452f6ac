use tokio::sync::watch;

/// Store-wide cancellation, expressed as a generation counter.
///
/// A fetch captures the generation when it is issued. `cancel_all` moves the
/// counter on, which wakes every captured [`Generation`] and marks it stale.
/// Fetches issued afterwards capture the new value and are unaffected.
#[derive(Debug)]
pub struct CancellationSignal {
    generation: watch::Sender<u64>,
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationSignal {
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self { generation }
    }

    pub fn current(&self) -> Generation {
        let receiver = self.generation.subscribe();
        let issued = *receiver.borrow();

        Generation { issued, receiver }
    }

    pub fn cancel_all(&self) -> u64 {
        self.generation.send_modify(|generation| *generation += 1);
        *self.generation.borrow()
    }
}

#[derive(Debug)]
pub struct Generation {
    issued: u64,
    receiver: watch::Receiver<u64>,
}

impl Generation {
    pub fn is_current(&self) -> bool {
        *self.receiver.borrow() == self.issued
    }

    /// Resolves once this generation has been cancelled.
    pub async fn cancelled(&mut self) {
        while self.is_current() {
            if self.receiver.changed().await.is_err() {
                /* NOTE: signal dropped together with its store, nothing left to apply to */
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn cancel_all_stales_earlier_generations_only() {
        let signal = CancellationSignal::new();
        let before = signal.current();

        assert_eq!(signal.cancel_all(), 1);

        let after = signal.current();
        assert!(!before.is_current());
        assert!(after.is_current());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_wakes_on_cancel_all() {
        let signal = CancellationSignal::new();
        let mut generation = signal.current();

        let pending = tokio::time::timeout(Duration::from_millis(20), generation.cancelled()).await;
        assert!(pending.is_err());

        signal.cancel_all();

        tokio::time::timeout(Duration::from_secs(1), generation.cancelled())
            .await
            .expect("generation should be cancelled");
    }

    #[tokio::test]
    async fn dropping_the_signal_releases_waiters() {
        let signal = CancellationSignal::new();
        let mut generation = signal.current();
        drop(signal);

        tokio::time::timeout(Duration::from_secs(1), generation.cancelled())
            .await
            .expect("waiter should return once the signal is gone");
    }
}
