//! Display refresh ticker.
//!
//! The sign-in page shows the current code and re-renders it every period.
//! The ticker just re-runs generation on an interval and hands each result
//! to a callback; it never participates in verification. Stopping (or
//! dropping the ticker) aborts the task so no periodic work leaks past the
//! owner's teardown.

use tokio::task::JoinHandle;

use crate::passcode::core;
use crate::passcode::types::{GeneratedPasscode, PasscodeConfig};

/// Cancellable periodic code regeneration.
pub struct CodeTicker {
    handle: Option<JoinHandle<()>>,
}

impl Default for CodeTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeTicker {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Start ticking. The callback fires immediately with the current code
    /// and then once per period. No-op if already running.
    pub fn start<F>(&mut self, config: PasscodeConfig, mut on_tick: F)
    where
        F: FnMut(GeneratedPasscode) + Send + 'static,
    {
        if self.handle.is_some() {
            return;
        }
        let period = std::time::Duration::from_millis(config.period_ms.max(1) as u64);
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                on_tick(core::generate_code(&config));
            }
        }));
    }

    /// Stop ticking. No-op if not running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for CodeTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn fast_config() -> PasscodeConfig {
        PasscodeConfig::default().with_period_ms(20)
    }

    #[tokio::test]
    async fn ticker_fires_repeatedly() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = CodeTicker::new();
        ticker.start(fast_config(), move |code| {
            let _ = tx.send(code);
        });

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.code.len(), 6);
        assert_eq!(second.period_ms, 20);
        ticker.stop();
    }

    #[tokio::test]
    async fn stop_halts_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = CodeTicker::new();
        ticker.start(fast_config(), move |code| {
            let _ = tx.send(code);
        });
        let _ = rx.recv().await;
        ticker.stop();
        assert!(!ticker.is_running());

        // Drain anything in flight, then the channel must go quiet.
        tokio::time::sleep(std::time::Duration::from_millis(60)).await;
        while rx.try_recv().is_ok() {}
        tokio::time::sleep(std::time::Duration::from_millis(60)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn start_twice_is_noop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tx2 = tx.clone();
        let mut ticker = CodeTicker::new();
        ticker.start(fast_config(), move |code| {
            let _ = tx.send(code);
        });
        ticker.start(fast_config(), move |code| {
            let _ = tx2.send(code);
        });
        assert!(ticker.is_running());
        let _ = rx.recv().await;
        ticker.stop();
    }

    #[tokio::test]
    async fn drop_aborts_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut ticker = CodeTicker::new();
            ticker.start(fast_config(), move |code| {
                let _ = tx.send(code);
            });
            let _ = rx.recv().await;
        }
        tokio::time::sleep(std::time::Duration::from_millis(60)).await;
        while rx.try_recv().is_ok() {}
        tokio::time::sleep(std::time::Duration::from_millis(60)).await;
        assert!(rx.try_recv().is_err());
    }
}
