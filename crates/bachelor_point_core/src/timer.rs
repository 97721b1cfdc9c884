//! crates/bachelor_point_core/src/timer.rs
//!
//! A cancellable repeating countdown. The spawned task decrements a shared value
//! once per period and exits at zero or as soon as its token is cancelled.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug)]
pub struct Countdown {
    remaining: watch::Receiver<u32>,
    token: CancellationToken,
}

impl Countdown {
    /// A countdown already at zero with no task behind it.
    pub fn idle() -> Self {
        let (_, remaining) = watch::channel(0);
        Self {
            remaining,
            token: CancellationToken::new(),
        }
    }

    /// Spawns the ticking task. Cancelling `parent` also stops this countdown.
    pub fn start(seconds: u32, period: Duration, parent: &CancellationToken) -> Self {
        let (sender, remaining) = watch::channel(seconds);
        let token = parent.child_token();
        if seconds == 0 {
            return Self { remaining, token };
        }

        let task_token = token.clone();
        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        debug!("Countdown cancelled.");
                        return;
                    }
                    _ = ticks.tick() => {
                        let mut left = 0;
                        sender.send_modify(|value| {
                            *value = value.saturating_sub(1);
                            left = *value;
                        });
                        if left == 0 {
                            debug!("Countdown reached zero.");
                            return;
                        }
                    }
                }
            }
        });

        Self { remaining, token }
    }

    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
