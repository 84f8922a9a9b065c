use std::time::Duration;
use tokio::time::sleep;

use crate::config::ProbeConfig;

pub struct Scheduler {
    interval: Duration,
    count: u16,
}

impl Scheduler {
    pub fn new(cfg: &ProbeConfig) -> Self {
        Self {
            interval: cfg.interval,
            count: cfg.count,
        }
    }

    /// job: async closure for each sequence number, 1..=count.
    ///
    /// Each job runs to completion before the pause, so at most one probe is
    /// in flight. The pause follows the last job as well.
    pub async fn run<J, F>(&self, mut job: J)
    where
        J: FnMut(u16) -> F,
        F: std::future::Future<Output = ()>,
    {
        for seq in 1..=self.count {
            job(seq).await;
            sleep(self.interval).await;
        }
    }
}
