//! Fixed-interval polling of a screener query.
//!
//! The stream is demand-driven: nothing runs until the consumer asks for the
//! next element, and the inter-poll delay is awaited inside that request.
//! Dropping the stream is the only way to stop an unbounded poll.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use futures::stream::{self, Stream};

/// Lower bound on the delay between two polls.
pub const MIN_STREAM_INTERVAL: Duration = Duration::from_millis(1000);

const DEFAULT_STREAM_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamOptions {
    /// Requested delay between polls; clamped to [`MIN_STREAM_INTERVAL`].
    pub interval: Duration,
    /// Stop after this many polls. `None` polls forever.
    pub max_iterations: Option<u64>,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_STREAM_INTERVAL,
            max_iterations: None,
        }
    }
}

impl StreamOptions {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn effective_interval(&self) -> Duration {
        self.interval.max(MIN_STREAM_INTERVAL)
    }
}

/// Poll loop state between two elements.
#[derive(Clone, Copy, Debug)]
struct PollState {
    iteration: u64,
    interval: Duration,
    max_iterations: Option<u64>,
}

impl PollState {
    fn new(options: StreamOptions) -> Self {
        Self {
            iteration: 0,
            interval: options.effective_interval(),
            max_iterations: options.max_iterations,
        }
    }

    fn is_done(&self) -> bool {
        self.max_iterations
            .is_some_and(|max| self.iteration >= max)
    }

    /// No delay before the first poll.
    fn delay(&self) -> Option<Duration> {
        (self.iteration > 0).then_some(self.interval)
    }

    fn advance(self) -> Self {
        Self {
            iteration: self.iteration + 1,
            ..self
        }
    }
}

/// Calls `fetch` once per element, sleeping between calls.
///
/// A failed fetch is logged and yielded as `None`; the poll continues.
pub fn poll<F, Fut, T, E>(options: StreamOptions, fetch: F) -> impl Stream<Item = Option<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    stream::unfold(
        (PollState::new(options), fetch),
        |(state, mut fetch)| async move {
            if state.is_done() {
                return None;
            }
            if let Some(delay) = state.delay() {
                tokio::time::sleep(delay).await;
            }
            let item = match fetch().await {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Stream error on iteration {}: {}", state.iteration + 1, e);
                    None
                }
            };
            Some((item, (state.advance(), fetch)))
        },
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures::StreamExt;
    use tokio::time::Instant;

    use super::*;

    #[test]
    fn interval_is_clamped() {
        let opts = StreamOptions::default().with_interval(Duration::from_millis(10));
        assert_eq!(opts.effective_interval(), MIN_STREAM_INTERVAL);
        let opts = StreamOptions::default();
        assert_eq!(opts.effective_interval(), Duration::from_millis(5000));
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_poll_yields_exactly_max_iterations() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = calls.clone();
        let opts = StreamOptions::default()
            .with_interval(Duration::from_millis(10))
            .with_max_iterations(3);

        let items: Vec<Option<u32>> = poll(opts, move || {
            let recorder = recorder.clone();
            async move {
                let mut calls = recorder.lock().unwrap();
                calls.push(Instant::now());
                Ok::<_, String>(calls.len() as u32)
            }
        })
        .collect()
        .await;

        assert_eq!(items, vec![Some(1), Some(2), Some(3)]);
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        for pair in calls.windows(2) {
            assert!(pair[1] - pair[0] >= MIN_STREAM_INTERVAL);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn errors_become_none_and_polling_continues() {
        let mut n = 0u32;
        let opts = StreamOptions::default().with_max_iterations(4);
        let items: Vec<Option<u32>> = poll(opts, move || {
            n += 1;
            let current = n;
            async move {
                if current % 2 == 0 {
                    Err(format!("boom {}", current))
                } else {
                    Ok(current)
                }
            }
        })
        .collect()
        .await;
        assert_eq!(items, vec![Some(1), None, Some(3), None]);
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_poll_runs_until_dropped() {
        let opts = StreamOptions::default();
        let items: Vec<Option<u32>> = poll(opts, || async { Ok::<_, String>(7) })
            .take(5)
            .collect()
            .await;
        assert_eq!(items.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_iterations_is_empty() {
        let opts = StreamOptions::default().with_max_iterations(0);
        let items: Vec<Option<u32>> = poll(opts, || async { Ok::<_, String>(1) })
            .collect()
            .await;
        assert!(items.is_empty());
    }
}
