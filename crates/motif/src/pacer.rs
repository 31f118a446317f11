//! Paced emission of placements.
//!
//! The host's placement call is rate limited, so placements are sent one at
//! a time with a pause between successive calls. How long to pause is decided
//! by a [`PacingPolicy`]; a [`CancelToken`] lets the user abort a run at any
//! suspension point.
//!
//! A run never has two sink calls in flight, never retries a failed call and
//! never pauses after the last placement.

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use log::{debug, error, info, trace};
use thiserror::Error;
use tokio::{
    sync::watch,
    time::{self, Instant},
};

use motif_core::placement::Placement;

use crate::sink::{PlacementSink, SinkError};

/// Decides how long to wait between two placements.
#[async_trait]
pub trait PacingPolicy: fmt::Debug + Send {
    /// Waits until the next placement may be sent.
    async fn pause(&mut self);
}

#[async_trait]
impl<P: PacingPolicy + ?Sized> PacingPolicy for Box<P> {
    async fn pause(&mut self) {
        (**self).pause().await
    }
}

/// Waits the same delay before every placement after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl PacingPolicy for FixedDelay {
    async fn pause(&mut self) {
        time::sleep(self.delay).await;
    }
}

/// Allows bursts of up to `capacity` placements, then one placement per
/// refill interval.
///
/// The bucket starts full. A zero refill interval never waits.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    capacity: u32,
    interval: Duration,
    tokens: u32,
    last_refill: Instant,
}

impl TokenBucket {
    /// Creates a full bucket. A zero capacity is treated as one.
    pub fn new(capacity: u32, interval: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            interval,
            tokens: capacity,
            last_refill: Instant::now(),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Tokens currently available
    pub fn tokens(&self) -> u32 {
        self.tokens
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_refill);
        let earned = elapsed.as_nanos() / self.interval.as_nanos();
        if earned == 0 {
            return;
        }

        let tokens = (u128::from(self.tokens) + earned).min(u128::from(self.capacity)) as u32;
        if tokens == self.capacity {
            self.last_refill = now;
        } else {
            // earned < capacity here, so it fits in u32
            self.last_refill += self.interval * earned as u32;
        }
        self.tokens = tokens;
    }
}

#[async_trait]
impl PacingPolicy for TokenBucket {
    async fn pause(&mut self) {
        if self.interval.is_zero() {
            return;
        }

        self.refill();
        if self.tokens == 0 {
            let waited = Instant::now().saturating_duration_since(self.last_refill);
            time::sleep(self.interval.saturating_sub(waited)).await;
            self.refill();
        }
        self.tokens = self.tokens.saturating_sub(1);
    }
}

/// Never waits, only yields to the runtime between placements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Immediate;

#[async_trait]
impl PacingPolicy for Immediate {
    async fn pause(&mut self) {
        tokio::task::yield_now().await;
    }
}

/// Cooperative cancellation signal shared between a run and its controller.
///
/// Clones observe the same signal. Once cancelled, a token stays cancelled.
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Requests cancellation of every run holding this token.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        // The token owns a sender, so the channel cannot close under us.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitReport {
    emitted: usize,
    elapsed: Duration,
}

impl EmitReport {
    /// Number of placements the sink accepted
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Errors that end a run early.
///
/// Placements accepted before the error stay on the canvas.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("placement {index} was rejected by the sink")]
    Sink {
        index: usize,
        emitted: usize,
        #[source]
        source: SinkError,
    },

    #[error("run cancelled after {emitted} placements")]
    Cancelled { emitted: usize },
}

impl EmitError {
    /// Number of placements accepted before the run ended
    pub fn emitted(&self) -> usize {
        match self {
            Self::Sink { emitted, .. } | Self::Cancelled { emitted } => *emitted,
        }
    }
}

/// Sends `placements` to `sink` in order, pausing with `policy` in between.
///
/// The cancel token is checked before each sink call and raced against each
/// pause.
///
/// # Errors
///
/// Returns [`EmitError::Sink`] on the first sink failure; the remaining
/// placements are never requested. Returns [`EmitError::Cancelled`] when
/// `cancel` fires before the run completes.
pub async fn emit<I, S, P>(
    placements: I,
    sink: &mut S,
    policy: &mut P,
    cancel: &CancelToken,
) -> Result<EmitReport, EmitError>
where
    I: IntoIterator<Item = Placement>,
    S: PlacementSink + ?Sized,
    P: PacingPolicy + ?Sized,
{
    let started = Instant::now();
    let mut placements = placements.into_iter().peekable();
    let mut emitted = 0;

    while let Some(placement) = placements.next() {
        if cancel.is_cancelled() {
            info!(emitted; "Run cancelled before next placement");
            return Err(EmitError::Cancelled { emitted });
        }

        if let Err(source) = sink.place(placement).await {
            error!(index = emitted, err:err = source; "Placement failed, aborting run");
            return Err(EmitError::Sink {
                index: emitted,
                emitted,
                source,
            });
        }
        emitted += 1;
        trace!(emitted; "Placement accepted");

        if placements.peek().is_none() {
            break;
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(emitted; "Run cancelled while pacing");
                return Err(EmitError::Cancelled { emitted });
            }
            _ = policy.pause() => {}
        }
    }

    let elapsed = started.elapsed();
    debug!(emitted, elapsed:? = elapsed; "Run complete");
    Ok(EmitReport { emitted, elapsed })
}

/// A pacing policy bundled with the cancel token of the runs it drives.
#[derive(Debug)]
pub struct Pacer {
    policy: Box<dyn PacingPolicy>,
    cancel: CancelToken,
}

impl Pacer {
    pub fn new(policy: impl PacingPolicy + 'static) -> Self {
        Self {
            policy: Box::new(policy),
            cancel: CancelToken::new(),
        }
    }

    /// Creates a pacer with a [`FixedDelay`] policy.
    pub fn fixed(delay: Duration) -> Self {
        Self::new(FixedDelay::new(delay))
    }

    /// Uses `cancel` instead of the pacer's own token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns a handle that cancels runs driven by this pacer.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Sends `placements` to `sink`; see [`emit`].
    ///
    /// # Errors
    ///
    /// Same as [`emit`].
    pub async fn emit<I, S>(&mut self, placements: I, sink: &mut S) -> Result<EmitReport, EmitError>
    where
        I: IntoIterator<Item = Placement>,
        S: PlacementSink + ?Sized,
    {
        emit(placements, sink, &mut self.policy, &self.cancel).await
    }
}

#[cfg(test)]
mod tests {
    use motif_core::{canvas::CanvasBounds, kind::ArrangementKind};

    use super::*;
    use crate::{arrange::generate, model::Configuration, sink::CollectingSink};

    const DELAY: Duration = Duration::from_millis(250);

    fn placements(count: u32) -> Vec<Placement> {
        let config = Configuration::default().with_num_elements(count);
        generate(ArrangementKind::Circle, &config, CanvasBounds::default())
            .unwrap()
            .collect()
    }

    /// Cancels the token once `after` placements were accepted.
    #[derive(Debug)]
    struct CancellingSink {
        inner: CollectingSink,
        cancel: CancelToken,
        after: usize,
    }

    #[async_trait]
    impl PlacementSink for CancellingSink {
        async fn place(&mut self, placement: Placement) -> Result<(), SinkError> {
            self.inner.place(placement).await?;
            if self.inner.len() == self.after {
                self.cancel.cancel();
            }
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_between_placements() {
        let mut sink = CollectingSink::new();
        let mut pacer = Pacer::fixed(DELAY);

        let report = pacer.emit(placements(5), &mut sink).await.unwrap();

        assert_eq!(report.emitted(), 5);
        assert_eq!(sink.len(), 5);
        assert!(report.elapsed() >= DELAY * 4);
        // no pause after the last placement
        assert!(report.elapsed() < DELAY * 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_is_preserved() {
        let expected = placements(6);
        let mut sink = CollectingSink::new();

        Pacer::fixed(DELAY)
            .emit(expected.clone(), &mut sink)
            .await
            .unwrap();

        assert_eq!(sink.placements(), expected.as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_run_takes_no_time() {
        let mut sink = CollectingSink::new();
        let report = Pacer::fixed(DELAY)
            .emit(Vec::new(), &mut sink)
            .await
            .unwrap();

        assert_eq!(report.emitted(), 0);
        assert_eq!(report.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_failure_aborts_run() {
        let mut sink = CollectingSink::new().failing_at(2);

        let err = Pacer::fixed(DELAY)
            .emit(placements(5), &mut sink)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EmitError::Sink {
                index: 2,
                emitted: 2,
                ..
            }
        ));
        assert_eq!(err.emitted(), 2);
        assert_eq!(sink.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_start() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut sink = CollectingSink::new();

        let err = Pacer::fixed(DELAY)
            .with_cancel(cancel)
            .emit(placements(3), &mut sink)
            .await
            .unwrap_err();

        assert!(matches!(err, EmitError::Cancelled { emitted: 0 }));
        assert!(sink.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_before_next_sink_call() {
        let cancel = CancelToken::new();
        let mut sink = CancellingSink {
            inner: CollectingSink::new(),
            cancel: cancel.clone(),
            after: 2,
        };

        let err = emit(placements(5), &mut sink, &mut Immediate, &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, EmitError::Cancelled { emitted: 2 }));
        assert_eq!(sink.inner.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_pause() {
        let mut pacer = Pacer::fixed(Duration::from_millis(100));
        let cancel = pacer.cancel_token();
        let mut sink = CollectingSink::new();
        let started = Instant::now();

        let (result, ()) = tokio::join!(pacer.emit(placements(5), &mut sink), async {
            time::sleep(Duration::from_millis(150)).await;
            cancel.cancel();
        });

        assert!(matches!(result, Err(EmitError::Cancelled { emitted: 2 })));
        assert!(started.elapsed() >= Duration::from_millis(150));
        assert!(started.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_bucket_allows_burst() {
        let interval = Duration::from_millis(100);
        let mut policy = TokenBucket::new(3, interval);
        let mut sink = CollectingSink::new();

        let report = emit(placements(6), &mut sink, &mut policy, &CancelToken::new())
            .await
            .unwrap();

        // five pauses: three from the initial burst, two refills
        assert_eq!(report.emitted(), 6);
        assert!(report.elapsed() >= interval * 2);
        assert!(report.elapsed() < interval * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_bucket_refills_to_capacity() {
        let mut bucket = TokenBucket::new(2, Duration::from_millis(50));
        bucket.pause().await;
        bucket.pause().await;
        assert_eq!(bucket.tokens(), 0);

        time::sleep(Duration::from_millis(500)).await;
        bucket.refill();
        assert_eq!(bucket.tokens(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_does_not_advance_clock() {
        let started = Instant::now();
        let report = emit(
            placements(10),
            &mut CollectingSink::new(),
            &mut Immediate,
            &CancelToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(report.emitted(), 10);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
