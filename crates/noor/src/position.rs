//! Debounced persistence of the reading position.
//!
//! Scrolling reports the first visible verse many times per second. Writing each report to
//! durable storage is wasteful, so [`PositionDebouncer`] coalesces them: a repeated value is
//! dropped outright, and a new value replaces any pending write and schedules its own after the
//! configured delay of inactivity. However many updates arrive within the window, at most one
//! write happens, carrying the latest value, `delay` after the last update.
//!
//! Dropping the debouncer cancels a pending write without flushing it. Call
//! [`PositionDebouncer::flush`] first to keep the last position.
//!
//! # Examples
//!
//! ```no_run
//! use std::{sync::Arc, time::Duration};
//!
//! use noor::{mushaf::MushafPositionSink, position::PositionDebouncer, store::SqliteStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(SqliteStore::open("noor.db")?);
//! let sink = Arc::new(MushafPositionSink::new(store));
//! let mut debouncer = PositionDebouncer::new(sink, Duration::from_millis(500))?;
//!
//! for global_index in [10, 11, 12] {
//!   debouncer.update(global_index);
//! }
//! // only 12 is written, half a second from now
//! # Ok(())
//! # }
//! ```

use tokio::{runtime::Handle, task::JoinHandle};

use super::*;

/// Default inactivity window before a position is written.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Destination of debounced position writes.
pub trait PositionSink: Send + Sync {
  /// Persists the reading position.
  fn save_position(&self, global_index: u32) -> Result<()>;
}

/// A scheduled write that has not fired yet.
///
/// The timer task and [`PositionDebouncer::flush`] both claim the value by taking it out of
/// `slot`; whichever takes it first writes it, so a value is never written twice.
#[derive(Debug)]
struct Pending {
  /// Value the write will persist, `None` once claimed
  slot: Arc<Mutex<Option<u32>>>,
  /// Timer task performing the write
  task: JoinHandle<()>,
}

impl Pending {
  /// Takes the value out of the slot if nobody has written it yet.
  fn claim(slot: &Mutex<Option<u32>>) -> Option<u32> {
    slot.lock().ok().and_then(|mut value| value.take())
  }

  /// Whether the value is still waiting to be written.
  fn is_unclaimed(&self) -> bool { self.slot.lock().is_ok_and(|value| value.is_some()) }
}

/// Coalesces rapid position updates into a single delayed write.
pub struct PositionDebouncer {
  /// Where positions are written
  sink:    Arc<dyn PositionSink>,
  /// Inactivity window
  delay:   Duration,
  /// Last value passed to [`update`](Self::update)
  last:    Option<u32>,
  /// At most one outstanding write
  pending: Option<Pending>,
  /// Runtime the write timers are spawned on
  runtime: Handle,
}

impl PositionDebouncer {
  /// Creates a debouncer bound to the current tokio runtime.
  ///
  /// # Errors
  ///
  /// Fails when called outside a tokio runtime.
  pub fn new(sink: Arc<dyn PositionSink>, delay: Duration) -> Result<Self> {
    let runtime = Handle::try_current()
      .map_err(|e| NoorError::Config(format!("Position debouncer needs a tokio runtime: {e}")))?;
    Ok(Self { sink, delay, last: None, pending: None, runtime })
  }

  /// The configured inactivity window.
  pub fn delay(&self) -> Duration { self.delay }

  /// Reports the current position.
  ///
  /// A value equal to the previous report is ignored. Any other value cancels the pending write
  /// and schedules a new one `delay` from now.
  pub fn update(&mut self, global_index: u32) {
    if self.last == Some(global_index) {
      return;
    }
    self.last = Some(global_index);
    self.cancel();

    let sink = Arc::clone(&self.sink);
    let delay = self.delay;
    let slot = Arc::new(Mutex::new(Some(global_index)));
    let claim = Arc::clone(&slot);
    let task = self.runtime.spawn(async move {
      tokio::time::sleep(delay).await;
      let Some(global_index) = Pending::claim(&claim) else {
        return;
      };
      trace!("Writing debounced position {global_index}");
      if let Err(e) = sink.save_position(global_index) {
        warn!("Failed to persist reading position {global_index}: {e}");
      }
    });
    self.pending = Some(Pending { slot, task });
  }

  /// Whether a write is scheduled and has not fired yet.
  pub fn has_pending(&self) -> bool { self.pending.as_ref().is_some_and(Pending::is_unclaimed) }

  /// Writes the pending position now instead of waiting for the timer.
  ///
  /// Does nothing when no write is pending, including when the timer has already claimed the
  /// value and is writing it.
  pub fn flush(&mut self) -> Result<()> {
    let Some(pending) = self.pending.take() else {
      return Ok(());
    };
    let Some(global_index) = Pending::claim(&pending.slot) else {
      return Ok(());
    };
    pending.task.abort();
    debug!("Flushing reading position {global_index}");
    self.sink.save_position(global_index)
  }

  /// Tears the debouncer down, dropping any pending write.
  pub fn dispose(self) {}

  /// Aborts the pending write task, if any.
  fn cancel(&mut self) {
    if let Some(pending) = self.pending.take() {
      pending.task.abort();
    }
  }
}

impl Drop for PositionDebouncer {
  fn drop(&mut self) {
    if self.has_pending() {
      debug!("Discarding unsaved reading position on teardown");
    }
    self.cancel();
  }
}
