// Copyright (c) 2026 The hidemark-core Authors
// SPDX-License-Identifier: GPL-3.0-only
// hidemark-core: blind LSB text watermarking for pixel buffers

//! Progress reporting for embed and extract.
//!
//! Progress is passed in as a [`ProgressSink`], never held in global state,
//! so concurrent operations on independent buffers do not interfere.
//! Reports are fractions in `[0.0, 1.0]`, non-decreasing within one call,
//! and batched to at least [`PROGRESS_STEP`] apart.
//!
//! Sinks are fire-and-forget: the core never waits on them and ignores
//! whatever they do with the value. [`AtomicProgress`] is a lock-free sink a
//! UI thread can poll while the work runs elsewhere.

use core::sync::atomic::{AtomicU64, Ordering};

/// Minimum advance between two reports.
pub const PROGRESS_STEP: f64 = 0.05;

/// Receiver of fractional progress updates.
pub trait ProgressSink {
    fn report(&mut self, fraction: f64);
}

impl<F: FnMut(f64)> ProgressSink for F {
    fn report(&mut self, fraction: f64) {
        self(fraction)
    }
}

/// Discards all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _fraction: f64) {}
}

/// Stores the latest fraction in an atomic for polling from another thread.
///
/// Share it behind an `Arc` and hand [`sink`](Self::sink) to the operation.
#[derive(Debug, Default)]
pub struct AtomicProgress {
    bits: AtomicU64,
}

impl AtomicProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, fraction: f64) {
        self.bits.store(fraction.to_bits(), Ordering::Relaxed);
    }

    /// Latest reported fraction (0.0 before the first report).
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn is_complete(&self) -> bool {
        self.get() >= 1.0
    }

    pub fn reset(&self) {
        self.store(0.0);
    }

    /// Borrowing sink that writes into this atomic.
    pub fn sink(&self) -> impl FnMut(f64) + '_ {
        move |fraction| self.store(fraction)
    }
}

impl ProgressSink for AtomicProgress {
    fn report(&mut self, fraction: f64) {
        self.store(fraction);
    }
}

/// Batches unit-level progress (bits) into fractional reports.
///
/// Reports only once at least `PROGRESS_STEP × total` units have passed since
/// the previous report. [`finish`](Self::finish) guarantees a final exact 1.0.
pub(crate) struct Throttle<'a, P: ProgressSink + ?Sized> {
    sink: &'a mut P,
    total: usize,
    step: usize,
    next_at: usize,
    last: f64,
}

impl<'a, P: ProgressSink + ?Sized> Throttle<'a, P> {
    pub(crate) fn new(sink: &'a mut P, total: usize) -> Self {
        let step = ((total as f64 * PROGRESS_STEP).ceil() as usize).max(1);
        Self {
            sink,
            total,
            step,
            next_at: step,
            last: 0.0,
        }
    }

    /// Record that `done` of `total` units are complete.
    pub(crate) fn advance_to(&mut self, done: usize) {
        if self.total == 0 || done < self.next_at {
            return;
        }
        let fraction = (done as f64 / self.total as f64).min(1.0);
        if fraction > self.last {
            self.sink.report(fraction);
            self.last = fraction;
        }
        self.next_at = done.saturating_add(self.step);
    }

    /// Report exactly 1.0 unless it was already the last value sent.
    pub(crate) fn finish(&mut self) {
        if self.last < 1.0 {
            self.sink.report(1.0);
            self.last = 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_to_step() {
        let mut seen = Vec::new();
        let mut sink = |f: f64| seen.push(f);
        let mut throttle = Throttle::new(&mut sink, 1000);
        for done in 1..=1000 {
            throttle.advance_to(done);
        }
        throttle.finish();
        // 1000 units, step 50 -> 20 reports, the last one exactly 1.0.
        assert_eq!(seen.len(), 20);
        assert_eq!(*seen.last().unwrap(), 1.0);
        for pair in seen.windows(2) {
            assert!(pair[1] - pair[0] >= PROGRESS_STEP - 1e-12, "{pair:?}");
        }
    }

    #[test]
    fn finish_reports_once() {
        let mut seen = Vec::new();
        let mut sink = |f: f64| seen.push(f);
        let mut throttle = Throttle::new(&mut sink, 7);
        throttle.advance_to(7);
        throttle.finish();
        throttle.finish();
        assert_eq!(seen, vec![1.0]);
    }

    #[test]
    fn finish_without_advance() {
        let mut seen = Vec::new();
        let mut sink = |f: f64| seen.push(f);
        Throttle::new(&mut sink, 100).finish();
        assert_eq!(seen, vec![1.0]);
    }

    #[test]
    fn never_decreases() {
        let mut seen = Vec::new();
        let mut sink = |f: f64| seen.push(f);
        let mut throttle = Throttle::new(&mut sink, 40);
        throttle.advance_to(20);
        throttle.advance_to(10);
        throttle.advance_to(30);
        throttle.finish();
        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{seen:?}");
        assert_eq!(seen, vec![0.5, 0.75, 1.0]);
    }

    #[test]
    fn small_totals_report_every_unit() {
        let mut seen = Vec::new();
        let mut sink = |f: f64| seen.push(f);
        let mut throttle = Throttle::new(&mut sink, 4);
        for done in 1..=4 {
            throttle.advance_to(done);
        }
        assert_eq!(seen, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn atomic_progress_polls() {
        let progress = AtomicProgress::new();
        assert_eq!(progress.get(), 0.0);
        let mut sink = progress.sink();
        sink(0.4);
        assert_eq!(progress.get(), 0.4);
        assert!(!progress.is_complete());
        progress.store(1.0);
        assert!(progress.is_complete());
        progress.reset();
        assert_eq!(progress.get(), 0.0);
    }

    #[test]
    fn no_progress_is_silent() {
        let mut sink = NoProgress;
        let mut throttle = Throttle::new(&mut sink, 10);
        throttle.advance_to(10);
        throttle.finish();
    }
}
