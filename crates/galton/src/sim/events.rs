//! Event types and sinks for observing batch runs.
//!
//! A presentation layer that animates particles as they land can subscribe through an
//! [`EventSink`] instead of waiting for the whole [`crate::sim::batch::BatchResult`].
//! Events arrive in particle-processing order.
use glam::Vec2;

/// Describes events emitted by a batch run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    /// Emitted before the first particle is drawn.
    BatchStarted {
        /// Number of peg rows on the board.
        rows: u32,
        /// Number of particles the batch will drop.
        particle_count: usize,
    },

    /// Emitted after a particle was stacked in its bin.
    ParticleLanded {
        /// Zero-based particle index in the batch.
        index: usize,
        /// Final bin index.
        bin: u32,
        /// Zero-based slot within the bin.
        slot: u32,
        /// Stacked resting point.
        position: Vec2,
    },

    /// Emitted after the last particle landed.
    BatchFinished {
        /// Particles per bin.
        counts: Vec<u32>,
    },
}

/// A generic event sink that accepts [`BatchEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: BatchEvent);
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: BatchEvent) {}
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(BatchEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(BatchEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(BatchEvent),
{
    #[inline]
    fn send(&mut self, event: BatchEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<BatchEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<BatchEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[BatchEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: BatchEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn into_sinks(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self { sinks: Vec::new() }
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: BatchEvent) {
        let Some((last, rest)) = self.sinks.split_last_mut() else {
            return;
        };
        for sink in rest {
            sink.send(event.clone());
        }
        last.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> BatchEvent {
        BatchEvent::BatchStarted {
            rows: 2,
            particle_count: 1,
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(started());
        sink.send(BatchEvent::BatchFinished {
            counts: vec![0, 1, 0],
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.as_slice()[0], started());
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![VecSink::new(), VecSink::new()]);
        multi.send(started());
        let sinks = multi.into_sinks();
        assert_eq!(sinks.len(), 2);
        assert!(sinks.iter().all(|s| s.as_slice() == [started()]));
    }

    #[test]
    fn empty_multi_sink_drops_events() {
        let mut multi: MultiSink<VecSink> = MultiSink::default();
        multi.send(started());
        multi.push(VecSink::new());
        multi.send(started());
        assert_eq!(multi.into_sinks()[0].len(), 1);
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(started());
        sink.send(started());
        drop(sink);
        assert_eq!(count, 2);
    }
}
