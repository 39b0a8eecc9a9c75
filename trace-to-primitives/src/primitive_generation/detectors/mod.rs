pub mod hit_detector;

use super::datatype::Temporal;
pub use hit_detector::HitDetector;

/// A stateful reduction of a trace to a stream of events.
pub trait Detector: Clone {
    type TimeType: Temporal;
    type ValueType: Copy;
    type EventType;

    fn signal(&mut self, time: Self::TimeType, value: Self::ValueType)
        -> Option<Self::EventType>;

    /// Called once when the trace ends, giving the detector the chance to
    /// emit or discard a pending candidate.
    fn finish(&mut self) -> Option<Self::EventType>;
}
