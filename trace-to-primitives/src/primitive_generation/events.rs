use super::{datatype::TracePoint, detectors::Detector};

/// Drives a [`Detector`] over a trace, yielding its events.
///
/// When the trace is exhausted the detector's `finish` is invoked exactly
/// once, so end-of-trace policy lives with the detector.
#[derive(Clone)]
pub struct EventIter<I, D>
where
    I: Iterator,
    I::Item: TracePoint,
    D: Detector,
{
    source: I,
    detector: D,
    finished: bool,
}

impl<I, D> Iterator for EventIter<I, D>
where
    I: Iterator,
    I::Item: TracePoint<Time = D::TimeType, Value = D::ValueType>,
    D: Detector,
{
    type Item = D::EventType;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            match self.source.next() {
                Some(point) => {
                    if let Some(event) = self.detector.signal(point.get_time(), point.get_value())
                    {
                        return Some(event);
                    }
                }
                None => {
                    self.finished = true;
                    return self.detector.finish();
                }
            }
        }
    }
}

pub trait EventFilter<I, D>
where
    I: Iterator,
    I::Item: TracePoint,
    D: Detector,
{
    fn events(self, detector: D) -> EventIter<I, D>;
}

impl<I, D> EventFilter<I, D> for I
where
    I: Iterator,
    I::Item: TracePoint,
    D: Detector,
{
    fn events(self, detector: D) -> EventIter<I, D> {
        EventIter {
            source: self,
            detector,
            finished: false,
        }
    }
}
