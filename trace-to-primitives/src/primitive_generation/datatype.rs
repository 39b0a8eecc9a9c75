use std::fmt::Debug;
use tpg_common::Timestamp;

/// This trait abstracts any type used as a time variable.
pub trait Temporal: Default + Copy + Debug + PartialEq {}

impl Temporal for Timestamp {}

/// One point of a trace: a time and the sample value recorded at that time.
pub trait TracePoint: Clone {
    /// The type which represents the time of the data point.
    /// This should be trivially copyable (usually a scalar).
    type Time: Temporal;

    /// The type which contains the value of the data point.
    type Value: Copy;

    fn get_time(&self) -> Self::Time;
    fn get_value(&self) -> Self::Value;
}

/// The most basic non-trivial trace point: the first element is the time and
/// the second the value.
impl<X, Y> TracePoint for (X, Y)
where
    X: Temporal,
    Y: Copy,
{
    type Time = X;
    type Value = Y;

    fn get_time(&self) -> Self::Time {
        self.0
    }

    fn get_value(&self) -> Self::Value {
        self.1
    }
}
