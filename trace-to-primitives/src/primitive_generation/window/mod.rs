pub mod frugal_pedestal;
pub mod running_sum;

use super::datatype::{Temporal, TracePoint};
pub use frugal_pedestal::FrugalPedestal;
pub use running_sum::RunningSum;

/// A stateful per-sample transformation of a trace.
pub trait Window: Clone {
    type TimeType: Temporal;
    type InputType: Copy;
    type OutputType;

    /// Absorbs one sample; returns whether an output is available for it.
    fn push(&mut self, value: Self::InputType) -> bool;
    fn output(&self) -> Option<Self::OutputType>;
}

#[derive(Clone)]
pub struct WindowIter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    window_function: W,
    source: I,
}

impl<I, W> WindowIter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    pub(crate) fn new(source: I, window_function: W) -> Self {
        WindowIter {
            source,
            window_function,
        }
    }
}

impl<I, W> Iterator for WindowIter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window<
            TimeType = <I::Item as TracePoint>::Time,
            InputType = <I::Item as TracePoint>::Value,
        >,
{
    type Item = (W::TimeType, W::OutputType);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let point = self.source.next()?;
            if self.window_function.push(point.get_value()) {
                return Some((point.get_time(), self.window_function.output()?));
            }
        }
    }
}

pub trait WindowFilter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    fn window(self, window: W) -> WindowIter<I, W>;
}

impl<I, W> WindowFilter<I, W> for I
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    fn window(self, window: W) -> WindowIter<I, W> {
        WindowIter::<I, W>::new(self, window)
    }
}
