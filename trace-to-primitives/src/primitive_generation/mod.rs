//! The per-channel signal chain of the emulator.
//!
//! A raw trace takes the form of an iterator of `(timestamp, sample)` pairs.
//! Stages are composed as iterator adaptors: [`Window`] stages transform the
//! sample stream in place (pedestal subtraction, running sum), and
//! [`Detector`] stages reduce it to a stream of [`Hit`]s.

pub(crate) mod datatype;
pub mod detectors;
pub mod events;
pub mod hit;
pub mod window;

pub use detectors::{Detector, HitDetector};
pub use events::EventFilter;
pub use hit::Hit;
pub use window::{FrugalPedestal, RunningSum, Window, WindowFilter};
