//! Software emulation of the firmware trigger-primitive generator.
//!
//! Raw per-channel ADC traces are pedestal-subtracted with an adaptive
//! ("frugal") median tracker and scanned by a threshold discriminator; each
//! excursion above threshold is summarised as one [`TriggerPrimitive`].
//! Typical usage of this crate may look like:
//! ```ignore
//! let hits: Vec<Hit> = timestamps.iter().copied()
//!     .zip(samples.iter().copied())
//!     .window(FrugalPedestal::new(initial_median, 0, 10)) // subtracts the running median
//!     .events(HitDetector::new(threshold))                // one Hit per excursion
//!     .collect();
//! ```
//! [`processing::generate`] runs this per-channel pipeline across a whole
//! waveform batch in parallel and merges the results into a single
//! collection sorted by `(time_start, channel)`.

pub mod error;
pub mod parameters;
pub mod primitive_generation;
pub mod processing;

pub use error::{ConfigurationError, DataShapeError};
pub use processing::{generate, BatchResult, Waveform, WaveformBatch};

pub use tpg_common::TriggerPrimitive;

/// Scalar type of the running-sum filter output.
pub type Real = f64;
