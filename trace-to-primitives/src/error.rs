use crate::Real;
use thiserror::Error;
use tpg_common::{Channel, ChannelMapError};

/// Fatal configuration faults. Any of these aborts the whole batch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("initial pedestal policy '{0}' not recognised")]
    UnrecognizedPedestalPolicy(String),

    #[error("running-sum decay {0} outside the interval (0, 1]")]
    InvalidDecay(Real),

    #[error(transparent)]
    UnmappedChannel(#[from] ChannelMapError),
}

/// A channel whose timestamp and sample sequences disagree in length.
///
/// Shape faults are per-channel: the offending channel is skipped and
/// reported while its siblings are still processed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("channel {channel}: {timestamps} timestamps but {samples} samples")]
pub struct DataShapeError {
    pub channel: Channel,
    pub timestamps: usize,
    pub samples: usize,
}
