use crate::{Channel, Plane};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("channel {0} not present in the channel map")]
pub struct ChannelMapError(pub Channel);

/// Read-only channel→plane lookup service.
///
/// Implementations are queried concurrently from per-channel workers, so any
/// internal cache must be populated before the parallel phase begins.
pub trait ChannelMap: Sync {
    fn plane_of(&self, channel: Channel) -> Result<Plane, ChannelMapError>;
}

/// Channel map backed by an in-memory table, for emulation and tests.
#[derive(Default, Debug, Clone)]
pub struct InMemoryChannelMap {
    planes: HashMap<Channel, Plane>,
}

impl InMemoryChannelMap {
    pub fn new(planes: HashMap<Channel, Plane>) -> Self {
        Self { planes }
    }

    /// Maps contiguous channel ranges to planes, e.g. one entry per APA plane.
    pub fn from_ranges(ranges: &[(std::ops::Range<Channel>, Plane)]) -> Self {
        let mut planes = HashMap::new();
        for (range, plane) in ranges {
            for channel in range.clone() {
                planes.insert(channel, *plane);
            }
        }
        Self { planes }
    }
}

impl ChannelMap for InMemoryChannelMap {
    fn plane_of(&self, channel: Channel) -> Result<Plane, ChannelMapError> {
        self.planes
            .get(&channel)
            .copied()
            .ok_or(ChannelMapError(channel))
    }
}

impl FromIterator<(Channel, Plane)> for InMemoryChannelMap {
    fn from_iter<I: IntoIterator<Item = (Channel, Plane)>>(iter: I) -> Self {
        Self {
            planes: iter.into_iter().collect(),
        }
    }
}
