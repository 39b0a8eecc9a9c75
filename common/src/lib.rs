pub mod channel_map;
pub mod primitive;

pub use channel_map::{ChannelMap, ChannelMapError, InMemoryChannelMap};
pub use primitive::TriggerPrimitive;

/// Offline channel number.
pub type Channel = u32;
/// Detector-plane identifier, resolved from a channel via the channel map.
pub type Plane = u8;
/// Raw or pedestal-subtracted ADC sample.
pub type Intensity = i16;
/// Hardware clock timestamp.
pub type Timestamp = u64;
