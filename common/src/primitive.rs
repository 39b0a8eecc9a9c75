use crate::{Channel, Plane, Timestamp};

/// One trigger primitive, mirroring the hardware wire record.
///
/// The field set and widths match the firmware output record and are
/// compared field-for-field against reference data during validation, so
/// they must not be altered.
#[repr(C)]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerPrimitive {
    pub time_start: Timestamp,
    pub time_peak: Timestamp,
    pub time_over_threshold: u64,
    pub channel: Channel,
    pub adc_integral: u32,
    pub adc_peak: u16,
    /// Reserved by the hardware record; always zero in emulation.
    pub flag: u16,
    pub plane: Plane,
}

impl TriggerPrimitive {
    /// Sort key for the merged per-batch collection.
    pub fn sort_key(&self) -> (Timestamp, Channel) {
        (self.time_start, self.channel)
    }
}
