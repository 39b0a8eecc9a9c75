use tpg_common::Timestamp;

/// Summary of one excursion above threshold on a single channel.
///
/// Intermediate form of a trigger primitive, before channel and plane are
/// attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub time_start: Timestamp,
    /// Timestamp of the first occurrence of the maximum sample.
    pub time_peak: Timestamp,
    pub time_over_threshold: u64,
    pub adc_peak: u16,
    /// Sum of the samples recorded while at or above threshold.
    pub adc_integral: u32,
}
