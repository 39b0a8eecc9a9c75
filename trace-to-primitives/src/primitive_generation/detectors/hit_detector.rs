use super::Detector;
use crate::primitive_generation::hit::Hit;
use tpg_common::{Intensity, Timestamp};

#[derive(Debug, Clone, Copy)]
struct Candidate {
    time_start: Timestamp,
    time_peak: Timestamp,
    adc_peak: Intensity,
    adc_integral: u32,
}

impl Candidate {
    fn open(time: Timestamp, value: Intensity) -> Self {
        Self {
            time_start: time,
            time_peak: time,
            adc_peak: value,
            adc_integral: value as u32,
        }
    }

    fn finalise(self, time: Timestamp) -> Hit {
        Hit {
            time_start: self.time_start,
            time_peak: self.time_peak,
            time_over_threshold: time - self.time_start,
            adc_peak: self.adc_peak as u16,
            adc_integral: self.adc_integral,
        }
    }
}

/// Threshold discriminator reproducing the firmware hit finder.
///
/// A sample at or above threshold opens a candidate hit; further such samples
/// extend it, with a strictly greater sample moving the peak (so the first
/// occurrence of the maximum wins). The first sample back below threshold
/// finalises the candidate and emits it. The threshold is taken as given; it
/// is expected to be non-negative, applied to pedestal-subtracted samples.
#[derive(Debug, Clone)]
pub struct HitDetector {
    threshold: Intensity,
    candidate: Option<Candidate>,
}

impl HitDetector {
    pub fn new(threshold: Intensity) -> Self {
        Self {
            threshold,
            candidate: None,
        }
    }
}

impl Detector for HitDetector {
    type TimeType = Timestamp;
    type ValueType = Intensity;
    type EventType = Hit;

    fn signal(&mut self, time: Timestamp, value: Intensity) -> Option<Hit> {
        if value >= self.threshold {
            match self.candidate.as_mut() {
                Some(candidate) => {
                    candidate.adc_integral += value as u32;
                    if value > candidate.adc_peak {
                        candidate.adc_peak = value;
                        candidate.time_peak = time;
                    }
                }
                None => self.candidate = Some(Candidate::open(time, value)),
            }
            None
        } else {
            self.candidate
                .take()
                .map(|candidate| candidate.finalise(time))
        }
    }

    /// A candidate still open when the trace ends is discarded, matching the
    /// firmware behaviour at frame boundaries.
    fn finish(&mut self) -> Option<Hit> {
        self.candidate = None;
        None
    }
}
