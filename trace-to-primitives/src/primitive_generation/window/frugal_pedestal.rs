use super::Window;
use tpg_common::{Intensity, Timestamp};

/// Frugal streaming median, as implemented in the firmware pedestal block.
///
/// The tracker keeps a median estimate and a saturating vote accumulator:
/// each sample above the median adds a vote, each sample below removes one,
/// and when the accumulator reaches `±step_limit` the median steps by one ADC
/// count and the accumulator resets. Integer arithmetic throughout, so the
/// output is reproducible bit-for-bit against the hardware.
///
/// As a [`Window`] stage the output is the pedestal-subtracted sample; the
/// running median itself is available through [`FrugalPedestal::median`].
#[derive(Debug, Clone)]
pub struct FrugalPedestal {
    median: Intensity,
    accumulator: i32,
    step_limit: i32,
    corrected: Intensity,
}

impl FrugalPedestal {
    pub fn new(initial_median: Intensity, initial_accumulator: i32, step_limit: i32) -> Self {
        Self {
            median: initial_median,
            accumulator: initial_accumulator,
            step_limit,
            corrected: 0,
        }
    }

    /// Advances the tracker by one sample and returns the updated median.
    pub fn update(&mut self, sample: Intensity) -> Intensity {
        if sample > self.median {
            self.accumulator += 1;
        } else if sample < self.median {
            self.accumulator -= 1;
        }

        if self.accumulator == self.step_limit {
            self.accumulator = 0;
            self.median += 1;
        } else if self.accumulator == -self.step_limit {
            self.accumulator = 0;
            self.median -= 1;
        }
        self.median
    }

    pub fn median(&self) -> Intensity {
        self.median
    }
}

/// Baseline series for `samples`: the median after each input sample.
pub fn estimate(
    samples: &[Intensity],
    initial_median: Intensity,
    initial_accumulator: i32,
    step_limit: i32,
) -> Vec<Intensity> {
    let mut tracker = FrugalPedestal::new(initial_median, initial_accumulator, step_limit);
    samples.iter().map(|&sample| tracker.update(sample)).collect()
}

impl Window for FrugalPedestal {
    type TimeType = Timestamp;
    type InputType = Intensity;
    type OutputType = Intensity;

    fn push(&mut self, value: Intensity) -> bool {
        let median = self.update(value);
        // The reference computes the subtraction in int16, which wraps.
        self.corrected = value.wrapping_sub(median);
        true
    }

    fn output(&self) -> Option<Intensity> {
        Some(self.corrected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive_generation::WindowFilter;
    use rand::Rng;

    #[test]
    fn constant_stream_stays_on_the_constant() {
        let samples = vec![132; 50];
        let baselines = estimate(&samples, 132, 0, 10);
        assert!(baselines.iter().all(|&b| b == 132));
    }

    #[test]
    fn constant_stream_converges_within_step_limit_of_the_delta() {
        // Initial estimate 5 counts below a constant stream of 20: the median
        // climbs one count per `step_limit` samples and then holds.
        let step_limit = 10;
        let samples = vec![20; 100];
        let baselines = estimate(&samples, 15, 0, step_limit);
        assert_eq!(baselines[9], 16);
        assert_eq!(baselines[49], 20);
        assert!(baselines[50..].iter().all(|&b| b == 20));
    }

    #[test]
    fn median_stays_within_the_observed_range_plus_drift() {
        let mut rng = rand::rng();
        let samples: Vec<Intensity> = (0..1000).map(|_| rng.random_range(900..1100)).collect();
        let baselines = estimate(&samples, 1000, 0, 10);
        // One step per `step_limit` samples bounds the excursion.
        assert!(baselines.iter().all(|&b| (800..1200).contains(&b)));
    }

    #[test]
    fn accumulator_unchanged_on_equal_sample() {
        let mut tracker = FrugalPedestal::new(100, 9, 10);
        // An equal sample casts no vote, so the pending accumulator holds.
        assert_eq!(tracker.update(100), 100);
        assert_eq!(tracker.update(101), 101);
    }

    #[test]
    fn window_stage_outputs_subtracted_samples() {
        let samples: Vec<Intensity> = vec![100, 100, 350, 100];
        let corrected: Vec<Intensity> = samples
            .iter()
            .copied()
            .enumerate()
            .map(|(i, v)| (i as Timestamp, v))
            .window(FrugalPedestal::new(100, 0, 10))
            .map(|(_, v)| v)
            .collect();
        assert_eq!(corrected, vec![0, 0, 250, 0]);
    }
}
