use super::Window;
use crate::Real;
use tpg_common::{Intensity, Timestamp};

/// Single-pole leaky integrator: `s = decay * s + x`, starting from zero.
///
/// A `decay` close to one gives long memory and heavy smoothing at the cost
/// of slow recovery. Bounds on `decay` are enforced at configuration time
/// ([`crate::parameters::FilterParameters::validate`]); the filter itself is
/// a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct RunningSum {
    decay: Real,
    sum: Real,
}

impl RunningSum {
    pub fn new(decay: Real) -> Self {
        Self { decay, sum: 0.0 }
    }

    pub fn update(&mut self, sample: Intensity) -> Real {
        self.sum = self.decay * self.sum + Real::from(sample);
        self.sum
    }
}

/// Filtered series for `samples`, one value per input sample.
pub fn filter(samples: &[Intensity], decay: Real) -> Vec<Real> {
    let mut filter = RunningSum::new(decay);
    samples.iter().map(|&sample| filter.update(sample)).collect()
}

impl Window for RunningSum {
    type TimeType = Timestamp;
    type InputType = Intensity;
    type OutputType = Real;

    fn push(&mut self, value: Intensity) -> bool {
        self.update(value);
        true
    }

    fn output(&self) -> Option<Real> {
        Some(self.sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn unit_decay_is_the_prefix_sum() {
        let samples: Vec<Intensity> = vec![3, -1, 4, 1, -5, 9];
        let output = filter(&samples, 1.0);
        assert_eq!(output, vec![3.0, 2.0, 6.0, 7.0, 2.0, 11.0]);
    }

    #[test]
    fn zero_decay_is_the_identity() {
        let samples: Vec<Intensity> = vec![3, -1, 4, 1, -5, 9];
        let output = filter(&samples, 0.0);
        assert_eq!(output, vec![3.0, -1.0, 4.0, 1.0, -5.0, 9.0]);
    }

    #[test]
    fn leaky_accumulation() {
        let samples: Vec<Intensity> = vec![100, 0, 0];
        let output = filter(&samples, 0.5);
        assert_approx_eq!(output[0], 100.0);
        assert_approx_eq!(output[1], 50.0);
        assert_approx_eq!(output[2], 25.0);
    }
}
