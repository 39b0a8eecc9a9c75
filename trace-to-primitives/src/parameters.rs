use crate::{error::ConfigurationError, Real};
use anyhow::{anyhow, Error};
use clap::Parser;
use std::str::FromStr;
use tpg_common::Intensity;

/// How the initial pedestal estimate is formed from the leading window of a
/// channel's samples, before the frugal tracker takes over.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialPedestalPolicy {
    /// Statistical mode of the window (smallest value wins a tie).
    #[default]
    Mode,
    /// Mean of the window, truncated to the sample width.
    Mean,
}

impl FromStr for InitialPedestalPolicy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mode" => Ok(Self::Mode),
            "mean" => Ok(Self::Mean),
            _ => Err(ConfigurationError::UnrecognizedPedestalPolicy(s.into())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialPedestal {
    pub policy: InitialPedestalPolicy,
    /// Number of leading samples the estimate is computed over.
    pub window: usize,
}

impl Default for InitialPedestal {
    fn default() -> Self {
        Self {
            policy: InitialPedestalPolicy::default(),
            window: 100,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct InitialPedestalWrapper(pub(crate) InitialPedestal);

impl FromStr for InitialPedestalWrapper {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vals: Vec<_> = s.split(',').collect();
        if vals.len() == 2 {
            Ok(InitialPedestalWrapper(InitialPedestal {
                policy: InitialPedestalPolicy::from_str(vals[0])?,
                window: usize::from_str(vals[1])?,
            }))
        } else {
            Err(anyhow!(
                "Incorrect number of parameters in initial pedestal, expected pattern '*,*', got '{s}'"
            ))
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub struct PedestalParameters {
    /// Initial estimate, as 'policy,window' (e.g. 'mode,100').
    #[clap(long, default_value = "mode,100")]
    pub initial: InitialPedestalWrapper,

    /// Accumulator excursion at which the frugal median steps by one ADC count.
    /// Smaller values track faster but are noisier.
    #[clap(long, default_value = "10")]
    pub step_limit: i32,
}

impl Default for PedestalParameters {
    fn default() -> Self {
        Self {
            initial: InitialPedestalWrapper::default(),
            step_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Parser)]
pub struct FilterParameters {
    /// Leaky-integrator coefficient, in (0, 1].
    #[clap(long, default_value = "0.98")]
    pub decay: Real,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self { decay: 0.98 }
    }
}

impl FilterParameters {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.decay > 0.0 && self.decay <= 1.0 {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidDecay(self.decay))
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub struct GeneratorParameters {
    /// Discriminator threshold applied to the pedestal-subtracted samples.
    #[clap(long, default_value = "100")]
    pub threshold: Intensity,

    #[clap(flatten)]
    pub pedestal: PedestalParameters,
}

impl Default for GeneratorParameters {
    fn default() -> Self {
        Self {
            threshold: 100,
            pedestal: PedestalParameters::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_from_str() {
        assert_eq!(
            InitialPedestalPolicy::from_str("mode"),
            Ok(InitialPedestalPolicy::Mode)
        );
        assert_eq!(
            InitialPedestalPolicy::from_str("mean"),
            Ok(InitialPedestalPolicy::Mean)
        );
    }

    #[test]
    fn unrecognised_policy_is_a_configuration_error() {
        assert_eq!(
            InitialPedestalPolicy::from_str("median"),
            Err(ConfigurationError::UnrecognizedPedestalPolicy(
                "median".into()
            ))
        );
    }

    #[test]
    fn initial_pedestal_from_str() {
        let InitialPedestalWrapper(initial) =
            InitialPedestalWrapper::from_str("mean,64").unwrap();
        assert_eq!(initial.policy, InitialPedestalPolicy::Mean);
        assert_eq!(initial.window, 64);

        assert!(InitialPedestalWrapper::from_str("mean").is_err());
        assert!(InitialPedestalWrapper::from_str("mean,64,10").is_err());
    }

    #[test]
    fn decay_bounds() {
        assert!(FilterParameters { decay: 0.98 }.validate().is_ok());
        assert!(FilterParameters { decay: 1.0 }.validate().is_ok());
        assert_eq!(
            FilterParameters { decay: 0.0 }.validate(),
            Err(ConfigurationError::InvalidDecay(0.0))
        );
        assert_eq!(
            FilterParameters { decay: 1.5 }.validate(),
            Err(ConfigurationError::InvalidDecay(1.5))
        );
    }
}
