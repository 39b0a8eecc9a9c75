use crate::{
    error::{ConfigurationError, DataShapeError},
    parameters::{FilterParameters, GeneratorParameters, InitialPedestal, InitialPedestalPolicy, PedestalParameters},
    primitive_generation::{
        window::{frugal_pedestal, running_sum},
        EventFilter, FrugalPedestal, HitDetector, WindowFilter,
    },
    Real,
};
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tpg_common::{Channel, ChannelMap, ChannelMapError, Intensity, Plane, Timestamp, TriggerPrimitive};
use tracing::{debug, info, warn};

/// One channel's share of a batch: equal-length timestamp and sample runs.
#[derive(Default, Debug, Clone)]
pub struct Waveform {
    pub timestamps: Vec<Timestamp>,
    pub samples: Vec<Intensity>,
}

impl Waveform {
    pub fn new(timestamps: Vec<Timestamp>, samples: Vec<Intensity>) -> Self {
        Self {
            timestamps,
            samples,
        }
    }
}

/// All channels of one trigger record, keyed by offline channel number.
pub type WaveformBatch = BTreeMap<Channel, Waveform>;

/// Output of [`generate`] for one batch.
#[derive(Default, Debug)]
pub struct BatchResult {
    /// Merged primitives, sorted by `(time_start, channel)`.
    pub primitives: Vec<TriggerPrimitive>,
    /// Channels skipped because of shape faults, with the fault.
    pub failures: Vec<DataShapeError>,
}

fn initial_pedestal(samples: &[Intensity], initial: &InitialPedestal) -> Intensity {
    let window = &samples[..initial.window.min(samples.len())];
    match initial.policy {
        InitialPedestalPolicy::Mode => window
            .iter()
            .counts()
            .into_iter()
            .max_by_key(|&(value, count)| (count, std::cmp::Reverse(value)))
            .map(|(&value, _)| value)
            .unwrap_or_default(),
        InitialPedestalPolicy::Mean => {
            if window.is_empty() {
                0
            } else {
                let sum: i64 = window.iter().map(|&x| i64::from(x)).sum();
                (sum / window.len() as i64) as Intensity
            }
        }
    }
}

fn find_channel_primitives(
    channel: Channel,
    plane: Plane,
    waveform: &Waveform,
    parameters: &GeneratorParameters,
) -> Result<Vec<TriggerPrimitive>, DataShapeError> {
    if waveform.timestamps.len() != waveform.samples.len() {
        return Err(DataShapeError {
            channel,
            timestamps: waveform.timestamps.len(),
            samples: waveform.samples.len(),
        });
    }

    let initial = initial_pedestal(&waveform.samples, &parameters.pedestal.initial.0);
    debug!("channel {channel}: initial pedestal {initial}");

    let primitives = waveform
        .timestamps
        .iter()
        .copied()
        .zip(waveform.samples.iter().copied())
        .window(FrugalPedestal::new(initial, 0, parameters.pedestal.step_limit))
        .events(HitDetector::new(parameters.threshold))
        .map(|hit| TriggerPrimitive {
            time_start: hit.time_start,
            time_peak: hit.time_peak,
            time_over_threshold: hit.time_over_threshold,
            channel,
            adc_integral: hit.adc_integral,
            adc_peak: hit.adc_peak,
            flag: 0,
            plane,
        })
        .collect();
    Ok(primitives)
}

/// Runs the full per-channel pipeline over a batch and merges the results.
///
/// Channels are processed independently on the rayon pool; shape faults are
/// collected per channel without disturbing their siblings, while an
/// unmapped channel aborts the whole batch. Planes are resolved before the
/// parallel phase so workers only read the frozen assignments.
pub fn generate(
    batch: &WaveformBatch,
    parameters: &GeneratorParameters,
    channel_map: &impl ChannelMap,
) -> Result<BatchResult, ConfigurationError> {
    let channels = batch
        .iter()
        .map(|(&channel, waveform)| Ok((channel, channel_map.plane_of(channel)?, waveform)))
        .collect::<Result<Vec<_>, ChannelMapError>>()?;

    let outcomes: Vec<Result<Vec<TriggerPrimitive>, DataShapeError>> = channels
        .par_iter()
        .map(|&(channel, plane, waveform)| {
            find_channel_primitives(channel, plane, waveform, parameters)
        })
        .collect();

    let mut result = BatchResult::default();
    for outcome in outcomes {
        match outcome {
            Ok(mut primitives) => result.primitives.append(&mut primitives),
            Err(fault) => {
                warn!("skipping channel: {fault}");
                result.failures.push(fault);
            }
        }
    }
    result.primitives.sort_by_key(|primitive| primitive.sort_key());

    info!(
        "generated {} primitives over {} channels ({} skipped)",
        result.primitives.len(),
        channels.len(),
        result.failures.len()
    );
    Ok(result)
}

/// Per-channel baseline series, for visualisation next to the raw traces.
pub fn pedestal_series(
    batch: &WaveformBatch,
    parameters: &PedestalParameters,
) -> BTreeMap<Channel, Vec<Intensity>> {
    batch
        .iter()
        .map(|(&channel, waveform)| {
            let initial = initial_pedestal(&waveform.samples, &parameters.initial.0);
            (
                channel,
                frugal_pedestal::estimate(&waveform.samples, initial, 0, parameters.step_limit),
            )
        })
        .collect()
}

/// Per-channel running-sum series, usually over pedestal-subtracted samples.
pub fn running_sum_series(
    batch: &WaveformBatch,
    parameters: &FilterParameters,
) -> Result<BTreeMap<Channel, Vec<Real>>, ConfigurationError> {
    parameters.validate()?;
    Ok(batch
        .iter()
        .map(|(&channel, waveform)| {
            (
                channel,
                running_sum::filter(&waveform.samples, parameters.decay),
            )
        })
        .collect())
}
