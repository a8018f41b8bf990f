use log::warn;

use crate::graph::graphcontainer::GraphContainer;
use crate::math::interval::Interval;
use crate::math::remap::remap;

pub const NAN_WARNING: &str = "Graph output contains #NaN values.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapOutput {
    pub values: Vec<f64>,
    pub warnings: Vec<String>,
}

impl MapOutput {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Maps one batch of samples from `source` into `target`.
///
/// The container takes `source`/`target` as its domains. Without a container the samples
/// pass through, or are rescaled straight from `source` to `target` when `dynamic_refit`
/// is on. With `dynamic_refit` the graph outputs are stretched over `target` by their
/// observed range instead of [0, 1]; NaN outputs are left out of that range.
pub fn map_samples(
    container: Option<&mut GraphContainer>,
    samples: &[f64],
    source: Interval,
    target: Interval,
    dynamic_refit: bool,
) -> MapOutput {
    let values: Vec<f64> = match container {
        None if dynamic_refit => samples
            .iter()
            .map(|&sample| source.remap_to(sample, &target))
            .collect(),
        None => samples.to_vec(),
        Some(container) => {
            container.set_domains(source.t0(), source.t1(), target.t0(), target.t1());
            let raw: Vec<f64> = samples
                .iter()
                .map(|&sample| container.graph_value_at(container.normalize(sample)))
                .collect();
            match observed_range(&raw) {
                Some((min, max)) if dynamic_refit => raw
                    .iter()
                    .map(|&y| remap(y, min, max, target.t0(), target.t1()))
                    .collect(),
                _ => raw
                    .iter()
                    .map(|&y| container.denormalize(y))
                    .collect(),
            }
        }
    };

    let mut warnings = Vec::new();
    let nan_count = values.iter().filter(|v| v.is_nan()).count();
    if nan_count > 0 {
        warn!("{nan_count} of {} mapped values are NaN", values.len());
        warnings.push(NAN_WARNING.to_owned());
    }
    MapOutput { values, warnings }
}

// Finite min/max, or None when they coincide or nothing is finite.
fn observed_range(values: &[f64]) -> Option<(f64, f64)> {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if min < max { Some((min, max)) } else { None }
}
