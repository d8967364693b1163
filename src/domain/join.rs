// Multi-series alignment into composite records
use std::collections::{BTreeMap, HashMap};

use super::telemetry::{Fault, ParameterSeries, Sample};
use super::timestamp::Timestamp;

/// A row combining aligned values from several parameter series at one
/// instant. Ephemeral: rebuilt on every filter/downsample pass, never
/// mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeRecord {
    pub timestamp: Option<Timestamp>,
    pub time_label: String,
    pub values: BTreeMap<&'static str, f64>,
    pub fault: Option<Fault>,
}

impl CompositeRecord {
    fn from_primary(sample: &Sample) -> Self {
        Self {
            timestamp: sample.timestamp,
            time_label: sample.time_label.clone(),
            values: BTreeMap::new(),
            fault: sample.fault.clone(),
        }
    }
}

/// Pair series position-by-position, truncating to the shortest.
///
/// Only sound when the series are co-sampled; prefer [`aligned_join`],
/// which verifies that before falling back to this. The first series is
/// primary: it supplies time labels, and fault markers are taken from the
/// first series carrying one at each index.
pub fn index_join(series: &[&ParameterSeries]) -> Vec<CompositeRecord> {
    let Some(primary) = series.first() else {
        return Vec::new();
    };
    let len = series.iter().map(|s| s.len()).min().unwrap_or(0);

    (0..len)
        .map(|i| {
            let mut record = CompositeRecord::from_primary(&primary.samples[i]);
            for s in series {
                record.values.insert(s.parameter.key(), s.samples[i].value);
            }
            if record.fault.is_none() {
                record.fault = series.iter().find_map(|s| s.samples[i].fault.clone());
            }
            record
        })
        .collect()
}

/// Pair each primary sample with the secondary value at the exact same
/// instant, substituting `default` on a miss.
///
/// No tolerance window: an off-by-one-second mismatch default-fills rather
/// than near-matching. Output order equals primary order, one pair per
/// primary sample. A primary sample with an unparsable timestamp cannot
/// match anything and also default-fills. When second-truncation collapses
/// several secondary samples onto one instant, the first one wins.
pub fn timestamp_join(
    primary: &ParameterSeries,
    secondary: &ParameterSeries,
    default: f64,
) -> Vec<(Sample, f64)> {
    let mut by_timestamp: HashMap<Timestamp, f64> = HashMap::new();
    for s in &secondary.samples {
        if let Some(t) = s.timestamp {
            by_timestamp.entry(t).or_insert(s.value);
        }
    }

    primary
        .samples
        .iter()
        .map(|sample| {
            let value = sample
                .timestamp
                .and_then(|t| by_timestamp.get(&t))
                .copied()
                .unwrap_or(default);
            (sample.clone(), value)
        })
        .collect()
}

/// Join several series for a composite chart.
///
/// When every series carries the identical timestamp at every index (up to
/// the shortest length) the cheap positional pairing applies. Otherwise
/// each secondary is matched by nearest timestamp within `tolerance_secs`
/// (defaulting to the primary's median sampling interval, floor one
/// second); a secondary with no sample in range is omitted from that
/// record's value map rather than invented.
pub fn aligned_join(series: &[&ParameterSeries], tolerance_secs: Option<i64>) -> Vec<CompositeRecord> {
    let Some((primary, rest)) = series.split_first() else {
        return Vec::new();
    };

    if co_sampled(series) {
        return index_join(series);
    }

    let tolerance = tolerance_secs.unwrap_or_else(|| sampling_interval(primary));
    let keyed: Vec<(&ParameterSeries, Vec<(Timestamp, f64)>)> = rest
        .iter()
        .map(|s| {
            let pairs = s
                .samples
                .iter()
                .filter_map(|sample| sample.timestamp.map(|t| (t, sample.value)))
                .collect();
            (*s, pairs)
        })
        .collect();

    primary
        .samples
        .iter()
        .map(|sample| {
            let mut record = CompositeRecord::from_primary(sample);
            record.values.insert(primary.parameter.key(), sample.value);
            if let Some(target) = sample.timestamp {
                for (s, pairs) in &keyed {
                    if let Some(value) = nearest_within(pairs, target, tolerance) {
                        record.values.insert(s.parameter.key(), value);
                    }
                }
            }
            record
        })
        .collect()
}

/// True when the series are provably sampled at the same instants, index
/// for index, up to the shortest length.
fn co_sampled(series: &[&ParameterSeries]) -> bool {
    let Some((primary, rest)) = series.split_first() else {
        return true;
    };
    let len = series.iter().map(|s| s.len()).min().unwrap_or(0);

    (0..len).all(|i| {
        let t = primary.samples[i].timestamp;
        t.is_some() && rest.iter().all(|s| s.samples[i].timestamp == t)
    })
}

/// Median gap in seconds between consecutive primary samples, floor 1.
fn sampling_interval(series: &ParameterSeries) -> i64 {
    let mut gaps: Vec<i64> = series
        .samples
        .windows(2)
        .filter_map(|pair| match (pair[0].timestamp, pair[1].timestamp) {
            (Some(a), Some(b)) => Some(b.seconds_since(&a)),
            _ => None,
        })
        .collect();

    if gaps.is_empty() {
        return 1;
    }
    gaps.sort_unstable();
    gaps[gaps.len() / 2].max(1)
}

/// Binary-search the sorted `(timestamp, value)` pairs for the sample
/// closest to `target`, accepting it only within `tolerance` seconds.
fn nearest_within(pairs: &[(Timestamp, f64)], target: Timestamp, tolerance: i64) -> Option<f64> {
    if pairs.is_empty() {
        return None;
    }

    let split = pairs.partition_point(|(t, _)| *t < target);
    let mut best: Option<(i64, f64)> = None;
    for idx in [split.checked_sub(1), Some(split)].into_iter().flatten() {
        if let Some((t, value)) = pairs.get(idx) {
            let gap = t.seconds_since(&target).abs();
            if gap <= tolerance && best.is_none_or(|(best_gap, _)| gap < best_gap) {
                best = Some((gap, *value));
            }
        }
    }

    best.map(|(_, value)| value)
}
