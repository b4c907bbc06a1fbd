//! Recommendation samples and their ranking.

/// One in-range cost combination and the latency measured for it.
///
/// Produced by the search engine only when the measurement landed inside the
/// tolerance window; immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    /// Memory cost in bytes, always a multiple of 8192.
    pub memory_cost: u64,
    /// Time cost (iteration count).
    pub time_cost: u32,
    /// Latency measured for this combination, in milliseconds.
    pub measured_ms: u64,
}

/// Orders recommendations by measured latency, largest first.
///
/// Among latency-equivalent candidates the most expensive parameters are the
/// most conservative choice, so the candidates nearest the upper edge of the
/// tolerance window surface first. Ties are left in no particular order, and
/// duplicate cost combinations are kept.
pub(crate) fn rank(recommendations: &mut [Recommendation]) {
    recommendations.sort_unstable_by(|a, b| b.measured_ms.cmp(&a.measured_ms));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_orders_by_latency_descending() {
        let mut samples = vec![
            Recommendation {
                memory_cost: 16 << 20,
                time_cost: 2,
                measured_ms: 480,
            },
            Recommendation {
                memory_cost: 64 << 20,
                time_cost: 3,
                measured_ms: 520,
            },
            Recommendation {
                memory_cost: 32 << 20,
                time_cost: 2,
                measured_ms: 505,
            },
        ];
        rank(&mut samples);
        let measured: Vec<u64> = samples.iter().map(|s| s.measured_ms).collect();
        assert_eq!(measured, vec![520, 505, 480]);
    }
}
