// Series density tiers
//
// One classification drives every density-dependent decision (label
// granularity, renderer tick hints) so the thresholds live in exactly one
// place. Computed once per series, after downsampling.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityTier {
    /// 50 points or fewer.
    Sparse,
    /// 51 to 100 points.
    Medium,
    /// More than 100 points.
    Dense,
}

impl DensityTier {
    pub fn of(point_count: usize) -> Self {
        if point_count > 100 {
            DensityTier::Dense
        } else if point_count > 50 {
            DensityTier::Medium
        } else {
            DensityTier::Sparse
        }
    }

    /// Suggested axis-tick stride for renderers.
    pub fn tick_interval(&self) -> usize {
        match self {
            DensityTier::Dense => 10,
            DensityTier::Medium => 5,
            DensityTier::Sparse => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DensityTier::Dense => "dense",
            DensityTier::Medium => "medium",
            DensityTier::Sparse => "sparse",
        }
    }
}
