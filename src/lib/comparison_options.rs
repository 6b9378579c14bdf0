use crate::ani_error::AniError;
use crate::skani_preset::SkaniPreset;

pub const DEFAULT_THREADS: usize = 3;
pub const DEFAULT_MIN_AF: f64 = 15.0;
pub const DEFAULT_COMPRESSION: usize = 125;
pub const DEFAULT_MARKER_C: usize = 1000;
pub const DEFAULT_SCREEN: f64 = 80.0;

/// Arguments for a `skani triangle` run, as handed to the command builder.
/// A `None` field is left out of the command entirely, so skani falls back to its own default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleArgs {
    pub threads: Option<usize>,
    pub min_af: Option<f64>,
    pub compression: Option<usize>,
    pub marker_c: Option<usize>,
    pub screen: Option<f64>,

    pub ci: Option<bool>,
    pub detailed: Option<bool>,
    pub diagonal: Option<bool>,
    pub sparse: Option<bool>,
    pub full_matrix: Option<bool>,
    pub median: Option<bool>,
    pub no_learned_ani: Option<bool>,
    pub robust: Option<bool>,
    pub faster_small: Option<bool>,

    pub preset: Option<SkaniPreset>,
}

/// The full, caller-facing option set of a comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonOptions {
    /// Number of threads to use
    pub threads: usize,
    /// Minimum aligned fraction to report, 0 to 100
    pub min_af: f64,
    /// Compression factor (k-mer subsampling rate)
    pub compression: usize,
    /// Marker k-mer compression factor
    pub marker_c: usize,
    /// Screen out pairs with approximately less than this % identity
    pub screen: f64,
    /// Output confidence intervals
    pub ci: bool,
    /// Print additional info
    pub detailed: bool,
    /// Output self-self comparisons
    pub diagonal: bool,
    /// Output sparse matrix format
    pub sparse: bool,
    /// Output full matrix instead of lower-triangular
    pub full_matrix: bool,
    /// Estimate median identity instead of mean
    pub median: bool,
    /// Disable regression model for ANI prediction
    pub no_learned_ani: bool,
    /// Estimate mean after trimming off 10%/90% quantiles
    pub robust: bool,
    /// Filter small genomes more aggressively
    pub faster_small: bool,
    pub preset: Option<SkaniPreset>,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            min_af: DEFAULT_MIN_AF,
            compression: DEFAULT_COMPRESSION,
            marker_c: DEFAULT_MARKER_C,
            screen: DEFAULT_SCREEN,
            ci: false,
            detailed: false,
            diagonal: false,
            sparse: false,
            full_matrix: true,
            median: false,
            no_learned_ani: false,
            robust: false,
            faster_small: false,
            preset: None,
        }
    }
}

fn check_at_least_one(name: &'static str, value: usize) -> Result<(), AniError> {
    if value < 1 {
        Err(AniError::invalid_option(name, format!("must be >= 1, got {value}")))
    } else {
        Ok(())
    }
}

fn check_percentage(name: &'static str, value: f64) -> Result<(), AniError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(AniError::invalid_option(name, format!("must be between 0 and 100, got {value}")))
    }
}

impl ComparisonOptions {
    pub fn validate(&self) -> Result<(), AniError> {
        check_at_least_one("threads", self.threads)?;
        check_percentage("min_af", self.min_af)?;
        check_at_least_one("compression", self.compression)?;
        check_at_least_one("marker_c", self.marker_c)?;
        check_percentage("screen", self.screen)
    }

    pub fn to_triangle_args(&self) -> TriangleArgs {
        TriangleArgs {
            threads: Some(self.threads),
            min_af: Some(self.min_af),
            compression: Some(self.compression),
            marker_c: Some(self.marker_c),
            screen: Some(self.screen),
            ci: Some(self.ci),
            detailed: Some(self.detailed),
            diagonal: Some(self.diagonal),
            sparse: Some(self.sparse),
            full_matrix: Some(self.full_matrix),
            median: Some(self.median),
            no_learned_ani: Some(self.no_learned_ani),
            robust: Some(self.robust),
            faster_small: Some(self.faster_small),
            preset: self.preset,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ani_error::AniError;
    use crate::comparison_options::ComparisonOptions;
    use crate::skani_preset::SkaniPreset;

    #[test]
    fn test_defaults() {
        let options = ComparisonOptions::default();
        assert_eq!(options.threads, 3);
        assert_eq!(options.min_af, 15.0);
        assert_eq!(options.compression, 125);
        assert_eq!(options.marker_c, 1000);
        assert_eq!(options.screen, 80.0);
        assert!(options.full_matrix);
        assert!(!options.ci && !options.detailed && !options.diagonal && !options.sparse);
        assert!(!options.median && !options.no_learned_ani && !options.robust && !options.faster_small);
        assert_eq!(options.preset, None);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_ranges() {
        let bad = [
            ComparisonOptions { threads: 0, ..Default::default() },
            ComparisonOptions { min_af: 100.5, ..Default::default() },
            ComparisonOptions { compression: 0, ..Default::default() },
            ComparisonOptions { marker_c: 0, ..Default::default() },
            ComparisonOptions { screen: -1.0, ..Default::default() },
            ComparisonOptions { screen: f64::NAN, ..Default::default() },
        ];
        for options in bad {
            assert!(matches!(options.validate(), Err(AniError::InvalidOption { .. })));
        }

        let edges = ComparisonOptions { min_af: 100.0, screen: 0.0, threads: 1, ..Default::default() };
        assert!(edges.validate().is_ok());
    }

    #[test]
    fn test_triangle_args_are_complete() {
        let options = ComparisonOptions { robust: true, preset: Some(SkaniPreset::Slow), ..Default::default() };
        let args = options.to_triangle_args();
        assert_eq!(args.threads, Some(3));
        assert_eq!(args.min_af, Some(15.0));
        assert_eq!(args.full_matrix, Some(true));
        assert_eq!(args.robust, Some(true));
        assert_eq!(args.sparse, Some(false));
        assert_eq!(args.preset, Some(SkaniPreset::Slow));
    }
}
