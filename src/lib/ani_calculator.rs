use std::path::Path;
use crate::ani_error::AniError;
use crate::distance_matrix::DistanceMatrix;

pub trait AniCalculator {
    /*
    The all-vs-all result as a labeled distance matrix.
    Distances are assumed to be 100 - ANI, values between 0.0 and 100.0, NaN when missing.
     */
    fn distance_matrix(&self) -> Result<DistanceMatrix, AniError>;

    fn results_path(&self) -> &Path;
}
