use thiserror::Error;

/// Validation errors reported by index construction and query setup.
///
/// Every variant is caller-recoverable: no partial work is performed before
/// the error is returned.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    /// The voxel cell size passed to the simplifier was not strictly positive.
    #[error("voxel size must be positive, got {0}")]
    InvalidVoxelSize(f64),
    /// The search radius passed to a range query was negative.
    #[error("search radius must be non-negative, got {0}")]
    InvalidRadius(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
