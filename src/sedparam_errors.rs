use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by parameter-record validation and parameter-file I/O.
///
/// Every variant is fatal for the operation that raised it; validation runs
/// to completion before any file is touched, so no partial write ever
/// reaches disk.
#[derive(Error, Debug)]
pub enum SedParamError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Field '{field}' must have exactly 2 elements, got {len}")]
    InvalidRangeField { field: &'static str, len: usize },

    #[error("Redshift bounds out of order: zmin {zmin} > zmax {zmax}")]
    InvalidRedshiftBounds { zmin: f64, zmax: f64 },

    #[error("Redshift grid size must be positive, got {0}")]
    InvalidRedshiftCount(usize),

    #[error("Logarithmic redshift grid requires zmin > 0, got {0}")]
    NonPositiveLogBound(f64),

    #[error("User-supplied redshift array must be strictly increasing")]
    NonMonotonicRedshift,

    #[error("Field '{field}' value '{value}' must not contain whitespace, commas, or braces")]
    InvalidStringField { field: &'static str, value: String },

    #[error("Unsupported reddening curve: {0}")]
    UnknownReddeningCurve(String),

    #[error("DELAYED and ONEOVERTAU cannot both be set")]
    IncompatibleBurstFlags,

    #[error("ONEOVERTAU requires a strictly positive tau minimum, got {0}")]
    NonPositiveTau(f64),

    #[error("SFHGRID numbers must be unique; {0} appears more than once")]
    DuplicateSfhGrid(i64),

    #[error("Append requested but parameter file not found at: {0}")]
    AppendTargetMissing(Utf8PathBuf),

    #[error("Malformed parameter table: {0}")]
    MalformedTable(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for SedParamError {
    fn eq(&self, other: &Self) -> bool {
        use SedParamError::*;
        match (self, other) {
            (MissingRequiredField(a), MissingRequiredField(b)) => a == b,
            (
                InvalidRangeField { field: fa, len: la },
                InvalidRangeField { field: fb, len: lb },
            ) => fa == fb && la == lb,
            (
                InvalidRedshiftBounds { zmin: a0, zmax: a1 },
                InvalidRedshiftBounds { zmin: b0, zmax: b1 },
            ) => a0 == b0 && a1 == b1,
            (InvalidRedshiftCount(a), InvalidRedshiftCount(b)) => a == b,
            (NonPositiveLogBound(a), NonPositiveLogBound(b)) => a == b,
            (
                InvalidStringField { field: fa, value: va },
                InvalidStringField { field: fb, value: vb },
            ) => fa == fb && va == vb,
            (UnknownReddeningCurve(a), UnknownReddeningCurve(b)) => a == b,
            (NonPositiveTau(a), NonPositiveTau(b)) => a == b,
            (DuplicateSfhGrid(a), DuplicateSfhGrid(b)) => a == b,
            (AppendTargetMissing(a), AppendTargetMissing(b)) => a == b,
            (MalformedTable(a), MalformedTable(b)) => a == b,

            // Not comparable by payload: equal if same variant
            (IoError(_), IoError(_)) => true,

            // Unit variants
            (NonMonotonicRedshift, NonMonotonicRedshift) => true,
            (IncompatibleBurstFlags, IncompatibleBurstFlags) => true,

            _ => false,
        }
    }
}
