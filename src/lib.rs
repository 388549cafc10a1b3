//! # sedparam: SED-fitting parameter-file authoring
//!
//! Builds and persists the structured parameter record that configures a
//! downstream spectral-energy-distribution fitting pipeline: documented
//! defaults, user overrides, shape and cross-field validation, redshift
//! grid derivation, unique grid-identifier assignment, and an
//! append-friendly structured text file.
//!
//! The entry point is [`ParamFileBuilder`]; see
//! [`crate::paramfile::writer`] for the full pipeline description.

pub mod constants;
pub mod paramfile;
pub mod record;
pub mod redshift;
pub mod sedparam_errors;

pub use paramfile::{ParamFileBuilder, WriteOutcome};
pub use record::{ReddeningCurve, SedFitParams};
pub use sedparam_errors::SedParamError;
