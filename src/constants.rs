//! # Constants and type definitions for sedparam
//!
//! This module centralizes the **documented default values** of every SED-fitting
//! parameter together with the common type aliases used throughout the crate.
//!
//! ## Overview
//!
//! - Cosmology defaults (Hubble constant, density parameters)
//! - Stellar population synthesis defaults (model set, IMF)
//! - Monte Carlo grid sizing defaults
//! - Star-formation-history and burst prior ranges
//! - Core type aliases used across the crate
//!
//! The literals below are the single source of truth for
//! [`SedFitParams::with_defaults`](crate::record::SedFitParams::with_defaults);
//! the writer never re-states them.

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Age or timescale in Gyr
pub type Gyr = f64;
/// Dimensionless redshift
pub type Redshift = f64;
/// Inclusive `[min, max]` prior range
pub type MinMax = [f64; 2];

// -------------------------------------------------------------------------------------------------
// Cosmology
// -------------------------------------------------------------------------------------------------

/// Hubble constant in units of 100 km/s/Mpc
pub const DEFAULT_H100: f64 = 0.7;

/// Matter density parameter Ω₀
pub const DEFAULT_OMEGA0: f64 = 0.3;

/// Dark-energy density parameter Ω_Λ
pub const DEFAULT_OMEGAL: f64 = 0.7;

// -------------------------------------------------------------------------------------------------
// Stellar population synthesis
// -------------------------------------------------------------------------------------------------

/// Default SPS model set identifier, resolved by the downstream pipeline
pub const DEFAULT_SPSMODELS: &str = "fsps_v2.4_miles";

/// Default initial mass function identifier (Chabrier)
pub const DEFAULT_IMF: &str = "chab";

// -------------------------------------------------------------------------------------------------
// Monte Carlo grid sizing
// -------------------------------------------------------------------------------------------------

/// Number of Monte Carlo model realizations per grid
pub const DEFAULT_NMODEL: u32 = 10_000;

/// Number of posterior draws retained per galaxy
pub const DEFAULT_NDRAW: u32 = 2_000;

/// Minimum number of photometric bands required to attempt a fit
pub const DEFAULT_NMINPHOT: u32 = 3;

/// Number of galaxies processed per chunk
pub const DEFAULT_GALCHUNKSIZE: u32 = 5_000;

// -------------------------------------------------------------------------------------------------
// Star-formation-history priors
// -------------------------------------------------------------------------------------------------

/// Age prior range in Gyr
pub const DEFAULT_AGE: MinMax = [0.1, 13.0];

/// SFH e-folding timescale τ prior range in Gyr
pub const DEFAULT_TAU: MinMax = [0.01, 1.0];

/// Stellar metallicity prior range (mass fraction)
pub const DEFAULT_ZMETAL: MinMax = [0.004, 0.04];

/// V-band attenuation prior range in magnitudes
pub const DEFAULT_AV: MinMax = [0.35, 2.0];

/// Charlot & Fall µ parameter prior range
pub const DEFAULT_MU: MinMax = [0.1, 4.0];

// -------------------------------------------------------------------------------------------------
// Burst priors
// -------------------------------------------------------------------------------------------------

/// Cumulative burst probability
pub const DEFAULT_PBURST: f64 = 0.0;

/// Time interval over which `pburst` applies
pub const DEFAULT_INTERVAL_PBURST: Gyr = 2.0;

/// Burst onset time prior range in Gyr; the writer replaces this with the
/// resolved `age` range when the caller does not supply one
pub const DEFAULT_TBURST: MinMax = [0.1, 13.0];

/// Burst mass fraction prior range
pub const DEFAULT_FBURST: MinMax = [0.03, 4.0];

/// Burst duration prior range in Gyr
pub const DEFAULT_DTBURST: MinMax = [0.03, 0.3];

/// Post-truncation τ prior range in Gyr; negative sentinel disables truncation
pub const DEFAULT_TRUNCTAU: MinMax = [-1.0, -1.0];

/// Fraction of bursts that truncate the smooth SFH
pub const DEFAULT_FRACTRUNC: f64 = 0.0;

/// Log₁₀ [OIII]/Hβ prior range for nebular emission
pub const DEFAULT_OIIIHB: MinMax = [-1.0, 1.0];

/// Burst shape selector (1 = Gaussian)
pub const DEFAULT_BURSTTYPE: i32 = 1;

// -------------------------------------------------------------------------------------------------
// Grid identifier and file naming
// -------------------------------------------------------------------------------------------------

/// Sentinel `sfhgrid` value of a record that has not been assigned an
/// identifier yet; the writer always replaces it before persisting
pub const UNASSIGNED_SFHGRID: i64 = -1;

/// Suffix appended to the prefix to form the parameter file name
pub const PARAMFILE_SUFFIX: &str = "_paramfile.par";
