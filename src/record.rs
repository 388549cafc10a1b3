//! # SED-fitting parameter record
//!
//! This module defines the flat parameter record handed to the downstream
//! SED-fitting pipeline, together with the closed set of supported dust
//! reddening curves.
//!
//! ## Overview
//! -----------------
//! - [`ReddeningCurve`] — the five recognized dust attenuation laws, with
//!   case-insensitive parsing and lowercase rendering.
//! - [`SedFitParams`] — one row of the parameter file: cosmology, SPS
//!   choices, Monte Carlo sizing, SFH/burst/nebular priors, the resolved
//!   redshift grid, and the filter list.
//! - [`SedFitParams::with_defaults`] — pure default population from the
//!   three mandatory inputs; no validation, no side effects.
//!
//! Validation (range shapes, flag compatibility, identifier uniqueness)
//! lives in the writer, not here.
//!
//! ## See also
//! ------------
//! * [`crate::constants`] – The default literals used by `with_defaults`.
//! * [`ParamFileBuilder`](crate::paramfile::ParamFileBuilder) – Override
//!   overlay and persistence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    Gyr, MinMax, Redshift, DEFAULT_AGE, DEFAULT_AV, DEFAULT_BURSTTYPE, DEFAULT_DTBURST,
    DEFAULT_FBURST, DEFAULT_FRACTRUNC, DEFAULT_GALCHUNKSIZE, DEFAULT_H100, DEFAULT_IMF,
    DEFAULT_INTERVAL_PBURST, DEFAULT_MU, DEFAULT_NDRAW, DEFAULT_NMINPHOT, DEFAULT_NMODEL,
    DEFAULT_OIIIHB, DEFAULT_OMEGA0, DEFAULT_OMEGAL, DEFAULT_PBURST, DEFAULT_SPSMODELS,
    DEFAULT_TAU, DEFAULT_TBURST, DEFAULT_TRUNCTAU, DEFAULT_ZMETAL, UNASSIGNED_SFHGRID,
};
use crate::sedparam_errors::SedParamError;

/// Dust reddening/attenuation curve applied to the model spectra.
///
/// Parsed case-insensitively with surrounding whitespace trimmed; rendered
/// lowercase in the parameter file. Any other name is rejected with
/// [`SedParamError::UnknownReddeningCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReddeningCurve {
    /// No dust attenuation
    None,
    /// Calzetti et al. (2000) starburst law
    Calzetti,
    /// Charlot & Fall (2000) two-component model
    Charlot,
    /// O'Donnell (1994) Milky Way curve
    Odonnell,
    /// Small Magellanic Cloud bar extinction
    Smc,
}

impl fmt::Display for ReddeningCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReddeningCurve::None => "none",
            ReddeningCurve::Calzetti => "calzetti",
            ReddeningCurve::Charlot => "charlot",
            ReddeningCurve::Odonnell => "odonnell",
            ReddeningCurve::Smc => "smc",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ReddeningCurve {
    type Err = SedParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(ReddeningCurve::None),
            "calzetti" => Ok(ReddeningCurve::Calzetti),
            "charlot" => Ok(ReddeningCurve::Charlot),
            "odonnell" => Ok(ReddeningCurve::Odonnell),
            "smc" => Ok(ReddeningCurve::Smc),
            other => Err(SedParamError::UnknownReddeningCurve(other.to_string())),
        }
    }
}

/// One fully populated SED-fitting parameter record.
///
/// Field order matches the column order of the persisted `ISEDFITPARAMS`
/// table. Booleans serialize as `0`/`1`; `[min, max]` priors and the
/// redshift grid serialize as brace-delimited arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SedFitParams {
    /// Project prefix; also names the parameter file on disk
    pub prefix: String,
    /// Hubble constant in units of 100 km/s/Mpc
    pub h100: f64,
    /// Matter density parameter Ω₀
    pub omega0: f64,
    /// Dark-energy density parameter Ω_Λ
    pub omegal: f64,
    /// SPS model set identifier, resolved by the downstream pipeline
    pub spsmodels: String,
    /// Initial mass function identifier
    pub imf: String,
    /// Dust reddening curve
    pub redcurve: ReddeningCurve,
    /// Apply IGM attenuation
    pub igm: bool,
    /// Unique star-formation-history grid number within one file
    pub sfhgrid: i64,
    /// Number of Monte Carlo model realizations
    pub nmodel: u32,
    /// Number of posterior draws retained per galaxy
    pub ndraw: u32,
    /// Minimum number of photometric bands required to fit
    pub nminphot: u32,
    /// Number of galaxies processed per chunk
    pub galchunksize: u32,
    /// Age prior range in Gyr
    pub age: MinMax,
    /// SFH e-folding timescale τ prior range in Gyr
    pub tau: MinMax,
    /// Stellar metallicity prior range
    pub zmetal: MinMax,
    /// V-band attenuation prior range in magnitudes
    pub av: MinMax,
    /// Charlot & Fall µ prior range
    pub mu: MinMax,
    /// Cumulative burst probability
    pub pburst: f64,
    /// Time interval over which `pburst` applies
    pub interval_pburst: Gyr,
    /// Burst onset time prior range in Gyr; defaults to the resolved `age`
    pub tburst: MinMax,
    /// Burst mass fraction prior range
    pub fburst: MinMax,
    /// Burst duration prior range in Gyr
    pub dtburst: MinMax,
    /// Post-truncation τ prior range in Gyr
    pub trunctau: MinMax,
    /// Fraction of bursts that truncate the smooth SFH
    pub fractrunc: f64,
    /// Log₁₀ [OIII]/Hβ prior range
    pub oiiihb: MinMax,
    /// Include nebular emission lines
    pub nebular: bool,
    /// Draw 1/τ uniformly instead of τ
    pub oneovertau: bool,
    /// Use a delayed SFH, SFR ∝ t·exp(-t/τ)
    pub delayed: bool,
    /// Draw A_V from a flat prior
    pub flatav: bool,
    /// Draw µ from a flat prior
    pub flatmu: bool,
    /// Draw f_burst from a flat prior
    pub flatfburst: bool,
    /// Draw dt_burst from a flat prior
    pub flatdtburst: bool,
    /// Burst shape selector (1 = Gaussian)
    pub bursttype: i32,
    /// Redshift grid was supplied verbatim by the caller
    pub use_redshift: bool,
    /// Redshift grid was derived with logarithmic spacing
    pub zlog: bool,
    /// Ordered redshift grid
    pub redshift: Vec<Redshift>,
    /// Bandpass/filter file names, stored by name only
    pub filterlist: Vec<String>,
}

impl SedFitParams {
    /// Build a record carrying every documented default, given only the
    /// mandatory fields.
    ///
    /// `sfhgrid` starts at the unassigned sentinel and `use_redshift`/`zlog`
    /// start false; the writer sets all three from its own inputs. No
    /// validation is performed here.
    ///
    /// Arguments
    /// -----------------
    /// * `prefix` – Project prefix naming the parameter file.
    /// * `filterlist` – Bandpass file names.
    /// * `redshift` – Already-resolved redshift grid.
    ///
    /// Return
    /// ----------
    /// * A fully populated [`SedFitParams`].
    pub fn with_defaults(prefix: &str, filterlist: &[String], redshift: Vec<Redshift>) -> Self {
        SedFitParams {
            prefix: prefix.to_string(),
            h100: DEFAULT_H100,
            omega0: DEFAULT_OMEGA0,
            omegal: DEFAULT_OMEGAL,
            spsmodels: DEFAULT_SPSMODELS.to_string(),
            imf: DEFAULT_IMF.to_string(),
            redcurve: ReddeningCurve::Calzetti,
            igm: true,
            sfhgrid: UNASSIGNED_SFHGRID,
            nmodel: DEFAULT_NMODEL,
            ndraw: DEFAULT_NDRAW,
            nminphot: DEFAULT_NMINPHOT,
            galchunksize: DEFAULT_GALCHUNKSIZE,
            age: DEFAULT_AGE,
            tau: DEFAULT_TAU,
            zmetal: DEFAULT_ZMETAL,
            av: DEFAULT_AV,
            mu: DEFAULT_MU,
            pburst: DEFAULT_PBURST,
            interval_pburst: DEFAULT_INTERVAL_PBURST,
            tburst: DEFAULT_TBURST,
            fburst: DEFAULT_FBURST,
            dtburst: DEFAULT_DTBURST,
            trunctau: DEFAULT_TRUNCTAU,
            fractrunc: DEFAULT_FRACTRUNC,
            oiiihb: DEFAULT_OIIIHB,
            nebular: false,
            oneovertau: false,
            delayed: false,
            flatav: false,
            flatmu: false,
            flatfburst: false,
            flatdtburst: false,
            bursttype: DEFAULT_BURSTTYPE,
            use_redshift: false,
            zlog: false,
            redshift,
            filterlist: filterlist.to_vec(),
        }
    }
}

#[cfg(test)]
mod record_test {
    use super::*;

    fn default_record() -> SedFitParams {
        SedFitParams::with_defaults(
            "test",
            &["sdss_u0.par".to_string(), "sdss_g0.par".to_string()],
            vec![0.05, 0.1, 0.15],
        )
    }

    #[test]
    fn test_with_defaults_literals() {
        let rec = default_record();

        assert_eq!(rec.prefix, "test");
        assert_eq!(rec.h100, 0.7);
        assert_eq!(rec.omega0, 0.3);
        assert_eq!(rec.omegal, 0.7);
        assert_eq!(rec.spsmodels, "fsps_v2.4_miles");
        assert_eq!(rec.imf, "chab");
        assert_eq!(rec.redcurve, ReddeningCurve::Calzetti);
        assert!(rec.igm);
        assert_eq!(rec.sfhgrid, -1);
        assert_eq!(rec.nmodel, 10_000);
        assert_eq!(rec.ndraw, 2_000);
        assert_eq!(rec.nminphot, 3);
        assert_eq!(rec.galchunksize, 5_000);
        assert_eq!(rec.age, [0.1, 13.0]);
        assert_eq!(rec.tau, [0.01, 1.0]);
        assert_eq!(rec.zmetal, [0.004, 0.04]);
        assert_eq!(rec.av, [0.35, 2.0]);
        assert_eq!(rec.mu, [0.1, 4.0]);
        assert_eq!(rec.pburst, 0.0);
        assert_eq!(rec.interval_pburst, 2.0);
        assert_eq!(rec.tburst, [0.1, 13.0]);
        assert_eq!(rec.fburst, [0.03, 4.0]);
        assert_eq!(rec.dtburst, [0.03, 0.3]);
        assert_eq!(rec.trunctau, [-1.0, -1.0]);
        assert_eq!(rec.fractrunc, 0.0);
        assert_eq!(rec.oiiihb, [-1.0, 1.0]);
        assert!(!rec.nebular);
        assert!(!rec.oneovertau);
        assert!(!rec.delayed);
        assert!(!rec.flatav);
        assert!(!rec.flatmu);
        assert!(!rec.flatfburst);
        assert!(!rec.flatdtburst);
        assert_eq!(rec.bursttype, 1);
        assert!(!rec.use_redshift);
        assert!(!rec.zlog);
        assert_eq!(rec.redshift, vec![0.05, 0.1, 0.15]);
        assert_eq!(rec.filterlist, vec!["sdss_u0.par", "sdss_g0.par"]);
    }

    #[test]
    fn test_redcurve_parse_mixed_case() {
        assert_eq!(
            "Calzetti".parse::<ReddeningCurve>().unwrap(),
            ReddeningCurve::Calzetti
        );
        assert_eq!(
            "  SMC ".parse::<ReddeningCurve>().unwrap(),
            ReddeningCurve::Smc
        );
        assert_eq!(
            "NONE".parse::<ReddeningCurve>().unwrap(),
            ReddeningCurve::None
        );
    }

    #[test]
    fn test_redcurve_parse_unknown() {
        let err = "bogus".parse::<ReddeningCurve>().unwrap_err();
        assert_eq!(
            err,
            crate::sedparam_errors::SedParamError::UnknownReddeningCurve("bogus".to_string())
        );
    }

    #[test]
    fn test_redcurve_display_roundtrip() {
        for curve in [
            ReddeningCurve::None,
            ReddeningCurve::Calzetti,
            ReddeningCurve::Charlot,
            ReddeningCurve::Odonnell,
            ReddeningCurve::Smc,
        ] {
            assert_eq!(curve.to_string().parse::<ReddeningCurve>().unwrap(), curve);
        }
    }
}
