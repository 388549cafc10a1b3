//! # Parameter-file construction and persistence
//!
//! This module defines [`ParamFileBuilder`], the central entry point of the
//! crate. The builder collects the mandatory inputs (prefix, filter list,
//! redshift specification) plus one optional override per record field, and
//! its [`write`](ParamFileBuilder::write) operation runs the full pipeline:
//!
//! 1. Validate required fields.
//! 2. Resolve the redshift grid (verbatim caller grid, or derived from
//!    `zminmax`/`nzz` with linear or logarithmic spacing).
//! 3. Populate a [`SedFitParams`] with the documented defaults and overlay
//!    every supplied override, validating range shapes.
//! 4. Cross-field validation (reddening curve, burst-flag compatibility,
//!    τ positivity under `oneovertau`).
//! 5. Resolve the append/overwrite policy: appending reads the existing
//!    file, merges, and assigns the next free `sfhgrid`; a fresh write
//!    assigns 1; `sfhgrid` uniqueness is enforced over the assembled set.
//! 6. Rewrite the whole file from the assembled in-memory record set.
//!
//! Validation runs to completion before any write, so a failed call never
//! leaves a partial file behind. Appending is read-merge-rewrite; there is
//! no incremental append and no file locking (concurrent writers targeting
//! the same path race, last writer wins).
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use sedparam::paramfile::ParamFileBuilder;
//!
//! let _outcome = ParamFileBuilder::new("sdss", &["sdss_u0.par", "sdss_g0.par"])
//!     .zminmax(&[0.01, 1.0])
//!     .nzz(50)
//!     .nebular(true)
//!     .clobber(true)
//!     .write()?;
//! # Ok::<(), sedparam::SedParamError>(())
//! ```
//!
//! ## See also
//! ------------
//! * [`SedFitParams::with_defaults`] – Default population.
//! * [`crate::redshift::redshift_grid`] – Grid derivation.
//! * [`crate::paramfile::table`] – The on-disk table dialect.

use std::collections::HashSet;

use camino::Utf8PathBuf;

use crate::constants::{MinMax, PARAMFILE_SUFFIX};
use crate::paramfile::table;
use crate::record::SedFitParams;
use crate::redshift::{is_strictly_increasing, redshift_grid};
use crate::sedparam_errors::SedParamError;

/// Result of a [`ParamFileBuilder::write`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file at the contained path was (re)written.
    Written(Utf8PathBuf),
    /// The destination already exists and neither `clobber` nor `append`
    /// was requested; nothing was written.
    SkippedExisting(Utf8PathBuf),
}

/// Builder for one SED-fitting parameter record and its persistence policy.
///
/// Every optional setter overrides the corresponding documented default;
/// unset fields keep the literals from [`crate::constants`]. Range setters
/// accept slices and are shape-checked (exactly 2 elements) at write time.
#[derive(Debug, Clone)]
pub struct ParamFileBuilder {
    prefix: String,
    filterlist: Vec<String>,
    out_dir: Utf8PathBuf,

    // Redshift specification
    zminmax: Option<Vec<f64>>,
    nzz: Option<usize>,
    zlog: bool,
    use_redshift: Option<Vec<f64>>,

    // Record field overrides
    h100: Option<f64>,
    omega0: Option<f64>,
    omegal: Option<f64>,
    spsmodels: Option<String>,
    imf: Option<String>,
    redcurve: Option<String>,
    igm: Option<bool>,
    sfhgrid: Option<i64>,
    nmodel: Option<u32>,
    ndraw: Option<u32>,
    nminphot: Option<u32>,
    galchunksize: Option<u32>,
    age: Option<Vec<f64>>,
    tau: Option<Vec<f64>>,
    zmetal: Option<Vec<f64>>,
    av: Option<Vec<f64>>,
    mu: Option<Vec<f64>>,
    pburst: Option<f64>,
    interval_pburst: Option<f64>,
    tburst: Option<Vec<f64>>,
    fburst: Option<Vec<f64>>,
    dtburst: Option<Vec<f64>>,
    trunctau: Option<Vec<f64>>,
    fractrunc: Option<f64>,
    oiiihb: Option<Vec<f64>>,
    nebular: bool,
    oneovertau: bool,
    delayed: bool,
    flatav: bool,
    flatmu: bool,
    flatfburst: bool,
    flatdtburst: bool,
    bursttype: Option<i32>,

    // Persistence policy
    append: bool,
    clobber: bool,
}

impl ParamFileBuilder {
    /// Start a builder from the two mandatory record fields.
    ///
    /// The output directory defaults to the current working directory; a
    /// redshift specification must still be supplied through either
    /// [`zminmax`](Self::zminmax)+[`nzz`](Self::nzz) or
    /// [`use_redshift`](Self::use_redshift) before [`write`](Self::write).
    pub fn new(prefix: &str, filterlist: &[&str]) -> Self {
        ParamFileBuilder {
            prefix: prefix.to_string(),
            filterlist: filterlist.iter().map(|name| name.to_string()).collect(),
            out_dir: Utf8PathBuf::from("."),
            zminmax: None,
            nzz: None,
            zlog: false,
            use_redshift: None,
            h100: None,
            omega0: None,
            omegal: None,
            spsmodels: None,
            imf: None,
            redcurve: None,
            igm: None,
            sfhgrid: None,
            nmodel: None,
            ndraw: None,
            nminphot: None,
            galchunksize: None,
            age: None,
            tau: None,
            zmetal: None,
            av: None,
            mu: None,
            pburst: None,
            interval_pburst: None,
            tburst: None,
            fburst: None,
            dtburst: None,
            trunctau: None,
            fractrunc: None,
            oiiihb: None,
            nebular: false,
            oneovertau: false,
            delayed: false,
            flatav: false,
            flatmu: false,
            flatfburst: false,
            flatdtburst: false,
            bursttype: None,
            append: false,
            clobber: false,
        }
    }

    /// Directory the parameter file is written into.
    pub fn out_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Inclusive `[zmin, zmax]` interval the redshift grid spans.
    pub fn zminmax(mut self, range: &[f64]) -> Self {
        self.zminmax = Some(range.to_vec());
        self
    }

    /// Number of points in the derived redshift grid.
    pub fn nzz(mut self, count: usize) -> Self {
        self.nzz = Some(count);
        self
    }

    /// Space the derived grid logarithmically instead of linearly.
    pub fn zlog(mut self, enabled: bool) -> Self {
        self.zlog = enabled;
        self
    }

    /// Supply the redshift grid verbatim; takes precedence over
    /// `zminmax`/`nzz` and must be strictly increasing.
    pub fn use_redshift(mut self, grid: &[f64]) -> Self {
        self.use_redshift = Some(grid.to_vec());
        self
    }

    pub fn h100(mut self, value: f64) -> Self {
        self.h100 = Some(value);
        self
    }

    pub fn omega0(mut self, value: f64) -> Self {
        self.omega0 = Some(value);
        self
    }

    pub fn omegal(mut self, value: f64) -> Self {
        self.omegal = Some(value);
        self
    }

    pub fn spsmodels(mut self, value: &str) -> Self {
        self.spsmodels = Some(value.to_string());
        self
    }

    pub fn imf(mut self, value: &str) -> Self {
        self.imf = Some(value.to_string());
        self
    }

    /// Reddening curve name; parsed case-insensitively at write time.
    pub fn redcurve(mut self, value: &str) -> Self {
        self.redcurve = Some(value.to_string());
        self
    }

    pub fn igm(mut self, enabled: bool) -> Self {
        self.igm = Some(enabled);
        self
    }

    /// Explicit grid identifier; when unset the writer assigns 1 on a fresh
    /// file or `max(existing) + 1` on append.
    pub fn sfhgrid(mut self, id: i64) -> Self {
        self.sfhgrid = Some(id);
        self
    }

    pub fn nmodel(mut self, count: u32) -> Self {
        self.nmodel = Some(count);
        self
    }

    pub fn ndraw(mut self, count: u32) -> Self {
        self.ndraw = Some(count);
        self
    }

    pub fn nminphot(mut self, count: u32) -> Self {
        self.nminphot = Some(count);
        self
    }

    pub fn galchunksize(mut self, count: u32) -> Self {
        self.galchunksize = Some(count);
        self
    }

    pub fn age(mut self, range: &[f64]) -> Self {
        self.age = Some(range.to_vec());
        self
    }

    pub fn tau(mut self, range: &[f64]) -> Self {
        self.tau = Some(range.to_vec());
        self
    }

    pub fn zmetal(mut self, range: &[f64]) -> Self {
        self.zmetal = Some(range.to_vec());
        self
    }

    pub fn av(mut self, range: &[f64]) -> Self {
        self.av = Some(range.to_vec());
        self
    }

    pub fn mu(mut self, range: &[f64]) -> Self {
        self.mu = Some(range.to_vec());
        self
    }

    pub fn pburst(mut self, value: f64) -> Self {
        self.pburst = Some(value);
        self
    }

    pub fn interval_pburst(mut self, value: f64) -> Self {
        self.interval_pburst = Some(value);
        self
    }

    /// Burst onset range; when unset, defaults to the resolved `age` range
    /// rather than the static default.
    pub fn tburst(mut self, range: &[f64]) -> Self {
        self.tburst = Some(range.to_vec());
        self
    }

    pub fn fburst(mut self, range: &[f64]) -> Self {
        self.fburst = Some(range.to_vec());
        self
    }

    pub fn dtburst(mut self, range: &[f64]) -> Self {
        self.dtburst = Some(range.to_vec());
        self
    }

    pub fn trunctau(mut self, range: &[f64]) -> Self {
        self.trunctau = Some(range.to_vec());
        self
    }

    pub fn fractrunc(mut self, value: f64) -> Self {
        self.fractrunc = Some(value);
        self
    }

    pub fn oiiihb(mut self, range: &[f64]) -> Self {
        self.oiiihb = Some(range.to_vec());
        self
    }

    pub fn nebular(mut self, enabled: bool) -> Self {
        self.nebular = enabled;
        self
    }

    /// Draw 1/τ uniformly; requires a strictly positive τ minimum and is
    /// incompatible with [`delayed`](Self::delayed).
    pub fn oneovertau(mut self, enabled: bool) -> Self {
        self.oneovertau = enabled;
        self
    }

    pub fn delayed(mut self, enabled: bool) -> Self {
        self.delayed = enabled;
        self
    }

    pub fn flatav(mut self, enabled: bool) -> Self {
        self.flatav = enabled;
        self
    }

    pub fn flatmu(mut self, enabled: bool) -> Self {
        self.flatmu = enabled;
        self
    }

    pub fn flatfburst(mut self, enabled: bool) -> Self {
        self.flatfburst = enabled;
        self
    }

    pub fn flatdtburst(mut self, enabled: bool) -> Self {
        self.flatdtburst = enabled;
        self
    }

    pub fn bursttype(mut self, value: i32) -> Self {
        self.bursttype = Some(value);
        self
    }

    /// Append a record to an existing parameter file instead of writing a
    /// fresh one; fails if the file does not exist yet.
    pub fn append(mut self, enabled: bool) -> Self {
        self.append = enabled;
        self
    }

    /// Allow replacing an existing file on a non-append write.
    pub fn clobber(mut self, enabled: bool) -> Self {
        self.clobber = enabled;
        self
    }

    /// Destination path: `<out_dir>/<prefix>_paramfile.par`.
    pub fn output_path(&self) -> Utf8PathBuf {
        self.out_dir
            .join(format!("{}{}", self.prefix, PARAMFILE_SUFFIX))
    }

    /// Validate, assemble, and persist the parameter file.
    ///
    /// Return
    /// ----------
    /// * [`WriteOutcome::Written`] with the destination path on success.
    /// * [`WriteOutcome::SkippedExisting`] when the destination exists and
    ///   neither `clobber` nor `append` was requested (no-op, not an error).
    /// * A [`SedParamError`] on any validation failure, on append against a
    ///   missing or unreadable file, or on I/O failure. No file is touched
    ///   on the error path.
    pub fn write(&self) -> Result<WriteOutcome, SedParamError> {
        if self.prefix.trim().is_empty() {
            return Err(SedParamError::MissingRequiredField("prefix"));
        }
        if self.filterlist.is_empty() {
            return Err(SedParamError::MissingRequiredField("filterlist"));
        }

        let mut record = self.build_record()?;
        let path = self.output_path();

        let mut records = if self.append {
            if !path.exists() {
                return Err(SedParamError::AppendTargetMissing(path));
            }
            table::read_paramfile(&path)?
        } else {
            Vec::new()
        };

        record.sfhgrid = match self.sfhgrid {
            Some(id) => id,
            None => records.iter().map(|rec| rec.sfhgrid).max().unwrap_or(0) + 1,
        };
        records.push(record);

        let mut seen = HashSet::new();
        for rec in &records {
            if !seen.insert(rec.sfhgrid) {
                return Err(SedParamError::DuplicateSfhGrid(rec.sfhgrid));
            }
        }

        if !self.append && !self.clobber && path.exists() {
            return Ok(WriteOutcome::SkippedExisting(path));
        }

        std::fs::write(&path, table::render_paramfile(&records))?;
        Ok(WriteOutcome::Written(path))
    }

    /// Resolve the redshift grid, overlay every override on the defaults,
    /// and run the cross-field checks. Does not touch the filesystem.
    fn build_record(&self) -> Result<SedFitParams, SedParamError> {
        let (grid, verbatim) = self.resolve_redshift()?;

        let mut record = SedFitParams::with_defaults(&self.prefix, &self.filterlist, grid);
        record.use_redshift = verbatim;
        record.zlog = self.zlog && !verbatim;

        if let Some(value) = self.h100 {
            record.h100 = value;
        }
        if let Some(value) = self.omega0 {
            record.omega0 = value;
        }
        if let Some(value) = self.omegal {
            record.omegal = value;
        }
        if let Some(name) = &self.spsmodels {
            record.spsmodels = name.clone();
        }
        if let Some(name) = &self.imf {
            record.imf = name.clone();
        }
        if let Some(name) = &self.redcurve {
            record.redcurve = name.parse()?;
        }
        if let Some(flag) = self.igm {
            record.igm = flag;
        }
        if let Some(count) = self.nmodel {
            record.nmodel = count;
        }
        if let Some(count) = self.ndraw {
            record.ndraw = count;
        }
        if let Some(count) = self.nminphot {
            record.nminphot = count;
        }
        if let Some(count) = self.galchunksize {
            record.galchunksize = count;
        }

        if let Some(range) = range_override("age", &self.age)? {
            record.age = range;
        }
        if let Some(range) = range_override("tau", &self.tau)? {
            record.tau = range;
        }
        if let Some(range) = range_override("zmetal", &self.zmetal)? {
            record.zmetal = range;
        }
        if let Some(range) = range_override("av", &self.av)? {
            record.av = range;
        }
        if let Some(range) = range_override("mu", &self.mu)? {
            record.mu = range;
        }
        if let Some(range) = range_override("fburst", &self.fburst)? {
            record.fburst = range;
        }
        if let Some(range) = range_override("dtburst", &self.dtburst)? {
            record.dtburst = range;
        }
        if let Some(range) = range_override("trunctau", &self.trunctau)? {
            record.trunctau = range;
        }
        if let Some(range) = range_override("oiiihb", &self.oiiihb)? {
            record.oiiihb = range;
        }

        // Cross-field default: an unset burst onset range follows the
        // resolved age range, not the static default.
        record.tburst = match range_override("tburst", &self.tburst)? {
            Some(range) => range,
            None => record.age,
        };

        if let Some(value) = self.pburst {
            record.pburst = value;
        }
        if let Some(value) = self.interval_pburst {
            record.interval_pburst = value;
        }
        if let Some(value) = self.fractrunc {
            record.fractrunc = value;
        }
        if let Some(value) = self.bursttype {
            record.bursttype = value;
        }

        record.nebular = self.nebular;
        record.oneovertau = self.oneovertau;
        record.delayed = self.delayed;
        record.flatav = self.flatav;
        record.flatmu = self.flatmu;
        record.flatfburst = self.flatfburst;
        record.flatdtburst = self.flatdtburst;

        if record.delayed && record.oneovertau {
            return Err(SedParamError::IncompatibleBurstFlags);
        }
        if record.oneovertau && record.tau[0] <= 0.0 {
            return Err(SedParamError::NonPositiveTau(record.tau[0]));
        }

        // String cells land in a whitespace-tokenized table with
        // comma-joined brace arrays; reject the delimiter characters so the
        // written file stays loadable by the same reader.
        validate_table_token("prefix", &record.prefix)?;
        validate_table_token("spsmodels", &record.spsmodels)?;
        validate_table_token("imf", &record.imf)?;
        for name in &record.filterlist {
            validate_table_token("filterlist", name)?;
        }

        Ok(record)
    }

    fn resolve_redshift(&self) -> Result<(Vec<f64>, bool), SedParamError> {
        if let Some(grid) = &self.use_redshift {
            if grid.is_empty() {
                return Err(SedParamError::MissingRequiredField("use_redshift"));
            }
            if !is_strictly_increasing(grid) {
                return Err(SedParamError::NonMonotonicRedshift);
            }
            return Ok((grid.clone(), true));
        }

        let zminmax = self
            .zminmax
            .as_ref()
            .ok_or(SedParamError::MissingRequiredField("zminmax"))?;
        let nzz = self
            .nzz
            .ok_or(SedParamError::MissingRequiredField("nzz"))?;
        Ok((redshift_grid(zminmax, nzz, self.zlog)?, false))
    }
}

fn validate_table_token(field: &'static str, value: &str) -> Result<(), SedParamError> {
    let reserved = |c: char| c.is_whitespace() || c == ',' || c == '{' || c == '}';
    if value.contains(reserved) {
        return Err(SedParamError::InvalidStringField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn range_override(
    field: &'static str,
    value: &Option<Vec<f64>>,
) -> Result<Option<MinMax>, SedParamError> {
    match value {
        None => Ok(None),
        Some(range) if range.len() == 2 => Ok(Some([range[0], range[1]])),
        Some(range) => Err(SedParamError::InvalidRangeField {
            field,
            len: range.len(),
        }),
    }
}
