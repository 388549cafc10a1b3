//! # ISEDFITPARAMS table reader and writer
//!
//! Renders a sequence of [`SedFitParams`] records into the structured text
//! table consumed by the downstream SED-fitting pipeline, and parses the
//! same dialect back for the append path.
//!
//! ## Dialect
//! -----------------
//! - Lines starting with `#` are comments; blank lines are ignored.
//! - Each data row starts with the table name `ISEDFITPARAMS` followed by
//!   one whitespace-separated cell per record field, in declaration order.
//! - 2-element priors, the redshift grid, and the filter list render as
//!   brace-delimited, comma-joined arrays with no interior whitespace
//!   (e.g. `{0.1,13}`), so rows tokenize by plain whitespace splitting.
//! - Booleans render as `0`/`1`.
//! - Columns are padded to a common width per column for readability; the
//!   parser does not depend on the padding.
//!
//! ## Error Handling
//! -----------------
//! Any malformed row, cell, or unexpected tag is surfaced as
//! [`SedParamError::MalformedTable`] with the offending line number and
//! field name for precise diagnostics.
//!
//! ## See also
//! ------------
//! * [`SedFitParams`] – The record type serialized here.
//! * [`ParamFileBuilder`](crate::paramfile::ParamFileBuilder) – Drives the
//!   write and append paths.

use camino::Utf8Path;
use hifitime::Epoch;
use itertools::Itertools;

use crate::record::SedFitParams;
use crate::sedparam_errors::SedParamError;

/// Name of the table section inside the parameter file.
pub const PARAM_TABLE_NAME: &str = "ISEDFITPARAMS";

/// Column names, in the order cells appear on each data row.
pub const COLUMNS: [&str; 38] = [
    "prefix",
    "h100",
    "omega0",
    "omegal",
    "spsmodels",
    "imf",
    "redcurve",
    "igm",
    "sfhgrid",
    "nmodel",
    "ndraw",
    "nminphot",
    "galchunksize",
    "age",
    "tau",
    "zmetal",
    "av",
    "mu",
    "pburst",
    "interval_pburst",
    "tburst",
    "fburst",
    "dtburst",
    "trunctau",
    "fractrunc",
    "oiiihb",
    "nebular",
    "oneovertau",
    "delayed",
    "flatav",
    "flatmu",
    "flatfburst",
    "flatdtburst",
    "bursttype",
    "use_redshift",
    "zlog",
    "redshift",
    "filterlist",
];

fn fmt_bool(value: bool) -> String {
    (if value { "1" } else { "0" }).to_string()
}

fn fmt_floats(values: &[f64]) -> String {
    format!("{{{}}}", values.iter().join(","))
}

fn fmt_strings(values: &[String]) -> String {
    format!("{{{}}}", values.iter().join(","))
}

fn row_cells(rec: &SedFitParams) -> Vec<String> {
    vec![
        PARAM_TABLE_NAME.to_string(),
        rec.prefix.clone(),
        rec.h100.to_string(),
        rec.omega0.to_string(),
        rec.omegal.to_string(),
        rec.spsmodels.clone(),
        rec.imf.clone(),
        rec.redcurve.to_string(),
        fmt_bool(rec.igm),
        rec.sfhgrid.to_string(),
        rec.nmodel.to_string(),
        rec.ndraw.to_string(),
        rec.nminphot.to_string(),
        rec.galchunksize.to_string(),
        fmt_floats(&rec.age),
        fmt_floats(&rec.tau),
        fmt_floats(&rec.zmetal),
        fmt_floats(&rec.av),
        fmt_floats(&rec.mu),
        rec.pburst.to_string(),
        rec.interval_pburst.to_string(),
        fmt_floats(&rec.tburst),
        fmt_floats(&rec.fburst),
        fmt_floats(&rec.dtburst),
        fmt_floats(&rec.trunctau),
        rec.fractrunc.to_string(),
        fmt_floats(&rec.oiiihb),
        fmt_bool(rec.nebular),
        fmt_bool(rec.oneovertau),
        fmt_bool(rec.delayed),
        fmt_bool(rec.flatav),
        fmt_bool(rec.flatmu),
        fmt_bool(rec.flatfburst),
        fmt_bool(rec.flatdtburst),
        rec.bursttype.to_string(),
        fmt_bool(rec.use_redshift),
        fmt_bool(rec.zlog),
        fmt_floats(&rec.redshift),
        fmt_strings(&rec.filterlist),
    ]
}

/// Render the full parameter file: provenance header, column listing, and
/// one aligned data row per record.
pub fn render_paramfile(records: &[SedFitParams]) -> String {
    let stamp = Epoch::now()
        .map(|epoch| epoch.to_string())
        .unwrap_or_else(|_| "unknown epoch".to_string());

    let mut out = String::new();
    out.push_str(&format!(
        "# Generated by {} {} on {}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        stamp
    ));
    out.push_str(&format!("# Columns: {}\n#\n", COLUMNS.iter().join(" ")));

    let rows: Vec<Vec<String>> = records.iter().map(row_cells).collect();
    let ncols = COLUMNS.len() + 1;
    let widths: Vec<usize> = (0..ncols)
        .map(|col| rows.iter().map(|row| row[col].len()).max().unwrap_or(0))
        .collect();

    for row in &rows {
        let line = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .join(" ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn malformed(line_no: usize, field: &str, token: &str) -> SedParamError {
    SedParamError::MalformedTable(format!("line {line_no}: invalid {field} value '{token}'"))
}

fn parse_f64(token: &str, line_no: usize, field: &str) -> Result<f64, SedParamError> {
    token
        .parse::<f64>()
        .map_err(|_| malformed(line_no, field, token))
}

fn parse_u32(token: &str, line_no: usize, field: &str) -> Result<u32, SedParamError> {
    token
        .parse::<u32>()
        .map_err(|_| malformed(line_no, field, token))
}

fn parse_bool(token: &str, line_no: usize, field: &str) -> Result<bool, SedParamError> {
    match token {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(malformed(line_no, field, token)),
    }
}

fn brace_inner<'a>(
    token: &'a str,
    line_no: usize,
    field: &str,
) -> Result<&'a str, SedParamError> {
    token
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| malformed(line_no, field, token))
}

fn parse_float_array(token: &str, line_no: usize, field: &str) -> Result<Vec<f64>, SedParamError> {
    let inner = brace_inner(token, line_no, field)?;
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|part| parse_f64(part, line_no, field))
        .collect()
}

fn parse_range(token: &str, line_no: usize, field: &str) -> Result<[f64; 2], SedParamError> {
    let values = parse_float_array(token, line_no, field)?;
    if values.len() != 2 {
        return Err(malformed(line_no, field, token));
    }
    Ok([values[0], values[1]])
}

fn parse_string_array(token: &str, line_no: usize, field: &str) -> Result<Vec<String>, SedParamError> {
    let inner = brace_inner(token, line_no, field)?;
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    Ok(inner.split(',').map(str::to_string).collect())
}

fn parse_row(tokens: &[&str], line_no: usize) -> Result<SedFitParams, SedParamError> {
    Ok(SedFitParams {
        prefix: tokens[0].to_string(),
        h100: parse_f64(tokens[1], line_no, "h100")?,
        omega0: parse_f64(tokens[2], line_no, "omega0")?,
        omegal: parse_f64(tokens[3], line_no, "omegal")?,
        spsmodels: tokens[4].to_string(),
        imf: tokens[5].to_string(),
        redcurve: tokens[6].parse()?,
        igm: parse_bool(tokens[7], line_no, "igm")?,
        sfhgrid: tokens[8]
            .parse::<i64>()
            .map_err(|_| malformed(line_no, "sfhgrid", tokens[8]))?,
        nmodel: parse_u32(tokens[9], line_no, "nmodel")?,
        ndraw: parse_u32(tokens[10], line_no, "ndraw")?,
        nminphot: parse_u32(tokens[11], line_no, "nminphot")?,
        galchunksize: parse_u32(tokens[12], line_no, "galchunksize")?,
        age: parse_range(tokens[13], line_no, "age")?,
        tau: parse_range(tokens[14], line_no, "tau")?,
        zmetal: parse_range(tokens[15], line_no, "zmetal")?,
        av: parse_range(tokens[16], line_no, "av")?,
        mu: parse_range(tokens[17], line_no, "mu")?,
        pburst: parse_f64(tokens[18], line_no, "pburst")?,
        interval_pburst: parse_f64(tokens[19], line_no, "interval_pburst")?,
        tburst: parse_range(tokens[20], line_no, "tburst")?,
        fburst: parse_range(tokens[21], line_no, "fburst")?,
        dtburst: parse_range(tokens[22], line_no, "dtburst")?,
        trunctau: parse_range(tokens[23], line_no, "trunctau")?,
        fractrunc: parse_f64(tokens[24], line_no, "fractrunc")?,
        oiiihb: parse_range(tokens[25], line_no, "oiiihb")?,
        nebular: parse_bool(tokens[26], line_no, "nebular")?,
        oneovertau: parse_bool(tokens[27], line_no, "oneovertau")?,
        delayed: parse_bool(tokens[28], line_no, "delayed")?,
        flatav: parse_bool(tokens[29], line_no, "flatav")?,
        flatmu: parse_bool(tokens[30], line_no, "flatmu")?,
        flatfburst: parse_bool(tokens[31], line_no, "flatfburst")?,
        flatdtburst: parse_bool(tokens[32], line_no, "flatdtburst")?,
        bursttype: tokens[33]
            .parse::<i32>()
            .map_err(|_| malformed(line_no, "bursttype", tokens[33]))?,
        use_redshift: parse_bool(tokens[34], line_no, "use_redshift")?,
        zlog: parse_bool(tokens[35], line_no, "zlog")?,
        redshift: parse_float_array(tokens[36], line_no, "redshift")?,
        filterlist: parse_string_array(tokens[37], line_no, "filterlist")?,
    })
}

/// Parse the table dialect from an in-memory string.
///
/// Comment and blank lines are skipped; every remaining line must be a
/// complete `ISEDFITPARAMS` row.
pub fn parse_paramfile(content: &str) -> Result<Vec<SedFitParams>, SedParamError> {
    let mut records = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens[0] != PARAM_TABLE_NAME {
            return Err(SedParamError::MalformedTable(format!(
                "line {line_no}: expected table tag '{PARAM_TABLE_NAME}', got '{}'",
                tokens[0]
            )));
        }
        if tokens.len() != COLUMNS.len() + 1 {
            return Err(SedParamError::MalformedTable(format!(
                "line {line_no}: expected {} cells, got {}",
                COLUMNS.len(),
                tokens.len() - 1
            )));
        }
        records.push(parse_row(&tokens[1..], line_no)?);
    }
    Ok(records)
}

/// Read and parse a parameter file from disk.
pub fn read_paramfile(path: &Utf8Path) -> Result<Vec<SedFitParams>, SedParamError> {
    let content = std::fs::read_to_string(path)?;
    parse_paramfile(&content)
}

#[cfg(test)]
mod table_test {
    use super::*;
    use crate::record::ReddeningCurve;

    fn sample_record() -> SedFitParams {
        let mut rec = SedFitParams::with_defaults(
            "unittest",
            &["sdss_u0.par".to_string(), "sdss_g0.par".to_string()],
            vec![0.05, 0.1, 0.15, 0.2],
        );
        rec.sfhgrid = 1;
        rec
    }

    #[test]
    fn test_render_parse_roundtrip() {
        let mut second = sample_record();
        second.sfhgrid = 2;
        second.redcurve = ReddeningCurve::Smc;
        second.nebular = true;
        second.tburst = [0.5, 10.0];

        let records = vec![sample_record(), second];
        let rendered = render_paramfile(&records);
        let parsed = parse_paramfile(&rendered).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_render_header_and_alignment() {
        let rendered = render_paramfile(&[sample_record()]);
        let mut lines = rendered.lines();
        assert!(lines.next().unwrap().starts_with("# Generated by sedparam"));
        assert!(lines.next().unwrap().starts_with("# Columns: prefix h100"));

        let data: Vec<&str> = rendered
            .lines()
            .filter(|line| line.starts_with(PARAM_TABLE_NAME))
            .collect();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].split_whitespace().count(), COLUMNS.len() + 1);
    }

    #[test]
    fn test_parse_rejects_unknown_tag() {
        let err = parse_paramfile("OTHERTABLE 1 2 3\n").unwrap_err();
        assert!(matches!(err, SedParamError::MalformedTable(_)));
    }

    #[test]
    fn test_parse_rejects_short_row() {
        let err = parse_paramfile("ISEDFITPARAMS demo 0.7\n").unwrap_err();
        assert!(matches!(err, SedParamError::MalformedTable(_)));
    }

    #[test]
    fn test_parse_rejects_bad_cell() {
        let rendered = render_paramfile(&[sample_record()]);
        let corrupted = rendered.replace("0.7", "xyz");
        let err = parse_paramfile(&corrupted).unwrap_err();
        assert!(matches!(err, SedParamError::MalformedTable(_)));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let rendered = render_paramfile(&[sample_record()]);
        let padded = format!("# extra comment\n\n{rendered}\n# trailing\n");
        let parsed = parse_paramfile(&padded).unwrap();
        assert_eq!(parsed.len(), 1);
    }
}
