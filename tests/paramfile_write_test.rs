use camino::Utf8PathBuf;
use tempfile::TempDir;

use sedparam::paramfile::read_paramfile;
use sedparam::{ParamFileBuilder, ReddeningCurve, SedParamError, WriteOutcome};

fn utf8_dir(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temp dir path is not UTF-8")
}

fn base_builder(dir: &TempDir) -> ParamFileBuilder {
    ParamFileBuilder::new("testproj", &["sdss_u0.par", "sdss_g0.par", "sdss_r0.par"])
        .out_dir(utf8_dir(dir))
        .zminmax(&[0.01, 1.0])
        .nzz(5)
}

#[test]
fn test_fresh_write_assigns_sfhgrid_one() {
    let dir = TempDir::new().unwrap();

    let outcome = base_builder(&dir).write().unwrap();
    let path = utf8_dir(&dir).join("testproj_paramfile.par");
    assert_eq!(outcome, WriteOutcome::Written(path.clone()));

    let records = read_paramfile(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sfhgrid, 1);
    assert_eq!(records[0].prefix, "testproj");
    assert_eq!(records[0].filterlist.len(), 3);
    assert_eq!(records[0].redshift.len(), 5);
    assert_eq!(records[0].redshift[0], 0.01);
    assert_eq!(records[0].redshift[4], 1.0);
}

#[test]
fn test_append_assigns_next_sfhgrid() {
    let dir = TempDir::new().unwrap();
    base_builder(&dir).write().unwrap();

    let outcome = base_builder(&dir)
        .delayed(true)
        .append(true)
        .write()
        .unwrap();
    assert!(matches!(outcome, WriteOutcome::Written(_)));

    let path = utf8_dir(&dir).join("testproj_paramfile.par");
    let records = read_paramfile(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sfhgrid, 1);
    assert_eq!(records[1].sfhgrid, 2);
    assert!(!records[0].delayed);
    assert!(records[1].delayed);
}

#[test]
fn test_append_duplicate_sfhgrid_rejected() {
    let dir = TempDir::new().unwrap();
    base_builder(&dir).write().unwrap();

    let path = utf8_dir(&dir).join("testproj_paramfile.par");
    let before = std::fs::read_to_string(&path).unwrap();

    let err = base_builder(&dir)
        .append(true)
        .sfhgrid(1)
        .write()
        .unwrap_err();
    assert_eq!(err, SedParamError::DuplicateSfhGrid(1));

    let after = std::fs::read_to_string(&path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_overwrite_guard_skips_silently() {
    let dir = TempDir::new().unwrap();
    base_builder(&dir).write().unwrap();

    let path = utf8_dir(&dir).join("testproj_paramfile.par");
    let before = std::fs::read_to_string(&path).unwrap();

    let outcome = base_builder(&dir).nmodel(99).write().unwrap();
    assert_eq!(outcome, WriteOutcome::SkippedExisting(path.clone()));

    let after = std::fs::read_to_string(&path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_clobber_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    base_builder(&dir).write().unwrap();
    base_builder(&dir).append(true).write().unwrap();

    let outcome = base_builder(&dir)
        .nmodel(500)
        .clobber(true)
        .write()
        .unwrap();
    assert!(matches!(outcome, WriteOutcome::Written(_)));

    let path = utf8_dir(&dir).join("testproj_paramfile.par");
    let records = read_paramfile(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sfhgrid, 1);
    assert_eq!(records[0].nmodel, 500);
}

#[test]
fn test_append_without_existing_file_fails() {
    let dir = TempDir::new().unwrap();

    let err = base_builder(&dir).append(true).write().unwrap_err();
    let path = utf8_dir(&dir).join("testproj_paramfile.par");
    assert_eq!(err, SedParamError::AppendTargetMissing(path.clone()));
    assert!(!path.exists());
}

#[test]
fn test_validation_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();

    let err = base_builder(&dir)
        .zminmax(&[1.0, 0.1])
        .write()
        .unwrap_err();
    assert_eq!(
        err,
        SedParamError::InvalidRedshiftBounds {
            zmin: 1.0,
            zmax: 0.1
        }
    );

    let path = utf8_dir(&dir).join("testproj_paramfile.par");
    assert!(!path.exists());
}

#[test]
fn test_prefix_with_whitespace_rejected_before_write() {
    let dir = TempDir::new().unwrap();

    let err = ParamFileBuilder::new("my proj", &["sdss_u0.par"])
        .out_dir(utf8_dir(&dir))
        .zminmax(&[0.01, 1.0])
        .nzz(5)
        .write()
        .unwrap_err();
    assert_eq!(
        err,
        SedParamError::InvalidStringField {
            field: "prefix",
            value: "my proj".to_string()
        }
    );

    assert!(!utf8_dir(&dir).join("my proj_paramfile.par").exists());
}

#[test]
fn test_filter_name_with_comma_rejected_before_write() {
    let dir = TempDir::new().unwrap();

    let err = ParamFileBuilder::new("testproj", &["odd,name.par"])
        .out_dir(utf8_dir(&dir))
        .zminmax(&[0.01, 1.0])
        .nzz(5)
        .write()
        .unwrap_err();
    assert_eq!(
        err,
        SedParamError::InvalidStringField {
            field: "filterlist",
            value: "odd,name.par".to_string()
        }
    );

    assert!(!utf8_dir(&dir).join("testproj_paramfile.par").exists());
}

#[test]
fn test_written_file_roundtrips_overrides() {
    let dir = TempDir::new().unwrap();

    base_builder(&dir)
        .redcurve("ODonnell")
        .age(&[0.5, 10.0])
        .nebular(true)
        .oneovertau(true)
        .tau(&[0.05, 2.0])
        .imf("salp")
        .write()
        .unwrap();

    let path = utf8_dir(&dir).join("testproj_paramfile.par");
    let records = read_paramfile(&path).unwrap();
    assert_eq!(records.len(), 1);

    let rec = &records[0];
    assert_eq!(rec.redcurve, ReddeningCurve::Odonnell);
    assert_eq!(rec.age, [0.5, 10.0]);
    assert_eq!(rec.tburst, [0.5, 10.0]);
    assert_eq!(rec.tau, [0.05, 2.0]);
    assert_eq!(rec.imf, "salp");
    assert!(rec.nebular);
    assert!(rec.oneovertau);
}

#[test]
fn test_log_grid_written_and_flagged() {
    let dir = TempDir::new().unwrap();

    base_builder(&dir)
        .zminmax(&[0.1, 10.0])
        .nzz(3)
        .zlog(true)
        .write()
        .unwrap();

    let path = utf8_dir(&dir).join("testproj_paramfile.par");
    let records = read_paramfile(&path).unwrap();
    assert!(records[0].zlog);
    assert!(!records[0].use_redshift);
    assert_eq!(records[0].redshift[0], 0.1);
    assert_eq!(records[0].redshift[2], 10.0);
}

#[test]
fn test_verbatim_grid_written_and_flagged() {
    let dir = TempDir::new().unwrap();

    base_builder(&dir)
        .use_redshift(&[0.1, 0.3, 0.7])
        .write()
        .unwrap();

    let path = utf8_dir(&dir).join("testproj_paramfile.par");
    let records = read_paramfile(&path).unwrap();
    assert!(records[0].use_redshift);
    assert_eq!(records[0].redshift, vec![0.1, 0.3, 0.7]);
}
