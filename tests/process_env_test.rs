//! `build_native_dependencies` against the real process environment.
//!
//! Kept in its own test binary with a single test so nothing else reads the
//! process environment while it changes.

use flate2::write::GzEncoder;
use flate2::Compression;
use httpmock::prelude::*;
use native_deps::{build_native_dependencies, InstallStep, ProvisionError};
use std::env;
use std::fs;
use tempfile::TempDir;

fn tarball(path: &str, content: &str) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, path, content.as_bytes())
        .unwrap();
    builder.into_inner().unwrap().finish().unwrap()
}

#[test]
fn build_sets_process_environment_and_stops_on_failure() {
    let server = MockServer::start();
    let archive = server.mock(|when, then| {
        when.method(GET).path("/freetds.tar.gz");
        then.status(200).body(tarball("lib/libsybdb.so.5", "elf"));
    });

    let release = TempDir::new().unwrap();
    env::set_var("NATIVE_DEPS_RELEASE_ROOT", release.path());
    env::set_var("NATIVE_DEPS_ASSET_HOST", server.base_url());
    env::remove_var("LD_LIBRARY_PATH");
    env::remove_var("FREETDS_DIR");

    let app = TempDir::new().unwrap();
    fs::write(app.path().join(".freetds.conf"), "").unwrap();

    let report = build_native_dependencies(app.path()).unwrap();

    let freetds_dir = release.path().join("vendor/freetds");
    assert_eq!(report.installed(), vec!["freetds"]);
    assert_eq!(
        env::var("FREETDS_DIR").unwrap(),
        freetds_dir.display().to_string()
    );
    let library_path = env::var("LD_LIBRARY_PATH").unwrap();
    assert_eq!(library_path, format!("{}/lib", freetds_dir.display()));

    // the exported path is now ambient; a rerun must not repeat it
    let again = build_native_dependencies(app.path()).unwrap();
    assert_eq!(again.skipped(), vec!["freetds"]);
    assert_eq!(env::var("LD_LIBRARY_PATH").unwrap(), library_path);
    archive.assert_calls(2);

    // no mock for unixodbc, so the host answers 404
    let failing = TempDir::new().unwrap();
    fs::write(failing.path().join(".odbc.ini"), "").unwrap();

    let err = build_native_dependencies(failing.path()).unwrap_err();

    match &err {
        ProvisionError::PackageFetchFailed { profile, step, .. } => {
            assert_eq!(profile, "unixodbc");
            assert_eq!(*step, InstallStep::Download);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(env::var("LD_LIBRARY_PATH").unwrap(), library_path);
    assert!(!failing.path().join(".bundle").exists());
}
