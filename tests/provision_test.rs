//! End-to-end provisioning against a mock asset host.

use flate2::write::GzEncoder;
use flate2::Compression;
use httpmock::prelude::*;
use native_deps::build_config::BuildConfigDocument;
use native_deps::config::Settings;
use native_deps::install::{IdempotencyCheck, INSTALL_MARKER};
use native_deps::provision::provision;
use native_deps::{InstallStep, ProvisionError};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn tarball(files: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

struct Env {
    app: TempDir,
    release: TempDir,
    server: MockServer,
}

impl Env {
    fn new() -> Self {
        Self {
            app: TempDir::new().unwrap(),
            release: TempDir::new().unwrap(),
            server: MockServer::start(),
        }
    }

    fn marker(&self, name: &str) {
        fs::write(self.app.path().join(name), "").unwrap();
    }

    fn settings(&self) -> Settings {
        let release_root = self.release.path().to_string_lossy().to_string();
        let asset_host = self.server.base_url();
        Settings::from_lookup(self.app.path(), move |key| match key {
            "NATIVE_DEPS_RELEASE_ROOT" => Some(release_root.clone()),
            "NATIVE_DEPS_ASSET_HOST" => Some(asset_host.clone()),
            _ => None,
        })
        .unwrap()
    }

    fn root(&self) -> &Path {
        self.app.path()
    }

    fn release_dir(&self, vendor_dir: &str) -> std::path::PathBuf {
        self.release.path().join("vendor").join(vendor_dir)
    }
}

#[test]
fn freetds_only() {
    let env = Env::new();
    env.marker(".freetds.conf");
    let archive = env.server.mock(|when, then| {
        when.method(GET).path("/freetds.tar.gz");
        then.status(200).body(tarball(&[("lib/libsybdb.so.5", "elf"), ("include/sybdb.h", "")]));
    });

    let mut sink: HashMap<String, String> = HashMap::new();
    let report = provision(env.root(), &env.settings(), &mut sink).unwrap();

    assert_eq!(report.active, vec!["freetds"]);
    archive.assert_calls(2);
    assert!(env.root().join("vendor/freetds/lib/libsybdb.so.5").is_file());
    assert!(env.release_dir("freetds").join("include/sybdb.h").is_file());

    let freetds_dir = env.release_dir("freetds").display().to_string();
    assert_eq!(sink.get("FREETDS_DIR"), Some(&freetds_dir));
    assert!(sink["LD_LIBRARY_PATH"].ends_with("/freetds/lib"));

    let doc = BuildConfigDocument::load(&BuildConfigDocument::path_for(env.root())).unwrap();
    assert_eq!(
        doc.get("BUNDLE_BUILD__TINY_TDS").and_then(|v| v.as_str()),
        Some(format!("--with-freetds-dir={}", freetds_dir).as_str())
    );
}

#[test]
fn no_markers() {
    let env = Env::new();
    let archive = env.server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let mut sink: HashMap<String, String> = HashMap::new();
    let report = provision(env.root(), &env.settings(), &mut sink).unwrap();

    assert!(report.active.is_empty());
    assert!(sink.is_empty());
    archive.assert_calls(0);
    assert!(!env.root().join("vendor").exists());
    assert!(!env.release.path().join("vendor").exists());
    assert!(!BuildConfigDocument::path_for(env.root()).exists());
}

#[test]
fn oracle_and_odbc() {
    let env = Env::new();
    env.marker(".odbc.ini");
    env.marker(".oracle.ini");
    env.server.mock(|when, then| {
        when.method(GET).path("/instantclient_11_2_with_libaio_oci8.tar.gz");
        then.status(200).body(tarball(&[("libclntsh.so.11.1", "elf")]));
    });
    env.server.mock(|when, then| {
        when.method(GET).path("/unixodbc.tar.gz");
        then.status(200).body(tarball(&[("lib/libodbc.so.2", "elf")]));
    });

    let mut sink: HashMap<String, String> = HashMap::new();
    let report = provision(env.root(), &env.settings(), &mut sink).unwrap();

    assert_eq!(report.active, vec!["oracle", "unixodbc"]);

    let oracle = env.release_dir("instant_client_11_2").display().to_string();
    let odbc = env.release_dir("unixodbc").display().to_string();
    let expected_tail = format!("{}:{}:{}/lib", oracle, odbc, odbc);
    assert!(
        sink["LD_LIBRARY_PATH"].ends_with(&expected_tail),
        "unexpected library path: {}",
        sink["LD_LIBRARY_PATH"]
    );
    assert_eq!(sink["NLS_LANG"], "AMERICAN_AMERICA.UTF8");

    let doc = BuildConfigDocument::load(&BuildConfigDocument::path_for(env.root())).unwrap();
    assert!(doc.contains_key("BUNDLE_BUILD__RUBY-OCI8"));
    assert!(doc.contains_key("BUNDLE_BUILD__RUBY-ODBC"));
    assert!(!doc.contains_key("BUNDLE_BUILD__TINY_TDS"));
}

#[test]
fn fetch_failure_leaves_environment_and_config_untouched() {
    let env = Env::new();
    env.marker(".freetds.conf");
    env.server.mock(|when, then| {
        when.method(GET).path("/freetds.tar.gz");
        then.status(500).body("Internal Server Error");
    });

    let mut sink: HashMap<String, String> = HashMap::new();
    let err = provision(env.root(), &env.settings(), &mut sink).unwrap_err();

    match &err {
        ProvisionError::PackageFetchFailed { profile, step, .. } => {
            assert_eq!(profile, "freetds");
            assert_eq!(*step, InstallStep::Download);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(err.to_string().contains("500"));
    assert!(sink.is_empty());
    assert!(!BuildConfigDocument::path_for(env.root()).exists());
}

#[test]
fn corrupt_archive_is_extract_failure() {
    let env = Env::new();
    env.marker(".odbc.ini");
    env.server.mock(|when, then| {
        when.method(GET).path("/unixodbc.tar.gz");
        then.status(200).body("this is not gzip");
    });

    let mut sink: HashMap<String, String> = HashMap::new();
    let err = provision(env.root(), &env.settings(), &mut sink).unwrap_err();

    assert!(matches!(
        err,
        ProvisionError::PackageFetchFailed {
            step: InstallStep::Extract,
            ..
        }
    ));
    assert!(sink.is_empty());
}

#[test]
fn repeated_builds_are_idempotent() {
    let env = Env::new();
    env.marker(".freetds.conf");
    let archive = env.server.mock(|when, then| {
        when.method(GET).path("/freetds.tar.gz");
        then.status(200).body(tarball(&[("lib/libsybdb.so.5", "elf")]));
    });

    let settings = env.settings();
    let mut sink: HashMap<String, String> = HashMap::new();
    provision(env.root(), &settings, &mut sink).unwrap();
    let second = provision(env.root(), &settings, &mut sink).unwrap();

    archive.assert_calls(2);
    assert_eq!(second.skipped(), vec!["freetds"]);

    let content = fs::read_to_string(BuildConfigDocument::path_for(env.root())).unwrap();
    let lines = content
        .lines()
        .filter(|l| l.starts_with("BUNDLE_BUILD__TINY_TDS:"))
        .count();
    assert_eq!(lines, 1);
}

#[test]
fn completion_marker_reinstalls_partial_directory() {
    let env = Env::new();
    env.marker(".freetds.conf");
    fs::create_dir_all(env.release_dir("freetds")).unwrap();
    fs::write(env.release_dir("freetds").join("leftover"), "").unwrap();
    let archive = env.server.mock(|when, then| {
        when.method(GET).path("/freetds.tar.gz");
        then.status(200).body(tarball(&[("lib/libsybdb.so.5", "elf")]));
    });

    let settings = env
        .settings()
        .with_idempotency(IdempotencyCheck::CompletionMarker);
    let mut sink: HashMap<String, String> = HashMap::new();
    let report = provision(env.root(), &settings, &mut sink).unwrap();

    archive.assert_calls(2);
    assert_eq!(report.installed(), vec!["freetds"]);
    assert!(env.release_dir("freetds").join(INSTALL_MARKER).is_file());
}

#[test]
fn overrides_file_points_at_mirror() {
    let env = Env::new();
    env.marker(".oracle.ini");
    fs::write(
        env.root().join(".native-deps.yml"),
        format!(
            "profiles:\n  oracle:\n    archive_url: {}\n",
            env.server.url("/mirror/oracle.tgz")
        ),
    )
    .unwrap();
    let mirror = env.server.mock(|when, then| {
        when.method(GET).path("/mirror/oracle.tgz");
        then.status(200).body(tarball(&[("libocci.so.11.1", "elf")]));
    });

    let mut sink: HashMap<String, String> = HashMap::new();
    provision(env.root(), &env.settings(), &mut sink).unwrap();

    mirror.assert_calls(2);
    assert!(env.root().join("vendor/instant_client_11_2/libocci.so.11.1").is_file());
}
