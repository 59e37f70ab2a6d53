//! Library integration tests.

use native_deps::ProvisionError;

#[test]
fn error_types_are_public() {
    let err = ProvisionError::ConfigWriteFailed {
        path: "/app/.bundle/config".into(),
        message: "disk full".into(),
    };
    assert!(err.to_string().contains("/app/.bundle/config"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> native_deps::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use native_deps::cli::{Cli, Commands};

    let cli = Cli::parse_from(["native-deps", "detect", "/tmp/build", "--json"]);

    if let Commands::Detect(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Detect command");
    }
}

#[test]
fn builtin_profiles_are_public() {
    use native_deps::profile::BUILTIN_PROFILES;

    let markers: Vec<&str> = BUILTIN_PROFILES.iter().map(|p| p.trigger_marker).collect();
    assert_eq!(markers, vec![".oracle.ini", ".freetds.conf", ".odbc.ini"]);
}
