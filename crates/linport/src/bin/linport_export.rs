//! Generate a fixed-shape inference artifact from a trained linear model.
//!
//! Usage:
//!   cargo run --features cli --bin linport-export -- (--model PATH | --legacy PATH) \[options\]
//!
//! Inputs (exactly one):
//!   --model PATH         Upstream JSON export ({"coef_": [...], "intercept_": ...})
//!   --legacy PATH        Legacy Eloquent-style Arduino header to migrate
//!
//! Options:
//!   --target TARGET      rust (default) | arduino
//!   --precision N        Fixed digits after the decimal point (default: exact)
//!   --name IDENT         Model name (default: LinearRegression)
//!   --namespace IDENT    C++ namespace for arduino (default: Linport)
//!   --crate-path PATH    Runtime crate path for rust (default: linport)
//!   --out PATH           Output file, or a directory to write
//!                        `linear_regression.rs` / `LinearRegression.h` into
//!                        (default: stdout)
//!
//! Exit codes: 0 on success, 1 if the export fails, 2 on bad arguments.
//!
//! Examples:
//!   # Regenerate a legacy header in the fixed-shape format
//!   cargo run --features cli --bin linport-export -- \
//!       --legacy LinearRegression.h --target arduino --precision 8 --out firmware/
//!
//!   # Rust module for an embedded crate
//!   RUST_LOG=debug cargo run --features cli --bin linport-export -- \
//!       --model best_model.json --name IrrigationModel --out src/model.rs

use std::path::PathBuf;
use std::process::ExitCode;

use linport::compat::eloquent;
use linport::export::{
    render, write_artifact, ExportConfig, ExportError, ModelDescriptor, Target, TrainedModel,
};

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(Debug, PartialEq)]
enum Input {
    Model(PathBuf),
    Legacy(PathBuf),
}

#[derive(Debug)]
struct Args {
    input: Input,
    config: ExportConfig,
    out: Option<PathBuf>,
}

fn print_help() {
    eprintln!(
        "linport-export (--model PATH | --legacy PATH) [--target rust|arduino] \
         [--precision N] [--name IDENT] [--namespace IDENT] [--crate-path PATH] [--out PATH]"
    );
}

/// Parse command-line arguments (without the program name).
///
/// Returns `Ok(None)` when help was requested.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<Args>, String> {
    let mut model: Option<PathBuf> = None;
    let mut legacy: Option<PathBuf> = None;
    let mut target = Target::default();
    let mut precision: Option<usize> = None;
    let mut name: Option<String> = None;
    let mut namespace: Option<String> = None;
    let mut crate_path: Option<String> = None;
    let mut out: Option<PathBuf> = None;

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        let mut value = |flag: &str| it.next().ok_or_else(|| format!("{flag} requires a value"));
        match arg.as_str() {
            "--model" => model = Some(PathBuf::from(value("--model")?)),
            "--legacy" => legacy = Some(PathBuf::from(value("--legacy")?)),
            "--target" => target = value("--target")?.parse().map_err(|e| format!("{e}"))?,
            "--precision" => {
                let v = value("--precision")?;
                precision = Some(v.parse().map_err(|_| format!("invalid --precision: {v}"))?);
            }
            "--name" => name = Some(value("--name")?),
            "--namespace" => namespace = Some(value("--namespace")?),
            "--crate-path" => crate_path = Some(value("--crate-path")?),
            "--out" => out = Some(PathBuf::from(value("--out")?)),
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown arg: {other}")),
        }
    }

    let input = match (model, legacy) {
        (Some(path), None) => Input::Model(path),
        (None, Some(path)) => Input::Legacy(path),
        _ => return Err("provide exactly one of --model / --legacy".to_string()),
    };

    let builder = ExportConfig::builder()
        .target(target)
        .maybe_precision(precision)
        .maybe_name(name)
        .maybe_namespace(namespace)
        .maybe_crate_path(crate_path);
    let config = builder.build().map_err(|e| e.to_string())?;

    Ok(Some(Args { input, config, out }))
}

fn run(args: Args) -> Result<(), ExportError> {
    let descriptor = match &args.input {
        Input::Model(path) => ModelDescriptor::from_trained(&TrainedModel::from_path(path)?)?,
        Input::Legacy(path) => eloquent::read_path(path)?.to_descriptor()?,
    };
    log::info!(
        "exporting {} features as {}",
        descriptor.n_features(),
        args.config.target
    );

    match args.out {
        // A directory gets the conventional file name for the target
        Some(path) if path.is_dir() => {
            write_artifact(path.join(args.config.file_name()), &descriptor, &args.config)
        }
        Some(path) => write_artifact(path, &descriptor, &args.config),
        None => {
            print!("{}", render(&descriptor, &args.config));
            Ok(())
        }
    }
}

/// Parse, export and map the outcome to a process exit code.
fn cli(args: impl IntoIterator<Item = String>) -> u8 {
    let args = match parse_args(args) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help();
            return 0;
        }
        Err(msg) => {
            eprintln!("error: {msg}");
            print_help();
            return EXIT_USAGE;
        }
    };

    match run(args) {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{err}");
            EXIT_FAILURE
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    ExitCode::from(cli(std::env::args().skip(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn fixture(name: &str) -> String {
        format!("{}/tests/test-cases/{name}", env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn parse_full_command_line() {
        let parsed = parse_args(args(&[
            "--legacy", "model.h", "--target", "arduino", "--precision", "8", "--name",
            "IrrigationModel", "--namespace", "Irrigation", "--out", "out.h",
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(parsed.input, Input::Legacy(PathBuf::from("model.h")));
        assert_eq!(parsed.config.target, Target::Arduino);
        assert_eq!(parsed.config.precision, Some(8));
        assert_eq!(parsed.config.name, "IrrigationModel");
        assert_eq!(parsed.config.namespace, "Irrigation");
        assert_eq!(parsed.out, Some(PathBuf::from("out.h")));
    }

    #[test]
    fn parse_defaults() {
        let parsed = parse_args(args(&["--model", "best_model.json"])).unwrap().unwrap();
        assert_eq!(parsed.input, Input::Model(PathBuf::from("best_model.json")));
        assert_eq!(parsed.config.target, Target::Rust);
        assert_eq!(parsed.config.precision, None);
        assert_eq!(parsed.out, None);
    }

    #[rstest]
    #[case(&["--help"])]
    #[case(&["-h"])]
    #[case(&["--model", "m.json", "--help"])]
    fn help_returns_none(#[case] list: &[&str]) {
        assert!(parse_args(args(list)).unwrap().is_none());
    }

    #[rstest]
    #[case(&[], "exactly one of --model / --legacy")]
    #[case(&["--model", "m.json", "--legacy", "m.h"], "exactly one of --model / --legacy")]
    #[case(&["--model", "m.json", "--verbose"], "unknown arg: --verbose")]
    #[case(&["--model"], "--model requires a value")]
    #[case(&["--model", "m.json", "--out"], "--out requires a value")]
    #[case(&["--model", "m.json", "--precision", "eight"], "invalid --precision: eight")]
    #[case(&["--model", "m.json", "--precision", "0"], "precision must be in 1..=17")]
    #[case(&["--model", "m.json", "--target", "python"], "unknown target: python")]
    #[case(&["--model", "m.json", "--name", "class"], "reserved")]
    fn bad_arguments_are_rejected(#[case] list: &[&str], #[case] message: &str) {
        let err = parse_args(args(list)).unwrap_err();
        assert!(err.contains(message), "{err:?} does not mention {message:?}");
        assert_eq!(cli(args(list)), EXIT_USAGE);
    }

    #[test]
    fn failed_export_exits_with_failure() {
        assert_eq!(cli(args(&["--model", &fixture("upstream/missing.json")])), EXIT_FAILURE);
        assert_eq!(cli(args(&["--legacy", &fixture("legacy/regressor_drift.h")])), EXIT_FAILURE);
        assert_eq!(cli(args(&["--legacy", &fixture("legacy/template.h")])), EXIT_FAILURE);
    }

    #[test]
    fn help_exits_successfully() {
        assert_eq!(cli(args(&["--help"])), 0);
    }

    #[test]
    fn out_directory_uses_conventional_file_name() {
        let dir = std::env::temp_dir().join(format!("linport-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let out = dir.to_string_lossy().into_owned();

        let code = cli(args(&[
            "--legacy", &fixture("legacy/irrigation.h"), "--target", "arduino", "--out", &out,
        ]));
        assert_eq!(code, 0);
        let header = std::fs::read_to_string(dir.join("LinearRegression.h")).unwrap();
        assert!(header.contains("class LinearRegression {"));

        let code = cli(args(&["--model", &fixture("upstream/irrigation.json"), "--out", &out]));
        assert_eq!(code, 0);
        let module = std::fs::read_to_string(dir.join("linear_regression.rs")).unwrap();
        assert!(module.contains("pub const N_FEATURES: usize = 9;"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
