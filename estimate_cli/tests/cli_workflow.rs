//! Command workflows against a throwaway settings file.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use clap::Parser;
use estimate_cli::cli::Cli;
use estimate_cli::commands::execute;
use estimate_cli::error::Error;
use estimate_core::{load_settings, ConcreteGrade, UnitPrices};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("concrete_estimate_{}_{}", std::process::id(), name))
}

fn run(args: &[&str]) -> Result<(), Error> {
    let mut argv = vec!["concrete-estimate"];
    argv.extend_from_slice(args);
    execute(Cli::try_parse_from(argv).expect("arguments parse"))
}

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_concrete-estimate"))
        .args(args)
        .output()
        .expect("binary runs")
}

fn parse_stdout(output: &Output) -> serde_json::Value {
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!("stdout is not JSON ({}): {}", e, String::from_utf8_lossy(&output.stdout))
    })
}

#[test]
fn json_config_output_is_a_single_document() {
    let settings = temp_path("json_config.json");
    let settings_arg = settings.to_str().unwrap();

    let reset = parse_stdout(&run_binary(&["--settings", settings_arg, "--format", "json", "config", "reset"]));
    assert_eq!(reset["report"]["currency_symbol"], "₽");

    let output = run_binary(&["--settings", settings_arg, "--format", "json", "config", "set-currency", "EUR"]);
    let updated = parse_stdout(&output);
    assert_eq!(updated["report"]["currency_symbol"], "EUR");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Settings updated"));

    let shown = parse_stdout(&run_binary(&["--settings", settings_arg, "--format", "json", "config", "show"]));
    assert_eq!(shown["report"]["currency_symbol"], "EUR");

    let _ = fs::remove_file(&settings);
}

#[test]
fn json_calculate_with_report_is_a_single_document() {
    let settings = temp_path("json_calc.json");
    let report = temp_path("json_calc_report.txt");

    let output = run_binary(&[
        "--settings",
        settings.to_str().unwrap(),
        "--format",
        "json",
        "calculate",
        "--length",
        "0,5",
        "--width",
        "0.25",
        "--height",
        "0.25",
        "--report",
        report.to_str().unwrap(),
    ]);
    let result = parse_stdout(&output);
    assert_eq!(result["cement_kg"], 12.5);

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("- Cement: 13 kg (0.3 bags)"));

    let _ = fs::remove_file(&report);
}

#[test]
fn config_changes_persist() {
    let settings = temp_path("config.json");
    let settings_arg = settings.to_str().unwrap();

    run(&["--settings", settings_arg, "config", "set-prices", "--cement", "500", "--gravel", "1750,5"]).unwrap();
    run(&["--settings", settings_arg, "config", "set-grade", "M400"]).unwrap();
    run(&["--settings", settings_arg, "config", "set-currency", "EUR"]).unwrap();

    let saved = load_settings(&settings).unwrap();
    assert_eq!(saved.prices, UnitPrices::new(500.0, 1200.0, 1750.5));
    assert_eq!(saved.default_grade, ConcreteGrade::M400);
    assert_eq!(saved.report.currency_symbol, "EUR");

    run(&["--settings", settings_arg, "config", "reset"]).unwrap();
    let reset = load_settings(&settings).unwrap();
    assert_eq!(reset.prices, UnitPrices::default());

    let _ = fs::remove_file(&settings);
}

#[test]
fn bad_price_setting_is_rejected() {
    let settings = temp_path("bad_price.json");
    let settings_arg = settings.to_str().unwrap();

    let err = run(&["--settings", settings_arg, "config", "set-prices", "--sand", "-10"]).unwrap_err();
    assert!(matches!(err, Error::Calc(ref e) if e.error_code() == "INVALID_PRICE"));
    assert!(!settings.exists());
}

#[test]
fn calculate_writes_text_report() {
    let settings = temp_path("calc.json");
    let report = temp_path("report.txt");

    run(&[
        "--settings",
        settings.to_str().unwrap(),
        "--format",
        "json",
        "calculate",
        "--length",
        "2",
        "--width",
        "3",
        "--height",
        "0.5",
        "--label",
        "Garage floor",
        "--report",
        report.to_str().unwrap(),
        "--reference",
    ])
    .unwrap();

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("Object: Garage floor"));
    assert!(text.contains("TOTAL: 21528 ₽"));
    assert!(text.contains("REFERENCE:"));

    let _ = fs::remove_file(&report);
}

#[test]
fn calculate_with_zero_dimension_fails() {
    let settings = temp_path("zero.json");
    let err = run(&[
        "--settings",
        settings.to_str().unwrap(),
        "calculate",
        "--length",
        "2",
        "--width",
        "0",
        "--height",
        "0.5",
    ])
    .unwrap_err();
    assert!(matches!(err, Error::IncompleteDimensions));
}
