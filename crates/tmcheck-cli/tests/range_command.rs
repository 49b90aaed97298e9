use anyhow::Result;
use tmcheck_testing::TestWorld;
use tmcheck_testing::assertions::{assert_csv_report, assert_parameter_status, assert_record_count};

const RANGE_ARGS: [&str; 7] = [
    "range",
    "--config",
    "eps_config.json",
    "--expected",
    "eps_expected.json",
    "--log",
    "eps_test.log",
];

#[test]
fn test_range_json_report() -> Result<()> {
    let world = TestWorld::new().with_eps_samples();

    let mut args = vec!["--format", "json"];
    args.extend(RANGE_ARGS);
    let result = world.run(&args)?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let json = result.json()?;
    assert_eq!(json["content"]["mode"], "range");
    assert_record_count(&json, 5)?;
    assert_parameter_status(&json, "Battery Voltage", "MATCHED")?;
    assert_parameter_status(&json, "Battery Current", "MISMATCH")?;
    assert_parameter_status(&json, "Board Temp", "MATCHED")?;
    assert_parameter_status(&json, "Bus Voltage", "NOT PRESENT")?;
    Ok(())
}

#[test]
fn test_range_writes_csv_report() -> Result<()> {
    let world = TestWorld::new().with_eps_samples();

    let mut args = RANGE_ARGS.to_vec();
    args.extend(["--output", "reports/eps_result.csv"]);
    let result = world.run(&args)?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Results saved to"));
    assert_csv_report(
        &world.path("reports/eps_result.csv"),
        &tmcheck_engine::RANGE_COLUMNS,
        5,
    )?;
    Ok(())
}

#[test]
fn test_range_accepts_yaml_expectations() -> Result<()> {
    let world = TestWorld::new().with_eps_samples();

    let result = world.run(&[
        "--format",
        "json",
        "range",
        "--config",
        "eps_config.json",
        "--expected",
        "eps_expected.yaml",
        "--log",
        "eps_test.log",
    ])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let json = result.json()?;
    assert_record_count(&json, 5)?;
    assert_parameter_status(&json, "Battery Current", "MISMATCH")?;
    assert_parameter_status(&json, "Bus Voltage", "NOT PRESENT")?;
    Ok(())
}

#[test]
fn test_range_plain_output_has_summary() -> Result<()> {
    let world = TestWorld::new().with_eps_samples();

    let result = world.run(&RANGE_ARGS)?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().starts_with("Parameter"));
    assert!(result.stdout().contains("5 rows: 3 passed, 2 failed"));
    Ok(())
}

#[test]
fn test_boundary_values_match() -> Result<()> {
    let world = TestWorld::new();
    world.write_file("config.json", r#"{"A1": ["Temp", "Volt"]}"#)?;
    world.write_file(
        "expected.json",
        r#"{"Temp": {"min": 10, "max": 20}, "Volt": {"min": 10, "max": 20}}"#,
    )?;
    world.write_file("test.log", "Temp 10\nVolt 20.0\n")?;

    let result = world.run(&[
        "--format",
        "json",
        "range",
        "--config",
        "config.json",
        "--expected",
        "expected.json",
        "--log",
        "test.log",
    ])?;

    let json = result.json()?;
    assert_parameter_status(&json, "Temp", "MATCHED")?;
    assert_parameter_status(&json, "Volt", "MATCHED")?;
    Ok(())
}
