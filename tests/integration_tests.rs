//! Integration tests for the SQT CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to get an sqt command
fn sqt() -> Command {
    let mut cmd = Command::cargo_bin("sqt").unwrap();
    cmd.env("SQT_AUTHOR", "tester").env_remove("SQT_LOG");
    cmd
}

/// Helper to create a test project in a temp directory
fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    sqt().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

/// Run a creating command and return the short ID from its "Created" line
fn create(tmp: &TempDir, args: &[&str]) -> String {
    let output = sqt().current_dir(tmp.path()).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find(|l| l.contains("Created"))
        .and_then(|l| l.split_whitespace().find(|w| w.contains('@')))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn create_parameter(tmp: &TempDir) -> String {
    create(
        tmp,
        &["param", "new", "--name", "Fill Volume", "--usl", "110", "--lsl", "90", "--unit", "ml"],
    )
}

fn record_files(dir: &Path) -> Vec<std::path::PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.to_string_lossy().ends_with(".sqt.yaml"))
        .collect()
}

fn read_only_record(dir: &Path) -> String {
    let files = record_files(dir);
    assert_eq!(files.len(), 1, "expected exactly one record in {}", dir.display());
    fs::read_to_string(&files[0]).unwrap()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    sqt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SPC Quality Toolkit"));
}

#[test]
fn test_version_displays() {
    sqt()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sqt"));
}

#[test]
fn test_outside_project_fails() {
    let tmp = TempDir::new().unwrap();
    sqt()
        .current_dir(tmp.path())
        .args(["param", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an SQT project"));
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_creates_project_structure() {
    let tmp = TempDir::new().unwrap();

    sqt()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized SQT project"));

    assert!(tmp.path().join(".sqt/config.yaml").exists());
    assert!(tmp.path().join("spc/parameters").is_dir());
    assert!(tmp.path().join("spc/data").is_dir());
    assert!(tmp.path().join("quality/capas").is_dir());
    assert!(tmp.path().join("manufacturing/batches").is_dir());
}

#[test]
fn test_init_twice_warns() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

// ============================================================================
// Parameter Tests
// ============================================================================

#[test]
fn test_param_new_and_list() {
    let tmp = setup_test_project();
    let short = create_parameter(&tmp);
    assert_eq!(short, "PARAM@1");

    let content = read_only_record(&tmp.path().join("spc/parameters"));
    assert!(content.contains("parameter_name: Fill Volume"));

    sqt()
        .current_dir(tmp.path())
        .args(["param", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fill Volume"))
        .stdout(predicate::str::contains("PARAM@1"));

    sqt()
        .current_dir(tmp.path())
        .args(["param", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

#[test]
fn test_param_inverted_spec_limits_rejected() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .args(["param", "new", "--name", "Torque", "--usl", "5", "--lsl", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Upper Specification Limit must be greater than Lower Specification Limit",
        ));

    assert!(record_files(&tmp.path().join("spc/parameters")).is_empty());
}

#[test]
fn test_param_show_json() {
    let tmp = setup_test_project();
    create_parameter(&tmp);

    sqt()
        .current_dir(tmp.path())
        .args(["param", "show", "PARAM@1", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"parameter_name\": \"Fill Volume\""));
}

// ============================================================================
// Data Point Tests
// ============================================================================

#[test]
fn test_data_point_quality_status() {
    let tmp = setup_test_project();
    create_parameter(&tmp);

    for (value, status) in [("100", "normal"), ("109", "warning"), ("120", "critical"), ("90", "warning")] {
        sqt()
            .current_dir(tmp.path())
            .args(["data", "new", "--parameter", "PARAM@1", "--value", value])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("Status: {}", status)));
    }

    sqt()
        .current_dir(tmp.path())
        .args(["data", "list", "--status", "warning", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));
}

#[test]
fn test_data_point_without_limits_stays_pending() {
    let tmp = setup_test_project();
    create(&tmp, &["param", "new", "--name", "Operator Remarks"]);

    sqt()
        .current_dir(tmp.path())
        .args(["data", "new", "--parameter", "PARAM@1", "--value", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: pending"));
}

#[test]
fn test_data_point_missing_parameter_is_unknown() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .args(["data", "new", "--parameter", "PARAM-01HQ3K5Z8Y7X6W5V4T3S2R1Q0P", "--value", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quality status could not be assessed"))
        .stdout(predicate::str::contains("Status: unknown"));
}

#[test]
fn test_data_partial_parameter_id_is_stored_in_full() {
    let tmp = setup_test_project();
    create_parameter(&tmp);
    let param_file = read_only_record(&tmp.path().join("spc/parameters"));
    let param_id = param_file
        .lines()
        .find_map(|l| l.strip_prefix("id: "))
        .unwrap()
        .to_string();

    sqt()
        .current_dir(tmp.path())
        .args(["data", "new", "--parameter", "PARAM-", "--value", "125"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: critical"));

    let point = read_only_record(&tmp.path().join("spc/data"));
    assert!(point.contains(&format!("parameter: {}", param_id)));
}

#[test]
fn test_data_ambiguous_partial_parameter_fails() {
    let tmp = setup_test_project();
    create_parameter(&tmp);
    create(&tmp, &["param", "new", "--name", "Cap Torque"]);

    sqt()
        .current_dir(tmp.path())
        .args(["data", "new", "--parameter", "PARAM-", "--value", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("matches 2"));
}

#[test]
fn test_stored_fragment_reference_is_unknown() {
    let tmp = setup_test_project();
    create_parameter(&tmp);

    fs::write(
        tmp.path().join("spc/data/DATA-01HQ3K5Z8Y7X6W5V4T3S2R1Q0P.sqt.yaml"),
        "id: DATA-01HQ3K5Z8Y7X6W5V4T3S2R1Q0P\n\
         parameter: PARAM-\n\
         data_value: 125.0\n\
         timestamp: 2024-03-10T08:00:00Z\n\
         created: 2024-03-10T08:00:00Z\n\
         author: tester\n",
    )
    .unwrap();

    sqt()
        .current_dir(tmp.path())
        .args(["validate", "--fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quality status could not be assessed"));

    let content = read_only_record(&tmp.path().join("spc/data"));
    assert!(content.contains("quality_status: unknown"));
}

#[test]
fn test_data_nan_value_rejected() {
    let tmp = setup_test_project();
    create_parameter(&tmp);

    sqt()
        .current_dir(tmp.path())
        .args(["data", "new", "--parameter", "PARAM@1", "--value", "NaN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Data Value must be a finite number"));

    assert!(record_files(&tmp.path().join("spc/data")).is_empty());
}

#[test]
fn test_param_infinite_limit_rejected() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .args(["param", "new", "--name", "Fill", "--usl", "inf", "--lsl", "90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a finite number"));
}

#[test]
fn test_data_unknown_short_id_fails() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .args(["data", "new", "--parameter", "PARAM@9", "--value", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown short ID"));
}

#[test]
fn test_data_import_csv() {
    let tmp = setup_test_project();
    create_parameter(&tmp);

    let csv_path = tmp.path().join("points.csv");
    fs::write(
        &csv_path,
        "parameter,value,batch\nPARAM@1,100,B-1\nPARAM@1,125,B-1\nPARAM@1,not-a-number,B-2\n",
    )
    .unwrap();

    sqt()
        .current_dir(tmp.path())
        .args(["data", "import", "points.csv", "--skip-errors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Import Summary"));

    assert_eq!(record_files(&tmp.path().join("spc/data")).len(), 2);

    sqt()
        .current_dir(tmp.path())
        .args(["data", "list", "--status", "critical", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

#[test]
fn test_data_import_dry_run_writes_nothing() {
    let tmp = setup_test_project();
    create_parameter(&tmp);

    let csv_path = tmp.path().join("points.csv");
    fs::write(&csv_path, "parameter,value\nPARAM@1,100\n").unwrap();

    sqt()
        .current_dir(tmp.path())
        .args(["data", "import", "points.csv", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create"));

    assert!(record_files(&tmp.path().join("spc/data")).is_empty());
}

// ============================================================================
// Control Chart Tests
// ============================================================================

#[test]
fn test_chart_inverted_control_limits_rejected() {
    let tmp = setup_test_project();
    create_parameter(&tmp);

    sqt()
        .current_dir(tmp.path())
        .args(["chart", "new", "--parameter", "PARAM@1", "--ucl", "5", "--lcl", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Upper Control Limit must be greater than Lower Control Limit",
        ));

    assert!(record_files(&tmp.path().join("spc/charts")).is_empty());
}

#[test]
fn test_chart_center_line_above_upper_rejected() {
    let tmp = setup_test_project();
    create_parameter(&tmp);

    sqt()
        .current_dir(tmp.path())
        .args([
            "chart", "new", "--parameter", "PARAM@1", "--ucl", "105", "--lcl", "95", "--cl", "106",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Center Line cannot be greater than Upper Control Limit",
        ));
}

#[test]
fn test_chart_valid_limits_saved() {
    let tmp = setup_test_project();
    create_parameter(&tmp);

    let short = create(
        &tmp,
        &[
            "chart", "new", "--parameter", "PARAM@1", "-T", "imr", "--ucl", "105", "--lcl", "95",
            "--cl", "100",
        ],
    );
    assert_eq!(short, "CHART@1");

    let content = read_only_record(&tmp.path().join("spc/charts"));
    assert!(content.contains("chart_type: im_r"));
}

// ============================================================================
// Capability Study Tests
// ============================================================================

#[test]
fn test_study_complete_sets_placeholder_indices() {
    let tmp = setup_test_project();
    create_parameter(&tmp);
    create(&tmp, &["study", "new", "--title", "Line 3 capability", "--parameter", "PARAM@1"]);

    for value in ["99.5", "100.5"] {
        sqt()
            .current_dir(tmp.path())
            .args(["study", "add-point", "STUDY@1", "--value", value])
            .assert()
            .success();
    }

    sqt()
        .current_dir(tmp.path())
        .args(["study", "complete", "STUDY@1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("placeholder values"));

    let content = read_only_record(&tmp.path().join("quality/studies"));
    assert!(content.contains("study_status: completed"));
    assert!(content.contains("completion_date:"));
    assert!(content.contains("cp_value: 1.5"));
    assert!(content.contains("cpk_value: 1.3"));
}

// ============================================================================
// Batch Tests
// ============================================================================

#[test]
fn test_batch_expiry_before_production_rejected() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .args([
            "batch",
            "new",
            "--batch-id",
            "B-100",
            "--production-date",
            "2024-03-10",
            "--expiry-date",
            "2024-03-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expiry Date cannot be before Production Date"));

    assert!(record_files(&tmp.path().join("manufacturing/batches")).is_empty());
}

#[test]
fn test_batch_negative_quantity_rejected() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .args(["batch", "new", "--batch-id", "B-101", "--quantity", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Quantity cannot be negative"));
}

#[test]
fn test_batch_item_name_populated() {
    let tmp = setup_test_project();
    create(&tmp, &["item", "new", "--name", "Widget Housing"]);

    create(&tmp, &["batch", "new", "--batch-id", "B-102", "--item", "ITEM@1"]);

    let content = read_only_record(&tmp.path().join("manufacturing/batches"));
    assert!(content.contains("item_name: Widget Housing"));
}

#[test]
fn test_batch_bulk_create_and_approve() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .args(["batch", "bulk-create", "--count", "3", "--quantity", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 3 of 3 batch(es)"));

    let files = record_files(&tmp.path().join("manufacturing/batches"));
    assert_eq!(files.len(), 3);
    let today = chrono_today();
    let all: String = files.iter().map(|f| fs::read_to_string(f).unwrap()).collect();
    assert!(all.contains(&format!("BATCH-{}-001", today)));
    assert!(all.contains(&format!("BATCH-{}-003", today)));

    sqt()
        .current_dir(tmp.path())
        .args(["batch", "approve", "BATCH@1", "BATCH@2", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Approved 2 of 2 batch(es)"));

    sqt()
        .current_dir(tmp.path())
        .args(["batch", "list", "--status", "approved", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));
}

#[test]
fn test_batch_data_point_links_batch() {
    let tmp = setup_test_project();
    create_parameter(&tmp);
    create(&tmp, &["batch", "new", "--batch-id", "B-200"]);

    sqt()
        .current_dir(tmp.path())
        .args(["batch", "data-point", "BATCH@1", "--parameter", "PARAM@1", "--value", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch: B-200 | Status: normal"));

    let content = read_only_record(&tmp.path().join("spc/data"));
    assert!(content.contains("batch_reference: BATCH-"));
}

fn chrono_today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

// ============================================================================
// Alert / CAPA Tests
// ============================================================================

#[test]
fn test_high_alert_without_assignee_advises() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .args(["alert", "new", "--title", "Fill drift", "--severity", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("please assign to appropriate personnel"));

    sqt()
        .current_dir(tmp.path())
        .args(["alert", "new", "--title", "Minor drift", "--severity", "low"])
        .assert()
        .success()
        .stdout(predicate::str::contains("please assign").not());
}

#[test]
fn test_capa_add_item_past_due_advises() {
    let tmp = setup_test_project();
    create(&tmp, &["capa", "new", "--title", "Recalibrate filler"]);

    sqt()
        .current_dir(tmp.path())
        .args([
            "capa",
            "add-item",
            "CAPA@1",
            "--description",
            "Replace nozzle",
            "--target",
            "2020-01-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Due Date is in the past"))
        .stdout(predicate::str::contains("Added action item 1"));

    let content = read_only_record(&tmp.path().join("quality/capas"));
    assert!(content.contains("capa_status: in_progress"));
    assert!(content.contains("Replace nozzle"));
}

// ============================================================================
// Operator / Config Tests
// ============================================================================

#[test]
fn test_operator_employee_name_populated() {
    let tmp = setup_test_project();
    create(&tmp, &["emp", "new", "--name", "Dana Reyes", "--department", "Filling"]);
    create(&tmp, &["opr", "new", "--code", "OP-7", "--employee", "EMP@1", "--shift", "night"]);

    let content = read_only_record(&tmp.path().join("operators"));
    assert!(content.contains("employee_name: Dana Reyes"));
}

#[test]
fn test_invalid_operator_settings_block_operator_save() {
    let tmp = setup_test_project();
    fs::write(
        tmp.path().join(".sqt/config.yaml"),
        "operators:\n  default_shift_hours: 0\n",
    )
    .unwrap();

    sqt()
        .current_dir(tmp.path())
        .args(["config", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Default Shift Hours must be greater than 0"));

    sqt()
        .current_dir(tmp.path())
        .args(["opr", "new", "--code", "OP-1"])
        .assert()
        .failure();

    assert!(record_files(&tmp.path().join("operators")).is_empty());
}

#[test]
fn test_config_show_batch_prefix() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .args(["config", "show", "batch_prefix"])
        .assert()
        .success()
        .stdout(predicate::str::diff("BATCH\n"));
}

// ============================================================================
// Report / History Tests
// ============================================================================

#[test]
fn test_report_name_generated() {
    let tmp = setup_test_project();
    create(&tmp, &["report", "new", "--type", "Weekly", "--period", "2024-W14"]);

    let content = read_only_record(&tmp.path().join("quality/reports"));
    assert!(content.contains("report_name: Weekly Report - 2024-W14"));
}

#[test]
fn test_report_summary_counts_statuses() {
    let tmp = setup_test_project();
    create_parameter(&tmp);
    for value in ["100", "120"] {
        sqt()
            .current_dir(tmp.path())
            .args(["data", "new", "--parameter", "PARAM@1", "--value", value])
            .assert()
            .success();
    }

    sqt()
        .current_dir(tmp.path())
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fill Volume"))
        .stdout(predicate::str::contains("Critical"));
}

#[test]
fn test_history_outside_limits_advises() {
    let tmp = setup_test_project();
    create(&tmp, &["batch", "new", "--batch-id", "B-300"]);

    sqt()
        .current_dir(tmp.path())
        .args([
            "hist", "new", "--batch", "BATCH@1", "--value", "12", "--lower", "1", "--upper", "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("outside control limits"));
}

// ============================================================================
// Notification Tests
// ============================================================================

#[test]
fn test_notify_default_subject() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .args(["notify", "alert-new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# New SPC Alert Created"))
        .stdout(predicate::str::contains("A new SPC quality alert has been triggered."));
}

#[test]
fn test_notify_subject_override_and_record() {
    let tmp = setup_test_project();
    create(&tmp, &["alert", "new", "--title", "Fill drift", "--severity", "low"]);

    sqt()
        .current_dir(tmp.path())
        .args(["notify", "alert-escalation", "--record", "ALRT@1", "--subject", "Line 3 escalated"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Line 3 escalated"))
        .stdout(predicate::str::contains("An SPC alert has been escalated."))
        .stdout(predicate::str::contains("Fill drift"));
}

#[test]
fn test_notify_process_capability_alias() {
    let tmp = setup_test_project();

    sqt()
        .current_dir(tmp.path())
        .args(["notify", "process-capability"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Process Capability Study Completed"));
}

// ============================================================================
// Validate Tests
// ============================================================================

#[test]
fn test_validate_clean_project() {
    let tmp = setup_test_project();
    create_parameter(&tmp);
    sqt()
        .current_dir(tmp.path())
        .args(["data", "new", "--parameter", "PARAM@1", "--value", "100"])
        .assert()
        .success();

    sqt()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All files passed validation"));
}

#[test]
fn test_validate_detects_broken_record() {
    let tmp = setup_test_project();

    fs::write(
        tmp.path().join("manufacturing/batches/BATCH-01HQ3K5Z8Y7X6W5V4T3S2R1Q0P.sqt.yaml"),
        "id: BATCH-01HQ3K5Z8Y7X6W5V4T3S2R1Q0P\n\
         batch_id: B-1\n\
         production_date: 2024-03-10\n\
         expiry_date: 2024-03-01\n\
         created: 2024-03-10T08:00:00Z\n\
         author: tester\n",
    )
    .unwrap();

    sqt()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Expiry Date cannot be before Production Date"));
}

#[test]
fn test_validate_fix_writes_quality_status() {
    let tmp = setup_test_project();
    create_parameter(&tmp);

    let param_id = String::from_utf8(
        sqt()
            .current_dir(tmp.path())
            .args(["param", "list", "-f", "id"])
            .output()
            .unwrap()
            .stdout,
    )
    .unwrap()
    .trim()
    .to_string();

    let path = tmp.path().join("spc/data/DATA-01HQ3K5Z8Y7X6W5V4T3S2R1Q0P.sqt.yaml");
    fs::write(
        &path,
        format!(
            "id: DATA-01HQ3K5Z8Y7X6W5V4T3S2R1Q0P\n\
             parameter: {}\n\
             data_value: 125.0\n\
             timestamp: 2024-03-10T08:00:00Z\n\
             created: 2024-03-10T08:00:00Z\n\
             author: tester\n",
            param_id
        ),
    )
    .unwrap();

    sqt()
        .current_dir(tmp.path())
        .args(["validate", "--fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(fixed)"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("quality_status: critical"));
}

#[test]
fn test_validate_strict_fails_on_advisory() {
    let tmp = setup_test_project();
    create(&tmp, &["alert", "new", "--title", "Fill drift", "--severity", "critical"]);

    sqt()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .success();

    sqt()
        .current_dir(tmp.path())
        .args(["validate", "--strict"])
        .assert()
        .failure();
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    sqt()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sqt"));
}
