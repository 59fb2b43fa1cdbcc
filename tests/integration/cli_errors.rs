use predicates::prelude::*;
use test_support::{BIN, cmd_bin, fixtures_dir};

use super::common::{report_cmd, workbook_copy};

#[test]
fn errors_when_no_subcommand() {
  cmd_bin(BIN)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Provide a subcommand"));
}

#[test]
fn errors_when_no_workbook() {
  cmd_bin(BIN)
    .arg("summary")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no workbook given"));
}

#[test]
fn missing_credentials_fail_before_touching_the_workbook() {
  let dir = test_support::tempdir();
  let wb = workbook_copy(dir.path());
  let before = std::fs::read_to_string(&wb).unwrap();

  cmd_bin(BIN)
    .env_remove("TLR_TEST_API_JSON")
    .env_remove("TESTLODGE_API_EMAIL")
    .env_remove("TESTLODGE_API_TOKEN")
    .args(["--config", fixtures_dir().join("config.json").to_str().unwrap()])
    .args(["--workbook", wb.to_str().unwrap(), "summary"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("api_email"));

  assert_eq!(std::fs::read_to_string(&wb).unwrap(), before);
}

#[test]
fn missing_squad_sheet_names_the_sheet() {
  let dir = test_support::tempdir();
  let wb = dir.path().join("workbook.json");
  std::fs::write(&wb, r#"{ "sheets": { "TestLodge": [] } }"#).unwrap();

  report_cmd(&wb)
    .arg("summary")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Sheet not found: TestLodge Squads"));
}

#[test]
fn empty_squad_mapping_is_reported() {
  let dir = test_support::tempdir();
  let wb = dir.path().join("workbook.json");
  std::fs::write(&wb, r#"{ "sheets": { "TestLodge": [], "TestLodge Squads": [["Project ID", "Squad"]] } }"#).unwrap();

  report_cmd(&wb)
    .arg("summary")
    .assert()
    .failure()
    .stderr(predicate::str::contains("TestLodge squad mapping data is empty or could not be retrieved"));
}
