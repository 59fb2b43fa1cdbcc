use serde_json::json;

use super::common::{report_cmd, sheet, workbook_copy};

#[test]
fn summary_counts_tags_per_project() {
  let dir = test_support::tempdir();
  let wb = workbook_copy(dir.path());

  let out = report_cmd(&wb).arg("summary").output().unwrap();
  assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

  let rows = sheet(&wb, "TestLodge");
  assert_eq!(rows.len(), 3);
  assert_eq!(rows[0][7], "Core & Automated Test Cases");
  assert_eq!(
    rows[1],
    json!([12.0, "Checkout", "2024-03-01 10:00:00", "Alpha", 3.0, 2.0, 2.0, 1.0])
  );
  assert_eq!(
    rows[2],
    json!([34.0, "Search", "2024-06-01 10:00:00", "Beta", 0.0, 0.0, 0.0, 0.0])
  );
}

#[test]
fn summary_leaves_other_sheets_alone() {
  let dir = test_support::tempdir();
  let wb = workbook_copy(dir.path());
  let fixture: serde_json::Value = test_support::read_fixture_json("workbook.json");

  report_cmd(&wb).arg("summary").assert().success();

  for untouched in ["TestLodge Changelog", "Users", "Logs"] {
    assert_eq!(
      serde_json::Value::Array(sheet(&wb, untouched)),
      fixture["sheets"][untouched],
      "{} changed",
      untouched
    );
  }
}
