use super::common::{NOW, report_cmd, sheet, workbook_copy};

#[test]
fn log_appends_a_timestamped_row() {
  let dir = test_support::tempdir();
  let wb = workbook_copy(dir.path());

  let out = report_cmd(&wb)
    .args(["log", "--function", "generateChangelog", "--message", "started", "--context", r#"{"datespan":7}"#])
    .output()
    .unwrap();
  assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

  let rows = sheet(&wb, "Logs");
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0][0], NOW.replace("Z", ".000Z"));
  assert_eq!(rows[0][1], "generateChangelog");
  assert_eq!(rows[0][2], "started");
  assert_eq!(rows[0][3], r#"{"datespan":7}"#);
}

#[test]
fn log_rejects_non_json_context() {
  let dir = test_support::tempdir();
  let wb = workbook_copy(dir.path());

  let out = report_cmd(&wb)
    .args(["log", "--function", "f", "--message", "m", "--context", "{oops"])
    .output()
    .unwrap();
  assert!(!out.status.success());
  assert!(sheet(&wb, "Logs").is_empty());
}
