use serde_json::json;

use super::common::{report_cmd, sheet, workbook_copy};

#[test]
fn changelog_rewrites_sheet_sorted_newest_first() {
  let dir = test_support::tempdir();
  let wb = workbook_copy(dir.path());

  let out = report_cmd(&wb).arg("changelog").output().unwrap();
  assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

  let pointer: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(pointer["sheet"], "TestLodge Changelog");
  assert_eq!(pointer["rows"], 4);

  let rows = sheet(&wb, "TestLodge Changelog");
  assert_eq!(rows.len(), 5, "header + 4 events, stale rows gone: {:?}", rows);
  assert_eq!(rows[0][0], "Test Run ID");
  assert_eq!(rows[0][7], "Detail");

  let ids: Vec<&str> = rows[1..].iter().map(|r| r[0].as_str().unwrap()).collect();
  assert_eq!(ids, ["testlodge-1003", "testlodge-501", "testlodge-1001", "testlodge-1001"]);

  assert_eq!(
    rows[1],
    json!([
      "testlodge-1003",
      "2025-08-14 16:30:00",
      "testlodge",
      "12 | Checkout",
      "Alpha",
      "Bob Stone*",
      "Caso de teste 3 atualizado",
      "Caso de teste: 3 | Refund flow [automatizado]"
    ])
  );
  assert_eq!(rows[2][5], "Bob Stone*");
  assert_eq!(rows[2][6], "Regressão realizada: Checkout");
  assert_eq!(
    rows[2][7],
    "Checkout | Regression 42 | Passaram: 10, Incompletos: 2, Ignorados: 0, Falharam: 1 | 13/08/2025 15:45"
  );
  assert_eq!(rows[3][6], "Caso de teste 1 atualizado");
  assert_eq!(rows[4][6], "Caso de teste 1 criado");
  assert_eq!(rows[4][5], "Jane D.");
}

#[test]
fn datespan_flag_widens_the_window() {
  let dir = test_support::tempdir();
  let wb = workbook_copy(dir.path());

  let out = report_cmd(&wb).args(["changelog", "--datespan", "60"]).output().unwrap();
  assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

  let rows = sheet(&wb, "TestLodge Changelog");
  // Adds the 2025-07-01 run to the four events of the default week.
  assert_eq!(rows.len(), 6);
  assert_eq!(rows[5][0], "testlodge-502");
}

#[test]
fn empty_window_leaves_only_the_header() {
  let dir = test_support::tempdir();
  let wb = workbook_copy(dir.path());

  let out = report_cmd(&wb)
    .args(["changelog", "--datespan", "0"])
    .output()
    .unwrap();
  assert!(out.status.success());

  let rows = sheet(&wb, "TestLodge Changelog");
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].as_array().unwrap().len(), 8);
}
