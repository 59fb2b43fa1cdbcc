// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for the TestLodge integration (API seam and pagination)
// role: testlodge/namespace
// outputs: Public submodules api and paginate
// invariants: All network access to TestLodge goes through TestLodgeApi
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod paginate;
