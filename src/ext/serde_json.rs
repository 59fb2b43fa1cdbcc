// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path access into API envelopes and typed extraction of item arrays from serde_json::Value
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper (to, is_null, list)
// invariants: No panics; a missing path reads as absent; list() reports the first bad element by index
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;

/// A location inside a JSON document, possibly absent.
pub struct JsonFetched<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  pub fn exists(&self) -> bool {
    self.inner.is_some()
  }

  /// Absent paths and explicit `null` both count.
  pub fn is_null(&self) -> bool {
    self.inner.map(|v| v.is_null()).unwrap_or(true)
  }

  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  /// Deserialize every element of an array; absent or `null` yields an empty list.
  pub fn list<T>(&self) -> Result<Vec<T>, String>
  where
    T: DeserializeOwned,
  {
    let Some(v) = self.inner.filter(|v| !v.is_null()) else {
      return Ok(Vec::new());
    };
    let arr = v.as_array().ok_or_else(|| "expected an array".to_string())?;

    arr
      .iter()
      .enumerate()
      .map(|(i, item)| serde_json::from_value::<T>(item.clone()).map_err(|e| format!("item {}: {}", i, e)))
      .collect()
  }
}

/// Fetch nested values via dotted paths like "pagination.next_page".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}
