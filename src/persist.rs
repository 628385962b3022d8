use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Read a JSON object file into a map. A missing file is an empty object so
/// first runs work against a bare checkout.
pub fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("invalid json in {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("{} is not a json object", path.display()),
    }
}

/// Pretty-print with 2-space indent and a trailing newline, the format the
/// site generator expects to diff cleanly.
pub fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut out =
        serde_json::to_string_pretty(value).context("json serialization failed")?;
    out.push('\n');
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed creating {}", dir.display()))?;
    }
    fs::write(path, out).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}
