//! `validate-index` — check every entry of a registry index.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use packidx_index::Diagnostics;

/// Validate the index at `path`.
///
/// Violations are written to `err` as they are found, followed by a failure
/// line; a clean index writes one success line to `out`. Returns the exit
/// status. Load failures are returned as errors before anything is written.
pub fn run(path: &Path, out: &mut dyn Write, err: &mut dyn Write) -> Result<u8> {
    let entries = packidx_index::load(path)?;
    tracing::info!(path = %path.display(), entries = entries.len(), "validating index");

    let mut diagnostics = Diagnostics::new(&mut *err);
    packidx_index::validate_index(&entries, &mut diagnostics);
    let summary = diagnostics.finish(entries.len());

    if summary.passed() {
        writeln!(out, "{summary}")?;
    } else {
        writeln!(err, "{summary}")?;
    }
    Ok(summary.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, version: &str) -> serde_json::Value {
        json!({
            "id": id,
            "tool": "codex",
            "version": version,
            "description": "Framework mappings",
            "signer": "release@example.com",
            "frameworks": ["soc2"],
            "mappingIds": ["soc2-cc6"],
            "packUrl": "https://packs.example.com/p.tgz",
            "publicKeyUrl": "https://packs.example.com/key.pem",
            "sha256": "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            "source": "community",
            "createdAt": "2024-03-01",
        })
    }

    fn run_on(doc: &str) -> (Result<u8>, String, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, doc).unwrap();

        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let code = run(&path, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn valid_index_writes_success_to_out() {
        let doc = json!([entry("a", "1.0.0"), entry("b", "1.0.0")]).to_string();
        let (code, out, err) = run_on(&doc);
        assert_eq!(code.unwrap(), 0);
        assert_eq!(out, "index OK: 2 entries validated\n");
        assert!(err.is_empty());
    }

    #[test]
    fn violations_then_failure_line_on_err() {
        let mut bad = entry("a", "1.0.0");
        bad["packUrl"] = json!("http://packs.example.com/p.tgz");
        let doc = json!([bad, entry("a", "1.0.0")]).to_string();

        let (code, out, err) = run_on(&doc);
        assert_eq!(code.unwrap(), 1);
        assert!(out.is_empty());
        let lines: Vec<_> = err.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("entry 0: packUrl"));
        assert!(lines[1].starts_with("entry 1: duplicate id@version"));
        assert!(lines[2].starts_with("index validation failed"));
    }

    #[test]
    fn load_failure_is_an_error_without_output() {
        let (code, out, err) = run_on("{\"not\": \"an array\"}");
        assert!(code.is_err());
        assert!(out.is_empty());
        assert!(err.is_empty());
    }
}
