//! Capture a report's outcome in a file.
//!
//! The file holds either the pretty JSON result or a one-line failure
//! message. The handle is flushed and closed before returning.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `outcome` to `path` and hand it back.
///
/// On `Ok` the file gets the JSON and the JSON is returned. On `Err` the file
/// gets `"<report> error: <e> Inputs: <inputs>"` and the error is returned.
pub fn capture<T, E>(path: &Path, report: &str, inputs: &str, outcome: Result<T, E>) -> Result<String>
where
    T: Serialize,
    E: Display,
{
    match outcome {
        Ok(value) => {
            let json = serde_json::to_string_pretty(&value)
                .with_context(|| format!("serialize {report} result"))?;
            write_all(path, &json)?;
            tracing::info!(report, path = %path.display(), "report written");
            Ok(json)
        }
        Err(e) => {
            let message = format!("{report} error: {e} Inputs: {inputs}\n");
            write_all(path, &message)?;
            tracing::error!(report, path = %path.display(), error = %e, "report failed");
            anyhow::bail!("{report} failed: {e}")
        }
    }
}

fn write_all(path: &Path, contents: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    out.write_all(contents.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    out.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cardwise-report-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join("report.txt")
    }

    #[test]
    fn test_success_writes_json() {
        let p = scratch("ok");
        let mut totals = BTreeMap::new();
        totals.insert("Фастфуд".to_string(), 12.5);

        let json = capture(&p, "cashback", "2021-03", Ok::<_, String>(totals)).unwrap();
        let written = fs::read_to_string(&p).unwrap();
        assert_eq!(written, json);
        assert!(written.contains("\"Фастфуд\": 12.5"));
    }

    #[test]
    fn test_failure_writes_message_and_errors() {
        let p = scratch("err");
        let err = capture::<(), _>(&p, "cashback", "year=2021 month=13", Err("bad month"))
            .unwrap_err();
        assert!(err.to_string().contains("bad month"));
        assert_eq!(
            fs::read_to_string(&p).unwrap(),
            "cashback error: bad month Inputs: year=2021 month=13\n"
        );
    }

    #[test]
    fn test_overwrites_previous_result() {
        let p = scratch("overwrite");
        capture(&p, "top", "", Ok::<_, String>(vec![1, 2, 3])).unwrap();
        capture(&p, "top", "", Ok::<_, String>(Vec::<i32>::new())).unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "[]");
    }
}
