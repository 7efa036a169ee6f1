//! Append-only JSON-lines journaling, guarded by an advisory exclusive
//! file lock so that concurrent shim invocations (a parallel `make -j`
//! build, say) never interleave partial lines in the same file.

use fs2::FileExt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Serializes `record` to a single JSON line and appends it to `path`,
/// creating the file if needed. The lock is released when `file` drops at
/// the end of the function, after the append and flush complete.
pub fn append_json_line<T: serde::Serialize>(path: &Path, record: &T) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;
    let mut line = serde_json::to_string(record)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    line.push('\n');
    let result = file.write_all(line.as_bytes()).and_then(|_| file.flush());
    let _ = file.unlock();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use tempfile::TempDir;

    #[derive(Serialize)]
    struct Line {
        value: u32,
    }

    #[test]
    fn appends_one_line_per_call() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("journal.jsonl");
        append_json_line(&path, &Line { value: 1 }).unwrap();
        append_json_line(&path, &Line { value: 2 }).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"value":1}"#);
        assert_eq!(lines[1], r#"{"value":2}"#);
    }
}
