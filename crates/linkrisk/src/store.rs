//! Persistence of the most recent check, read back by `linkrisk last`.

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use linkrisk_core::verdict::RiskResult;

/// A recorded check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastCheck {
    pub checked_at: String,
    pub result: RiskResult,
}

/// `<data_dir>/linkrisk/last_check.json`.
pub fn default_path() -> Option<PathBuf> {
    linkrisk_core::policy::data_dir().map(|d| d.join("last_check.json"))
}

/// Replace the recorded check under an exclusive lock.
pub fn save(path: &Path, result: &RiskResult) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let entry = LastCheck {
        checked_at: chrono::Utc::now().to_rfc3339(),
        result: result.clone(),
    };
    let json = serde_json::to_string_pretty(&entry)?;

    let mut file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    FileExt::lock_exclusive(&file)
        .with_context(|| format!("locking {}", path.display()))?;

    let written = (|| -> std::io::Result<()> {
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()
    })();
    let _ = FileExt::unlock(&file);
    written.with_context(|| format!("writing {}", path.display()))?;

    tracing::debug!(path = %path.display(), "recorded last check");
    Ok(())
}

/// Read the recorded check, if any.
pub fn load(path: &Path) -> Result<Option<LastCheck>> {
    let mut file = match OpenOptions::new().read(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("opening {}", path.display())),
    };
    FileExt::lock_shared(&file)
        .with_context(|| format!("locking {}", path.display()))?;
    let mut content = String::new();
    let read = file.read_to_string(&mut content);
    let _ = FileExt::unlock(&file);
    read.with_context(|| format!("reading {}", path.display()))?;

    let entry = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkrisk_core::engine::score_url;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(load(&tmp.path().join("last_check.json")).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("last_check.json");
        let result = score_url("http://192.168.1.1/login");
        save(&path, &result).unwrap();

        let entry = load(&path).unwrap().unwrap();
        assert_eq!(entry.result, result);
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.checked_at).is_ok());
    }

    #[test]
    fn test_save_replaces_previous() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("last_check.json");
        // A longer record first, so stale bytes would corrupt a non-truncating write.
        save(&path, &score_url(&format!("https://example.com/{}", "a".repeat(200)))).unwrap();
        let second = score_url("not a url");
        save(&path, &second).unwrap();
        assert_eq!(load(&path).unwrap().unwrap().result, second);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("last_check.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load(&path).is_err());
    }
}
