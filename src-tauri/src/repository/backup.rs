//! Backup Files
//!
//! Verbatim copies of a store file named `<base>_backup_<timestamp>.json`.
//! Backups are never overwritten: a name already taken within the same
//! second gets a `_<n>` suffix.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::domain::{DomainError, DomainResult};

/// Upper bound on `_<n>` suffixes tried for one timestamp
const MAX_SUFFIX: u32 = 1000;

/// UTC instant without colons or fractional seconds, e.g. `2024-03-09T18-04-05`
pub fn backup_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H-%M-%S").to_string()
}

pub fn backup_file_name(base: &str, timestamp: &str, suffix: u32) -> String {
    if suffix == 0 {
        format!("{}_backup_{}.json", base, timestamp)
    } else {
        format!("{}_backup_{}_{}.json", base, timestamp, suffix)
    }
}

/// Copy `source` next to itself, stamped with `instant`.
pub async fn create_backup(source: &Path, instant: DateTime<Utc>) -> DomainResult<PathBuf> {
    let data = tokio::fs::read(source).await?;

    let base = source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DomainError::InvalidInput(format!("Bad store path: {}", source.display())))?;
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    let timestamp = backup_timestamp(instant);

    for suffix in 0..=MAX_SUFFIX {
        let target = dir.join(backup_file_name(base, &timestamp, suffix));
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&target).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        };
        file.write_all(&data).await?;
        file.flush().await?;
        return Ok(target);
    }

    Err(DomainError::Conflict(format!(
        "No free backup name for {} at {}",
        base, timestamp
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_has_no_colons_or_fraction() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 9, 18, 4, 5).unwrap()
            + chrono::Duration::milliseconds(789);
        let stamp = backup_timestamp(instant);
        assert_eq!(stamp, "2024-03-09T18-04-05");
        assert!(!stamp.contains(':'));
        assert!(!stamp.contains('.'));
    }

    #[test]
    fn test_backup_file_names() {
        assert_eq!(
            backup_file_name("tv_show_progress", "2024-03-09T18-04-05", 0),
            "tv_show_progress_backup_2024-03-09T18-04-05.json"
        );
        assert_eq!(
            backup_file_name("tv_show_progress", "2024-03-09T18-04-05", 2),
            "tv_show_progress_backup_2024-03-09T18-04-05_2.json"
        );
    }
}
