//! Timestamp based staleness checks

use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Whether `destination` needs to be regenerated from `source`.
///
/// A destination is fresh only when it exists and its modification time is
/// strictly newer than the source's. Anything that cannot be read counts as
/// stale, so a missing timestamp always leads to a rebuild.
pub fn is_stale(source: &Path, destination: &Path) -> bool {
    match (modified(source), modified(destination)) {
        (Some(source_time), Some(dest_time)) => dest_time <= source_time,
        _ => true,
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch(path: &Path, time: SystemTime) {
        fs::write(path, "x").unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn test_missing_destination_is_stale() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.js");
        touch(&source, SystemTime::now());
        assert!(is_stale(&source, &temp.path().join("out.js")));
    }

    #[test]
    fn test_newer_destination_is_fresh() {
        let temp = TempDir::new().unwrap();
        let base = SystemTime::now() - Duration::from_secs(100);
        let source = temp.path().join("a.js");
        let dest = temp.path().join("b.js");
        touch(&source, base);
        touch(&dest, base + Duration::from_secs(10));
        assert!(!is_stale(&source, &dest));
    }

    #[test]
    fn test_equal_timestamps_are_stale() {
        let temp = TempDir::new().unwrap();
        let base = SystemTime::now() - Duration::from_secs(100);
        let source = temp.path().join("a.js");
        let dest = temp.path().join("b.js");
        touch(&source, base);
        touch(&dest, base);
        assert!(is_stale(&source, &dest));
    }

    #[test]
    fn test_older_destination_is_stale() {
        let temp = TempDir::new().unwrap();
        let base = SystemTime::now() - Duration::from_secs(100);
        let source = temp.path().join("a.js");
        let dest = temp.path().join("b.js");
        touch(&dest, base);
        touch(&source, base + Duration::from_secs(10));
        assert!(is_stale(&source, &dest));
    }

    #[test]
    fn test_missing_source_is_stale() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("b.js");
        touch(&dest, SystemTime::now());
        assert!(is_stale(&temp.path().join("gone.js"), &dest));
    }
}
