use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};

use super::PREFERRED_LIST;
use super::table::ListTable;

/// Timeout for the list fetch. The mail client blocks on this filter, so
/// keep it short and treat expiry like any other fetch failure.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Freshness of the on-disk list table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No cache file yet.
    Missing,
    /// Cache file exists and its age is within the TTL.
    Fresh,
    /// Cache file exists but is older than the TTL.
    Stale,
}

/// Classify the cache file by its modification time.
pub fn cache_state(path: &Path, ttl: Duration) -> CacheState {
    let Ok(metadata) = fs::metadata(path) else {
        return CacheState::Missing;
    };
    let age = metadata
        .modified()
        .ok()
        .and_then(|mtime| SystemTime::now().duration_since(mtime).ok());
    match age {
        Some(age) if age > ttl => CacheState::Stale,
        // A future mtime (clock skew) counts as fresh.
        _ => CacheState::Fresh,
    }
}

/// Load the mailing-list table from the cache file at `path`, refreshing
/// it from `url` first when it is missing or older than `ttl`.
///
/// Never fails: a fetch error is logged, the file is touched so the next
/// attempt waits a full TTL, and whatever content is on disk (possibly
/// none) is used for this run.
pub fn load_list_table(url: &str, path: &Path, ttl: Duration) -> ListTable {
    if let Err(err) = ensure_parent_dir(path) {
        log::error!("cannot create cache directory for {}: {err:#}", path.display());
    }

    if cache_state(path, ttl) != CacheState::Fresh {
        if let Err(err) = fetch_to_file(url, path) {
            log::error!("error fetching {url}: {err:#}");
            if let Err(err) = touch(path) {
                log::error!("cannot touch {}: {err:#}", path.display());
            }
        }
    }

    let text = fs::read_to_string(path).unwrap_or_default();
    let mut table = ListTable::from_lines(&text);
    table.promote(PREFERRED_LIST);
    table
}

/// GET `url` and overwrite the cache file with the response body.
fn fetch_to_file(url: &str, path: &Path) -> Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("building HTTP client")?;
    let body = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .with_context(|| format!("fetching {url}"))?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Reset the cache file's mtime by rewriting its current content,
/// creating it empty if absent. Keeps failed refreshes from being retried
/// within a TTL window.
fn touch(path: &Path) -> Result<()> {
    let existing = fs::read(path).unwrap_or_default();
    fs::write(path, existing)?;
    Ok(())
}

/// Create the cache file's parent directory if missing (single level).
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        fs::create_dir(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Connection refused immediately; stands in for an unreachable source.
    const DEAD_URL: &str = "http://127.0.0.1:9/lists.txt";

    fn mtime(path: &Path) -> SystemTime {
        fs::metadata(path).unwrap().modified().unwrap()
    }

    #[test]
    fn test_cache_state_transitions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lorifier.list");

        assert_eq!(cache_state(&path, Duration::from_secs(60)), CacheState::Missing);

        fs::write(&path, "a.example.org: https://lore.kernel.org/a/\n").unwrap();
        assert_eq!(cache_state(&path, Duration::from_secs(60)), CacheState::Fresh);

        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(cache_state(&path, Duration::ZERO), CacheState::Stale);
    }

    #[test]
    fn test_fresh_cache_is_used_without_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lorifier.list");
        fs::write(&path, "linux-rtc.vger.kernel.org: https://lore.kernel.org/linux-rtc/\n")
            .unwrap();
        let before = mtime(&path);

        let table = load_list_table(DEAD_URL, &path, Duration::from_secs(3600));

        assert_eq!(table.entries().len(), 1);
        // A fetch failure would have touched the file.
        assert_eq!(mtime(&path), before);
    }

    #[test]
    fn test_stale_cache_failed_fetch_touches_and_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lorifier.list");
        fs::write(&path, "linux-rtc.vger.kernel.org: https://lore.kernel.org/linux-rtc/\n")
            .unwrap();
        let before = mtime(&path);
        // Sleep past coarse filesystem timestamp granularity.
        std::thread::sleep(Duration::from_millis(1100));

        let table = load_list_table(DEAD_URL, &path, Duration::ZERO);

        // Old content is still served and the retry is deferred.
        assert_eq!(table.entries().len(), 1);
        assert!(mtime(&path) > before);
    }

    #[test]
    fn test_missing_cache_failed_fetch_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("lorifier.list");

        let table = load_list_table(DEAD_URL, &path, Duration::from_secs(3600));

        assert!(table.is_empty());
        // The file now exists (empty) so the next run skips the fetch.
        assert_eq!(fs::read(&path).unwrap(), b"");
        assert_eq!(cache_state(&path, Duration::from_secs(3600)), CacheState::Fresh);
    }

    #[test]
    fn test_loaded_table_promotes_the_kernel_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lorifier.list");
        fs::write(
            &path,
            "linux-rtc.vger.kernel.org: https://lore.kernel.org/linux-rtc/\n\
             linux-kernel.vger.kernel.org: https://lore.kernel.org/lkml/\n",
        )
        .unwrap();

        let table = load_list_table(DEAD_URL, &path, Duration::from_secs(3600));

        assert_eq!(table.entries()[0].address, PREFERRED_LIST);
    }
}
