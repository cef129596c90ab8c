//! Snapshot acquisition.
//!
//! `np fetch` accepts either a local file or an http(s) share link.
//! Dropbox share links are rewritten from their preview form (`dl=0`) to
//! the direct-download form (`dl=1`), matching how the collector publishes
//! snapshots. Whatever the source, the bytes must start with the SQLite
//! magic before they are installed; a share link that serves an HTML
//! preview page is the most common failure.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SQLITE_MAGIC: &[u8] = b"SQLite format 3\0";
const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

/// Rewrite a Dropbox share URL into its direct-download form. Other URLs
/// pass through untouched.
pub fn direct_download_url(url: &str) -> String {
    if !url.contains("dropbox.com") || url.contains("dl=1") {
        return url.to_string();
    }
    if url.contains("dl=0") {
        return url.replacen("dl=0", "dl=1", 1);
    }
    if url.contains('?') {
        format!("{url}&dl=1")
    } else {
        format!("{url}?dl=1")
    }
}

/// Download or copy the snapshot to `dest`. Returns the bytes written.
pub fn fetch(source: &str, dest: &Path) -> Result<u64, Box<dyn Error>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        download(source)?
    } else {
        fs::read(source).map_err(|e| format!("cannot read {source}: {e}"))?
    };

    if !bytes.starts_with(SQLITE_MAGIC) {
        return Err("not a SQLite database (a share link may be serving its preview page)".into());
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, &bytes)?;
    Ok(bytes.len() as u64)
}

fn download(url: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let response = client.get(direct_download_url(url)).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("download failed ({status})").into());
    }
    Ok(response.bytes()?.to_vec())
}

/// Default install location for the snapshot.
pub fn default_db_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".local/share/novelpulse/novels.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropbox_preview_link_becomes_direct() {
        assert_eq!(
            direct_download_url("https://www.dropbox.com/s/abc/novels.db?dl=0"),
            "https://www.dropbox.com/s/abc/novels.db?dl=1"
        );
    }

    #[test]
    fn dropbox_link_without_dl_param_gains_one() {
        assert_eq!(
            direct_download_url("https://www.dropbox.com/s/abc/novels.db"),
            "https://www.dropbox.com/s/abc/novels.db?dl=1"
        );
        assert_eq!(
            direct_download_url("https://www.dropbox.com/s/abc/novels.db?rlkey=x"),
            "https://www.dropbox.com/s/abc/novels.db?rlkey=x&dl=1"
        );
    }

    #[test]
    fn direct_dropbox_link_is_untouched() {
        let url = "https://www.dropbox.com/s/abc/novels.db?dl=1";
        assert_eq!(direct_download_url(url), url);
    }

    #[test]
    fn non_dropbox_urls_pass_through() {
        let url = "https://example.com/snapshots/novels.db?dl=0";
        assert_eq!(direct_download_url(url), url);
    }

    #[test]
    fn fetch_installs_a_local_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.db");
        let mut bytes = SQLITE_MAGIC.to_vec();
        bytes.extend_from_slice(&[0u8; 64]);
        fs::write(&source, &bytes).unwrap();

        let dest = dir.path().join("data/novels.db");
        let written = fetch(source.to_str().unwrap(), &dest).unwrap();
        assert_eq!(written, bytes.len() as u64);
        assert_eq!(fs::read(&dest).unwrap(), bytes);
    }

    #[test]
    fn fetch_rejects_non_sqlite_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("page.html");
        fs::write(&source, b"<html>preview</html>").unwrap();

        let err = fetch(source.to_str().unwrap(), &dir.path().join("out.db")).unwrap_err();
        assert!(
            err.to_string().contains("not a SQLite database"),
            "should reject non-SQLite bytes, got: {err}"
        );
    }

    #[test]
    fn fetch_missing_local_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = fetch("/no/such/file.db", &dir.path().join("out.db")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
