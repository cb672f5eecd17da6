//! Output tree materialization.
//!
//! Two ways a file lands in the destination tree:
//!
//! - **Mirrored** — non-document files are hard-linked from the source when
//!   the filesystem allows it, byte-copied otherwise, and keep the source's
//!   modification time. Re-runs are no-ops once source and destination refer
//!   to the same underlying file.
//! - **Generated** — rendered documents and synthesized indexes are written
//!   fresh every run and stamped with `max(watermark, source mtime)` so a
//!   template edit ages no worse than a content edit (see
//!   [`crate::render::Renderer::watermark`]).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use same_file::is_same_file;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("source and destination cannot be the same: {0}")]
    SamePath(PathBuf),
}

/// Mirror `src` at `dst`, preferring a hard link over a byte copy.
///
/// If `dst` already refers to the same underlying file as `src` (a previous
/// run's hard link), nothing happens. Otherwise any stale `dst` is removed
/// first; when the link fails (cross-device, unsupported filesystem) the
/// bytes are copied and the source's mtime re-applied by hand — a hard link
/// shares the inode and needs no stamping.
pub fn mirror_file(src: &Path, dst: &Path) -> Result<(), WriteError> {
    if src == dst {
        return Err(WriteError::SamePath(src.to_path_buf()));
    }
    if is_same_file(src, dst).unwrap_or(false) {
        return Ok(());
    }
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    match fs::remove_file(dst) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    if fs::hard_link(src, dst).is_err() {
        fs::copy(src, dst)?;
        let mtime = fs::metadata(src)?.modified()?;
        set_mtime(dst, mtime)?;
    }
    Ok(())
}

/// Write generated `contents` to `dst`, truncating any previous version,
/// then stamp the file with `max(watermark, source_mtime)`.
pub fn write_page(
    dst: &Path,
    contents: &[u8],
    source_mtime: SystemTime,
    watermark: SystemTime,
) -> Result<(), WriteError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dst, contents)?;
    set_mtime(dst, source_mtime.max(watermark))
}

fn set_mtime(path: &Path, mtime: SystemTime) -> Result<(), WriteError> {
    let file = fs::OpenOptions::new().append(true).open(path)?;
    file.set_modified(mtime)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn mtime_of(path: &Path) -> SystemTime {
        fs::metadata(path).unwrap().modified().unwrap()
    }

    #[test]
    fn mirror_prefers_hard_link() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("out/a.txt");
        fs::write(&src, "payload").unwrap();

        mirror_file(&src, &dst).unwrap();

        // Same filesystem, so the link must have succeeded.
        assert!(is_same_file(&src, &dst).unwrap());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "payload");
    }

    #[test]
    fn mirror_rerun_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("out/a.txt");
        fs::write(&src, "payload").unwrap();

        mirror_file(&src, &dst).unwrap();
        let first = mtime_of(&dst);
        mirror_file(&src, &dst).unwrap();
        assert_eq!(mtime_of(&dst), first);
        assert!(is_same_file(&src, &dst).unwrap());
    }

    #[test]
    fn mirror_replaces_stale_destination() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("out/a.txt");
        fs::write(&src, "fresh").unwrap();
        fs::create_dir_all(dst.parent().unwrap()).unwrap();
        fs::write(&dst, "stale").unwrap();

        mirror_file(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "fresh");
    }

    #[test]
    fn mirror_same_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        fs::write(&src, "x").unwrap();
        assert!(matches!(
            mirror_file(&src, &src),
            Err(WriteError::SamePath(_))
        ));
    }

    #[test]
    fn write_page_stamps_watermark_when_newer() {
        let tmp = TempDir::new().unwrap();
        let dst = tmp.path().join("page.md");
        let old = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let watermark = SystemTime::UNIX_EPOCH + Duration::from_secs(2_000_000);

        write_page(&dst, b"<html></html>", old, watermark).unwrap();
        assert_eq!(mtime_of(&dst), watermark);
    }

    #[test]
    fn write_page_keeps_newer_source_mtime() {
        let tmp = TempDir::new().unwrap();
        let dst = tmp.path().join("page.md");
        let source = SystemTime::UNIX_EPOCH + Duration::from_secs(3_000_000);
        let watermark = SystemTime::UNIX_EPOCH + Duration::from_secs(2_000_000);

        write_page(&dst, b"x", source, watermark).unwrap();
        assert_eq!(mtime_of(&dst), source);
    }

    #[test]
    fn write_page_truncates_previous_output() {
        let tmp = TempDir::new().unwrap();
        let dst = tmp.path().join("page.md");
        let now = SystemTime::now();
        write_page(&dst, b"a much longer first version", now, now).unwrap();
        write_page(&dst, b"short", now, now).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "short");
    }

    #[test]
    fn write_page_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let dst = tmp.path().join("deeply/nested/dir/page.md");
        let now = SystemTime::now();
        write_page(&dst, b"x", now, now).unwrap();
        assert!(dst.exists());
    }
}
