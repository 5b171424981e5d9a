//! Output package compression.
//!
//! The final archive's root is the staging directory's *contents*, not
//! the directory itself; unpacking a package must never yield an extra
//! wrapping directory level.

use std::io::Write;
use std::path::Path;

use thiserror::Error;

/// Errors raised while writing the output archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Filesystem or compression failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Compress the contents of `src` into a gzip-compressed tar at `out`.
///
/// Symlinks are stored as symlinks, matching how the upstream archives
/// (and the restructure copy) carry them.
///
/// # Errors
///
/// Returns [`ArchiveError::Io`] if any entry cannot be read or the
/// output cannot be written.
pub fn compress_dir_contents(src: &Path, out: &Path) -> Result<(), ArchiveError> {
    let file = std::fs::File::create(out)?;
    let encoder =
        flate2::write::GzEncoder::new(std::io::BufWriter::new(file), flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let name = entry.file_name();
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            builder.append_dir_all(name, path)?;
        } else {
            builder.append_path_with_name(path, name)?;
        }
    }

    let encoder = builder.into_inner()?;
    let mut writer = encoder.finish()?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    fn entry_names(archive: &Path) -> BTreeSet<String> {
        let file = std::fs::File::open(archive).unwrap();
        let decoder = flate2::read::GzDecoder::new(file);
        let mut tar = tar::Archive::new(decoder);
        tar.entries()
            .unwrap()
            .map(|e| {
                e.unwrap()
                    .path()
                    .unwrap()
                    .to_string_lossy()
                    .trim_end_matches('/')
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_contents_land_at_archive_root() {
        let tmp = tempdir().unwrap();
        let content = tmp.path().join("content");
        std::fs::create_dir_all(content.join("bin")).unwrap();
        std::fs::write(content.join("bin/verible-verilog-format"), b"#!ELF").unwrap();
        std::fs::write(content.join("LICENSE.txt"), b"license text").unwrap();
        std::fs::write(content.join("package-info.json"), b"{}").unwrap();

        let out = tmp.path().join("pkg.tar.gz");
        compress_dir_contents(&content, &out).unwrap();

        let names = entry_names(&out);
        // No wrapper dir: everything sits at the root
        assert!(names.contains("LICENSE.txt"));
        assert!(names.contains("package-info.json"));
        assert!(names.contains("bin/verible-verilog-format"));
        assert!(!names.iter().any(|n| n.starts_with("content")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_survive() {
        let tmp = tempdir().unwrap();
        let content = tmp.path().join("content");
        std::fs::create_dir_all(content.join("bin")).unwrap();
        std::fs::write(content.join("bin/tool"), b"#!ELF").unwrap();
        std::os::unix::fs::symlink("tool", content.join("bin/tool-alias")).unwrap();

        let out = tmp.path().join("pkg.tar.gz");
        compress_dir_contents(&content, &out).unwrap();

        let file = std::fs::File::open(&out).unwrap();
        let decoder = flate2::read::GzDecoder::new(file);
        let mut tar = tar::Archive::new(decoder);
        let alias = tar
            .entries()
            .unwrap()
            .map(std::result::Result::unwrap)
            .find(|e| e.path().unwrap().ends_with("tool-alias"))
            .expect("symlink entry present");
        assert_eq!(
            alias.header().entry_type(),
            tar::EntryType::Symlink,
            "symlink must be stored as a symlink, not followed"
        );
    }

    #[test]
    fn test_rebuild_overwrites_output() {
        let tmp = tempdir().unwrap();
        let content = tmp.path().join("content");
        std::fs::create_dir_all(&content).unwrap();
        std::fs::write(content.join("a.txt"), b"first").unwrap();

        let out = tmp.path().join("pkg.tar.gz");
        compress_dir_contents(&content, &out).unwrap();
        let first_len = std::fs::metadata(&out).unwrap().len();

        std::fs::write(content.join("b.txt"), b"second file with more bytes").unwrap();
        compress_dir_contents(&content, &out).unwrap();

        let names = entry_names(&out);
        assert!(names.contains("a.txt"));
        assert!(names.contains("b.txt"));
        assert_ne!(std::fs::metadata(&out).unwrap().len(), first_len);
    }
}
