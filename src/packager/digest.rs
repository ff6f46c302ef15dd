//! Content digests for input artifacts and produced distributables.

use crate::packager::error::{ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Order-independent fingerprint of a zip/jar archive.
///
/// Non-directory entries are collected into a name-sorted map (a duplicated
/// name keeps the last payload), then entry names and payload bytes are fed
/// into one SHA-256 in ascending name order. Repacking an archive with a
/// different entry order, timestamps or permissions leaves the fingerprint
/// unchanged; any change to an entry name or payload changes it.
pub fn archive_fingerprint(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path).fs_context("opening archive", path)?;
    let mut archive = zip::ZipArchive::new(std::io::BufReader::new(file))?;

    let mut entries: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let mut payload = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut payload)
            .fs_context("reading archive entry", path)?;
        entries.insert(entry.name().to_string(), payload);
    }

    let mut hasher = Sha256::new();
    for (name, payload) in &entries {
        hasher.update(name.as_bytes());
        hasher.update(payload);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// SHA-256 of a single file, read in 8KB chunks.
pub async fn file_sha256(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hashing", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// SHA-256 of a directory tree.
///
/// Files are visited in lexicographic path order; each contributes its
/// relative path and its content. Used for app-image artifacts, which are
/// directories rather than single files.
pub async fn tree_sha256(dir: &Path) -> Result<String> {
    let mut files: Vec<_> = walkdir::WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    files.sort();

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    for path in files {
        if let Ok(rel_path) = path.strip_prefix(dir) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
        }

        let mut file = tokio::fs::File::open(&path)
            .await
            .fs_context("opening file for hashing", &path)?;
        loop {
            let n = file
                .read(&mut buffer)
                .await
                .fs_context("reading file for hashing", &path)?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Digest of a produced artifact, dispatching on file vs directory.
pub async fn artifact_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?;
    if metadata.is_dir() {
        tree_sha256(path).await
    } else {
        file_sha256(path).await
    }
}
