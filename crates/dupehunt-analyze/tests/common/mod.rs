//! File fixtures shared by the integration tests.

#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Create a file of `n_bytes` zero bytes.
pub fn create_file(path: &Path, n_bytes: u64) -> PathBuf {
    let file = File::create(path).unwrap();
    file.set_len(n_bytes).unwrap();
    path.to_path_buf()
}

/// Create a file with the given content.
pub fn create_file_with(path: &Path, content: &[u8]) -> PathBuf {
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

/// Create `n` files named `<stem>_<i>.<ext>` with the given sizes.
pub fn create_files(dir: &Path, name: &str, sizes: &[u64]) -> Vec<PathBuf> {
    let (stem, ext) = name.split_once('.').unwrap_or((name, "bin"));
    sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| create_file(&dir.join(format!("{stem}_{}.{ext}", i + 1)), size))
        .collect()
}

/// Copy `src` `n` times next to itself, returning the copies.
pub fn copy_file(src: &Path, n: usize) -> Vec<PathBuf> {
    let stem = src.file_stem().unwrap().to_string_lossy().to_string();
    let ext = src
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    let dir = src.parent().unwrap();

    (1..=n)
        .map(|i| {
            let dst = dir.join(format!("{stem}_copy{i}.{ext}"));
            fs::copy(src, &dst).unwrap();
            dst
        })
        .collect()
}

/// Create subdirectories with files of the given sizes.
pub fn create_file_structure(root: &Path, structure: &[(&str, &[(&str, u64)])]) -> Vec<PathBuf> {
    let mut created = Vec::new();
    for (dir, files) in structure {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        for (name, size) in *files {
            created.push(create_file(&dir.join(name), *size));
        }
    }
    created.sort();
    created
}

/// Canonical form of a temp dir path, matching what the scanner records.
pub fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap()
}
