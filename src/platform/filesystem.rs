// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Filesystem capabilities used by artifact placement and path probing.
//!
//! The trait keeps the placement logic independent of the real filesystem so
//! error paths (permission failures, directory races) can be exercised with
//! mocks.

use crate::platform::file_ops;
use std::io;
use std::path::Path;

/// Type information about an existing path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
    pub is_file: bool,
}

/// Abstract interface for the filesystem operations the crate relies on.
pub trait FileSystem {
    /// Creates `path` and all missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copies `src` to `dst`, overwriting `dst` if it exists. The copy is a
    /// copy-on-write clone when the filesystem supports it.
    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()>;

    /// Returns type information, or `None` when nothing exists at `path`.
    fn stat(&self, path: &Path) -> Option<FileStat>;

    /// Reads a UTF-8 text file.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`FileSystem`] implementation that performs live OS calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()> {
        file_ops::clone_or_copy(src, dst)
    }

    fn stat(&self, path: &Path) -> Option<FileStat> {
        std::fs::metadata(path).ok().map(|metadata| FileStat {
            is_dir: metadata.is_dir(),
            is_file: metadata.is_file(),
        })
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_stat_reports_kind() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("addon.node");
        fs::write(&file, b"binary").unwrap();

        let fs_impl = LocalFileSystem::new();
        assert_eq!(
            fs_impl.stat(temp_dir.path()),
            Some(FileStat {
                is_dir: true,
                is_file: false
            })
        );
        assert_eq!(
            fs_impl.stat(&file),
            Some(FileStat {
                is_dir: false,
                is_file: true
            })
        );
        assert_eq!(fs_impl.stat(&temp_dir.path().join("missing")), None);
    }

    #[test]
    fn test_create_dir_all_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("prebuilts").join("linux-x64");

        let fs_impl = LocalFileSystem::new();
        fs_impl.create_dir_all(&nested).unwrap();
        fs_impl.create_dir_all(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_copy_file_overwrites_target() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src.node");
        let dst = temp_dir.path().join("dst.node");
        fs::write(&src, b"payload").unwrap();
        fs::write(&dst, b"stale contents from a previous build").unwrap();

        let fs_impl = LocalFileSystem::new();
        fs_impl.copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"payload");
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let fs_impl = LocalFileSystem::new();
        let error = fs_impl
            .copy_file(
                &temp_dir.path().join("missing.node"),
                &temp_dir.path().join("out.node"),
            )
            .unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }
}
