use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates a scratch package directory under target/packages with a random
/// 8-character name. The directory is removed when the guard is dropped.
pub struct PackageDirGuard {
    path: PathBuf,
}

impl PackageDirGuard {
    pub fn new() -> Self {
        let random_name: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();

        let path = PathBuf::from("target/packages").join(random_name);
        fs::create_dir_all(&path).expect("Failed to create package directory");
        let path = path
            .canonicalize()
            .expect("Failed to resolve package directory");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn build_dir(&self) -> PathBuf {
        self.path.join("build").join("Release")
    }

    pub fn prebuilts_dir(&self, triplet: &str) -> PathBuf {
        self.path.join("prebuilts").join(triplet)
    }
}

impl Drop for PackageDirGuard {
    fn drop(&mut self) {
        if self.path.exists() {
            fs::remove_dir_all(&self.path).unwrap_or_else(|e| {
                eprintln!(
                    "Failed to cleanup package directory {}: {}",
                    self.path.display(),
                    e
                );
            });
        }
    }
}
