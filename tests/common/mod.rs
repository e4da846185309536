pub mod fixtures;
pub mod package_dir;
