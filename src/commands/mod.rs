pub mod check_path;
pub mod copy;
