pub mod prebuilts;

pub use prebuilts::{
    addon_prebuilt_path, local_build_addon_paths, prebuilts_directory_path, triplet_directory_name,
    versioned_addon_filename,
};
