pub mod loader_options;
pub mod triplet;

pub use loader_options::LoaderOptions;
pub use triplet::{
    LibcOverride, PartialTriplet, Triplet, detect_host_triplet, environment_configured_triplet,
    merge_with_fallback, resolve_active_triplet,
};
