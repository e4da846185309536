use crate::error::PrebuiltsError;

pub fn get_exit_code(error: &PrebuiltsError) -> i32 {
    match error {
        PrebuiltsError::MissingArtifacts
        | PrebuiltsError::InvalidTriplet(_)
        | PrebuiltsError::InvalidLoaderOptions(_)
        | PrebuiltsError::ConfigError(_)
        | PrebuiltsError::ValidationError(_) => 2,

        PrebuiltsError::AddonNotFound { .. } | PrebuiltsError::BuildFromSource => 1,

        PrebuiltsError::NapiVersionUnavailable(_) => 3,

        _ => 1,
    }
}
