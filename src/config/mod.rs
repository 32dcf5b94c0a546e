// Re-export all items from the submodules
mod env_vars;
mod upload_config;

// Re-export upload config
pub use upload_config::UploadConfig;

// Re-export expansion helpers
pub use env_vars::{
    build_environment,
    expand,
    normalize_target_folder,
    parse_key_value,
};
