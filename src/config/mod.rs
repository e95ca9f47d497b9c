//! XML logger profiles: loading, defaults and selection

pub mod profile;
pub mod resolver;
pub mod store;

pub use profile::{
    LoggerProfile, ProfileList, DEFAULT_FILE_PATH, DEFAULT_MAX_AGE_DAYS, DEFAULT_MAX_BACKUPS,
    DEFAULT_MAX_SIZE_MB, DEFAULT_PROFILE_NAME,
};
pub use resolver::resolve;
pub use store::ConfigStore;
