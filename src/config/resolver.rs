//! Profile selection by name

use super::profile::LoggerProfile;
use crate::core::{LoggerError, Result};

/// Pick the profile called `name`.
///
/// An empty list means no usable configuration was found, and the built-in
/// default is returned whatever `name` is. Otherwise the first profile with
/// an exactly matching name wins; duplicates later in the list are never
/// seen.
///
/// # Errors
///
/// [`LoggerError::ProfileNotFound`] when the list is non-empty and no
/// profile carries `name`.
///
/// # Example
///
/// ```
/// use profile_logger::config::{resolve, LoggerProfile};
///
/// let profile = resolve(&[], "anything").unwrap();
/// assert_eq!(profile, LoggerProfile::default());
/// ```
pub fn resolve(profiles: &[LoggerProfile], name: &str) -> Result<LoggerProfile> {
    if profiles.is_empty() {
        return Ok(LoggerProfile::default());
    }

    profiles
        .iter()
        .find(|profile| profile.name == name)
        .cloned()
        .ok_or_else(|| LoggerError::profile_not_found(name))
}
