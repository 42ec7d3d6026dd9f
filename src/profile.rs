use std::fmt;

use serde::{Deserialize, Serialize};

/// Git identity bundle stored in the profiles file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Unique profile name
    pub profile_name: String,
    /// Git username (user.name)
    pub name: String,
    /// Git email address (user.email)
    pub email: String,
    /// Host the profile applies to, already normalized
    pub origin: String,
    /// Optional signing key id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key: Option<String>,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profile {}:", self.profile_name)?;
        writeln!(f, "  Origin: {}", self.origin)?;
        writeln!(f, "  Name: {}", self.name)?;
        write!(f, "  Email: {}", self.email)?;
        if let Some(key) = &self.signing_key {
            write!(f, "\n  Signing key: {key}")?;
        }
        Ok(())
    }
}

/// Exact-match filter over name, email and origin. Unset criteria match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub origin: Option<String>,
}

impl ProfileFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.origin.is_none()
    }

    pub fn matches(&self, profile: &Profile) -> bool {
        fn criterion(expected: &Option<String>, actual: &str) -> bool {
            expected.as_deref().is_none_or(|expected| expected == actual)
        }

        criterion(&self.name, &profile.name)
            && criterion(&self.email, &profile.email)
            && criterion(&self.origin, &profile.origin)
    }
}
