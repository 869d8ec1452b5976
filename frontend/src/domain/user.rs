//! User identity and profile records.

use std::fmt;

use super::{Error, UserId};

/// Role a user holds on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// Learner; the default for unknown labels.
    Student,
    /// Approved mentor.
    Mentor,
    /// Platform administrator.
    Admin,
}

impl UserRole {
    /// Wire label used by the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Mentor => "mentor",
            Self::Admin => "admin",
        }
    }

    /// Parse the API label, treating unknown roles as students.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "mentor" => Self::Mentor,
            "admin" => Self::Admin,
            _ => Self::Student,
        }
    }
}

/// Two-valued moderation status shared by users and mentors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    /// Allowed to sign in.
    Active,
    /// Blocked by an admin.
    Inactive,
}

impl AccountStatus {
    /// The status an admin toggle moves to.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::AccountStatus;
    ///
    /// assert_eq!(AccountStatus::Active.toggled(), AccountStatus::Inactive);
    /// assert_eq!(AccountStatus::Inactive.toggled(), AccountStatus::Active);
    /// ```
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    /// Wire label used by the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Parse the API label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" | "blocked" | "suspended" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A platform user as returned by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Backend identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Sign-in address.
    pub email: String,
    /// Platform role.
    pub role: UserRole,
    /// Moderation status.
    pub status: AccountStatus,
    /// Profile image URL.
    pub avatar: Option<String>,
    /// Self-declared skills.
    pub skills: Vec<String>,
    /// Free-text biography.
    pub bio: Option<String>,
}

/// Partial profile update submitted from the settings tab.
///
/// Only `Some` fields are sent. An update with no fields is rejected before
/// any request is made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// Replacement skill list.
    pub skills: Option<Vec<String>>,
    /// New profile image URL.
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Return whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.bio.is_none() && self.skills.is_none() && self.avatar.is_none()
    }

    /// Check the form-level constraints enforced before submission.
    pub fn validate(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::invalid_request("profile update has no changes"));
        }
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(Error::invalid_request("name must not be blank"));
        }
        if self
            .skills
            .as_ref()
            .is_some_and(|skills| skills.iter().any(|skill| skill.trim().is_empty()))
        {
            return Err(Error::invalid_request("skills must not contain blank entries"));
        }
        Ok(())
    }
}
