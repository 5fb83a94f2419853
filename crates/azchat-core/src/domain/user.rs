//! User entity.

use crate::validation::rules::{not_blank, optional_email};
use crate::UserId;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A chat user as stored in the `users` table.
///
/// `(name_id, identity_provider)` identifies the user at the identity
/// provider but is not unique in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Store-generated identifier.
    pub id: UserId,

    /// Subject identifier issued by the identity provider.
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name_id: String,

    /// Identity provider that authenticated the user.
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub identity_provider: String,

    #[validate(length(max = 100))]
    pub first_name: String,

    #[validate(length(max = 100))]
    pub last_name: String,

    /// Profile photo location, empty when the user has none.
    #[validate(length(max = 1024))]
    pub photo_url: String,

    #[validate(length(max = 255), custom(function = "optional_email"))]
    pub email: String,

    #[validate(range(min = 0, max = 999))]
    pub phone_country_code: i32,

    #[validate(range(min = 0))]
    pub phone_number: i64,

    pub date_created: DateTime<Utc>,

    /// Reference to whoever created the record.
    #[validate(length(max = 255))]
    pub created_by: String,

    pub date_modified: DateTime<Utc>,

    /// Reference to whoever last modified the record.
    #[validate(length(max = 255))]
    pub modified_by: String,
}

impl User {
    /// Creates an unsaved user with empty contact details.
    ///
    /// Timestamps are truncated to whole seconds, matching what the store keeps.
    #[must_use]
    pub fn new(
        name_id: impl Into<String>,
        identity_provider: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now().trunc_subsecs(0);
        Self {
            id: UserId::UNASSIGNED,
            name_id: name_id.into(),
            identity_provider: identity_provider.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            photo_url: String::new(),
            email: String::new(),
            phone_country_code: 0,
            phone_number: 0,
            date_created: now,
            created_by: String::new(),
            date_modified: now,
            modified_by: String::new(),
        }
    }

    /// Sets the email address and phone.
    #[must_use]
    pub fn with_contact(mut self, email: impl Into<String>, country_code: i32, number: i64) -> Self {
        self.email = email.into();
        self.phone_country_code = country_code;
        self.phone_number = number;
        self
    }

    #[must_use]
    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = photo_url.into();
        self
    }

    /// Records `actor` as both creator and last modifier.
    #[must_use]
    pub fn with_author(mut self, actor: impl Into<String>) -> Self {
        let actor = actor.into();
        self.created_by.clone_from(&actor);
        self.modified_by = actor;
        self
    }

    /// Returns a copy carrying the store-assigned identifier.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }

    /// Replaces the profile fields that can change after registration.
    pub fn update_profile(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        photo_url: impl Into<String>,
        email: impl Into<String>,
    ) {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self.photo_url = photo_url.into();
        self.email = email.into();
    }

    /// Replaces the phone fields.
    pub fn update_phone(&mut self, country_code: i32, number: i64) {
        self.phone_country_code = country_code;
        self.phone_number = number;
    }

    /// Checks whether the record has been written to the store.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_assigned()
    }
}
