// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile document, its entry lists, and the request bodies that edit it.

use crate::models::User;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Social links shown on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

/// One job in a profile's experience list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One school in a profile's education list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Which entry list an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Experience,
    Education,
}

/// Profile document stored in Firestore, keyed by the owning user's ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user (immutable)
    pub user: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Current position, e.g. "Developer" or "Student"
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub social: Social,
    /// Most recent first
    #[serde(default)]
    pub experience: Vec<Experience>,
    /// Most recent first
    #[serde(default)]
    pub education: Vec<Education>,
}

impl Profile {
    /// An empty profile for `user`, the starting point of an upsert.
    pub fn new(user: Uuid) -> Self {
        Self {
            user,
            company: None,
            website: None,
            location: None,
            bio: None,
            status: String::new(),
            githubusername: None,
            skills: Vec::new(),
            social: Social::default(),
            experience: Vec::new(),
            education: Vec::new(),
        }
    }
}

// ─── API Views ───────────────────────────────────────────────

/// Owner fields embedded in profile responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct ProfileOwner {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Profile as returned by the API, with the owner's name and avatar filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct ProfileView {
    pub user: ProfileOwner,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
}

impl ProfileView {
    /// Join a profile with its owner. A missing user leaves only the ID.
    pub fn new(profile: Profile, owner: Option<&User>) -> Self {
        Self {
            user: ProfileOwner {
                id: profile.user,
                name: owner.map(|u| u.name.clone()),
                avatar: owner.and_then(|u| u.avatar.clone()),
            },
            company: profile.company,
            website: profile.website,
            location: profile.location,
            bio: profile.bio,
            status: profile.status,
            githubusername: profile.githubusername,
            skills: profile.skills,
            social: profile.social,
            experience: profile.experience,
            education: profile.education,
        }
    }
}

// ─── Request Bodies ──────────────────────────────────────────

/// Read a required string field, treating an explicit `null` like an absent
/// value so the field's rules report it.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Declared order of a request body's fields, used to order validation errors.
pub trait FieldOrder {
    const FIELDS: &'static [&'static str];
}

/// Body of `POST /api/profile`.
///
/// Every field may be omitted; empty strings count as omitted.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct ProfileInput {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    pub githubusername: Option<String>,
    /// Comma-separated, e.g. "HTML, CSS, Rust"
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "Skills is required"))]
    pub skills: String,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
}

impl FieldOrder for ProfileInput {
    const FIELDS: &'static [&'static str] = &[
        "company",
        "website",
        "location",
        "bio",
        "status",
        "githubusername",
        "skills",
        "youtube",
        "twitter",
        "instagram",
        "linkedin",
        "facebook",
    ];
}

/// Body of `PUT /api/profile/experience`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct ExperienceInput {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(
        min = 1,
        message = "From date is required and needs to be from the past"
    ))]
    pub from: String,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl FieldOrder for ExperienceInput {
    const FIELDS: &'static [&'static str] = &[
        "title",
        "company",
        "location",
        "from",
        "to",
        "current",
        "description",
    ];
}

/// Body of `PUT /api/profile/education`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct EducationInput {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "School is required"))]
    pub school: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "Degree is required"))]
    pub degree: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "Field of study is required"))]
    pub fieldofstudy: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(
        min = 1,
        message = "From date is required and needs to be from the past"
    ))]
    pub from: String,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl FieldOrder for EducationInput {
    const FIELDS: &'static [&'static str] = &[
        "school",
        "degree",
        "fieldofstudy",
        "from",
        "to",
        "current",
        "description",
    ];
}
