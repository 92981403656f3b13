// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile document merging.
//!
//! Pure transforms from request bodies to document changes:
//! - [`build_update_fields`] turns a profile form into a set-style upsert
//! - [`append_entry`] prepends an experience or education entry
//! - [`remove_entry`] drops an entry by ID
//!
//! Persistence is the caller's job.

use crate::error::{AppError, Result};
use crate::extract::field_errors;
use crate::models::{
    Education, EducationInput, EntryKind, Experience, ExperienceInput, Profile, ProfileInput,
    Social,
};
use uuid::Uuid;
use validator::Validate;

/// Fields to set on a profile. `None` means "leave the stored value alone".
///
/// `social` is always written as a whole, so omitted social links are cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
}

impl ProfileUpdate {
    /// Top-level document fields this update writes.
    pub fn field_mask(&self) -> Vec<&'static str> {
        let optional = [
            ("company", &self.company),
            ("website", &self.website),
            ("location", &self.location),
            ("bio", &self.bio),
            ("githubusername", &self.githubusername),
        ];

        let mut mask: Vec<&'static str> = optional
            .into_iter()
            .filter(|(_, value)| value.is_some())
            .map(|(name, _)| name)
            .collect();
        mask.extend(["status", "skills", "social"]);
        mask
    }

    /// Set the fields this update carries on `profile`, leaving the rest as-is.
    pub fn apply_to(&self, profile: &mut Profile) {
        fn set(target: &mut Option<String>, value: &Option<String>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        set(&mut profile.company, &self.company);
        set(&mut profile.website, &self.website);
        set(&mut profile.location, &self.location);
        set(&mut profile.bio, &self.bio);
        set(&mut profile.githubusername, &self.githubusername);
        profile.status.clone_from(&self.status);
        profile.skills.clone_from(&self.skills);
        profile.social.clone_from(&self.social);
    }
}

/// Empty strings are treated the same as missing fields.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Split a comma-separated skills list, trimming each element.
pub fn parse_skills(csv: &str) -> Vec<String> {
    csv.split(',').map(|s| s.trim().to_string()).collect()
}

/// Build the upsert for a profile form.
///
/// Fails with a validation error if `status` or `skills` is empty.
pub fn build_update_fields(input: ProfileInput) -> Result<ProfileUpdate> {
    input
        .validate()
        .map_err(|e| AppError::Validation(field_errors::<ProfileInput>(&e)))?;

    Ok(ProfileUpdate {
        company: present(input.company),
        website: present(input.website),
        location: present(input.location),
        bio: present(input.bio),
        skills: parse_skills(&input.skills),
        status: input.status,
        githubusername: present(input.githubusername),
        social: Social {
            youtube: present(input.youtube),
            twitter: present(input.twitter),
            instagram: present(input.instagram),
            linkedin: present(input.linkedin),
            facebook: present(input.facebook),
        },
    })
}

/// A new experience or education entry, before it has an ID.
#[derive(Debug, Clone)]
pub enum NewEntry {
    Experience(ExperienceInput),
    Education(EducationInput),
}

impl NewEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            NewEntry::Experience(_) => EntryKind::Experience,
            NewEntry::Education(_) => EntryKind::Education,
        }
    }
}

impl From<ExperienceInput> for NewEntry {
    fn from(input: ExperienceInput) -> Self {
        NewEntry::Experience(input)
    }
}

impl From<EducationInput> for NewEntry {
    fn from(input: EducationInput) -> Self {
        NewEntry::Education(input)
    }
}

/// Give `entry` a fresh ID and put it at the front of its list.
pub fn append_entry(mut profile: Profile, entry: NewEntry) -> Profile {
    let id = Uuid::new_v4();

    match entry {
        NewEntry::Experience(input) => profile.experience.insert(
            0,
            Experience {
                id,
                title: input.title,
                company: input.company,
                location: present(input.location),
                from: input.from,
                to: present(input.to),
                current: input.current,
                description: present(input.description),
            },
        ),
        NewEntry::Education(input) => profile.education.insert(
            0,
            Education {
                id,
                school: input.school,
                degree: input.degree,
                fieldofstudy: input.fieldofstudy,
                from: input.from,
                to: present(input.to),
                current: input.current,
                description: present(input.description),
            },
        ),
    }

    profile
}

/// Remove the entry with `entry_id` from the `kind` list.
///
/// IDs compare as UUIDs, so case and surrounding whitespace are ignored.
/// An ID that is malformed or not in the list leaves the profile unchanged.
pub fn remove_entry(mut profile: Profile, entry_id: &str, kind: EntryKind) -> Profile {
    let Ok(id) = Uuid::parse_str(entry_id.trim()) else {
        return profile;
    };

    match kind {
        EntryKind::Experience => profile.experience.retain(|e| e.id != id),
        EntryKind::Education => profile.education.retain(|e| e.id != id),
    }

    profile
}
