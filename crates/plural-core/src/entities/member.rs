//! Member entity - one identity tracked within a plural system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{MemberId, ProxyTag};

/// Name given to members created from the member screen before they are renamed
pub const PLACEHOLDER_MEMBER_NAME: &str = "New Member";

/// Stored member entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub pronouns: Option<String>,
    /// Absolute path, or a path relative to the storage root
    pub avatar_path: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    /// Identifier of the member in the service it was imported from
    pub remote_id: Option<String>,
    pub proxy_tags: Vec<ProxyTag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a member with only a name set
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            pronouns: None,
            avatar_path: None,
            color: None,
            description: None,
            remote_id: None,
            proxy_tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the member has any proxy tags that can match a message
    #[inline]
    pub fn has_proxy_tags(&self) -> bool {
        self.proxy_tags.iter().any(ProxyTag::is_usable)
    }

    /// Check if the member has an avatar reference
    #[inline]
    pub fn has_avatar(&self) -> bool {
        self.avatar_path.is_some()
    }

    /// Apply a single-field edit in place
    pub fn apply(&mut self, field: MemberField) {
        match field {
            MemberField::Name(name) => self.name = name,
            MemberField::Pronouns(pronouns) => self.pronouns = pronouns,
            MemberField::AvatarPath(path) => self.avatar_path = path,
            MemberField::Color(color) => self.color = color,
            MemberField::Description(description) => self.description = description,
            MemberField::ProxyTags(tags) => self.proxy_tags = tags,
        }
        self.updated_at = Utc::now();
    }
}

/// A member that has not been stored yet (no id)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub pronouns: Option<String>,
    pub avatar_path: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub remote_id: Option<String>,
    pub proxy_tags: Vec<ProxyTag>,
}

impl NewMember {
    /// Create an unsaved member with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_pronouns(mut self, pronouns: impl Into<String>) -> Self {
        self.pronouns = Some(pronouns.into());
        self
    }

    pub fn with_avatar(mut self, avatar_path: impl Into<String>) -> Self {
        self.avatar_path = Some(avatar_path.into());
        self
    }

    pub fn with_proxy_tags(mut self, proxy_tags: Vec<ProxyTag>) -> Self {
        self.proxy_tags = proxy_tags;
        self
    }

    /// Validate fields that the store constrains
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)
    }

    /// Attach a store-assigned id
    pub fn into_member(self, id: MemberId, now: DateTime<Utc>) -> Member {
        Member {
            id,
            name: self.name,
            pronouns: self.pronouns,
            avatar_path: self.avatar_path,
            color: self.color,
            description: self.description,
            remote_id: self.remote_id,
            proxy_tags: self.proxy_tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A single-attribute edit of a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberField {
    Name(String),
    Pronouns(Option<String>),
    AvatarPath(Option<String>),
    Color(Option<String>),
    Description(Option<String>),
    ProxyTags(Vec<ProxyTag>),
}

impl MemberField {
    /// Field names accepted by [`MemberField::parse`]
    pub const NAMES: [&'static str; 6] =
        ["name", "pronouns", "avatar", "color", "description", "proxy"];

    /// Build a field edit from a textual field name and value
    ///
    /// Empty values clear optional fields. `proxy` takes a JSON array of
    /// `{prefix?, suffix?}` objects.
    pub fn parse(field: &str, value: &str) -> Result<Self, DomainError> {
        let optional = || (!value.is_empty()).then(|| value.to_string());

        match field {
            "name" => Ok(Self::Name(value.to_string())),
            "pronouns" => Ok(Self::Pronouns(optional())),
            "avatar" | "avatar_path" => Ok(Self::AvatarPath(optional())),
            "color" => Ok(Self::Color(optional())),
            "description" => Ok(Self::Description(optional())),
            "proxy" | "proxy_tags" => {
                if value.is_empty() {
                    return Ok(Self::ProxyTags(Vec::new()));
                }
                serde_json::from_str(value)
                    .map(Self::ProxyTags)
                    .map_err(|e| DomainError::InvalidProxyTags(e.to_string()))
            }
            other => Err(DomainError::ValidationError(format!(
                "unknown member field '{other}' (expected one of: {})",
                Self::NAMES.join(", ")
            ))),
        }
    }

    /// Name of the edited attribute (for logging)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Pronouns(_) => "pronouns",
            Self::AvatarPath(_) => "avatar",
            Self::Color(_) => "color",
            Self::Description(_) => "description",
            Self::ProxyTags(_) => "proxy",
        }
    }

    /// Validate the new value
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::Name(name) => validate_name(name),
            _ => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::EmptyMemberName);
    }
    Ok(())
}
