//! Member entity <-> model mapper

use plural_core::error::DomainError;
use plural_core::value_objects::{MemberId, ProxyTag};
use plural_core::Member;
use tracing::warn;

use crate::models::MemberModel;

/// Convert MemberModel to Member entity
///
/// A corrupt proxy tag column degrades to "no tags" so one bad row
/// cannot hide the rest of the member list.
impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        let proxy_tags = match decode_proxy_tags(model.proxy_tags.as_deref()) {
            Ok(tags) => tags,
            Err(e) => {
                warn!(member_id = model.id, error = %e, "ignoring unreadable proxy tags");
                Vec::new()
            }
        };

        Member {
            id: MemberId::new(model.id),
            name: model.name,
            pronouns: model.pronouns,
            avatar_path: model.avatar_path,
            color: model.color,
            description: model.description,
            remote_id: model.remote_id,
            proxy_tags,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Encode a tag list for the `proxy_tags` column; an empty list is stored as NULL
pub fn encode_proxy_tags(tags: &[ProxyTag]) -> Result<Option<String>, DomainError> {
    if tags.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(tags)
        .map(Some)
        .map_err(|e| DomainError::InvalidProxyTags(e.to_string()))
}

/// Decode the `proxy_tags` column
pub fn decode_proxy_tags(raw: Option<&str>) -> Result<Vec<ProxyTag>, DomainError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => {
            serde_json::from_str(json).map_err(|e| DomainError::InvalidProxyTags(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(proxy_tags: Option<&str>) -> MemberModel {
        MemberModel {
            id: 3,
            name: "Alex".to_string(),
            pronouns: Some("they/them".to_string()),
            avatar_path: None,
            color: None,
            description: None,
            remote_id: Some("abcde".to_string()),
            proxy_tags: proxy_tags.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_encode_empty_is_null() {
        assert_eq!(encode_proxy_tags(&[]).unwrap(), None);
    }

    #[test]
    fn test_encode_omits_absent_side() {
        let json = encode_proxy_tags(&[ProxyTag::prefix("a:")]).unwrap().unwrap();
        assert_eq!(json, r#"[{"prefix":"a:"}]"#);
    }

    #[test]
    fn test_model_to_entity() {
        let member = Member::from(model(Some(r#"[{"suffix":"-a"}]"#)));
        assert_eq!(member.id, MemberId::new(3));
        assert_eq!(member.remote_id.as_deref(), Some("abcde"));
        assert_eq!(member.proxy_tags, vec![ProxyTag::suffix("-a")]);
    }

    #[test]
    fn test_corrupt_tags_degrade_to_empty() {
        let member = Member::from(model(Some("{not json")));
        assert!(member.proxy_tags.is_empty());
        assert!(decode_proxy_tags(Some("{not json")).is_err());
    }
}
