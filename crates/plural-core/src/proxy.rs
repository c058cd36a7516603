//! Proxy detection - attribute a chat message to the member whose tag it carries

use crate::entities::Member;

/// A member matched by one of their proxy tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyMatch<'a> {
    pub member: &'a Member,
    /// Message text with the tag removed and whitespace trimmed
    pub text: &'a str,
}

/// Find the first member whose proxy tag wraps `text`
///
/// Members are tried in slice order and tags in their stored order.
/// Blank messages never match.
pub fn detect_proxy<'a>(members: &'a [Member], text: &'a str) -> Option<ProxyMatch<'a>> {
    if text.trim().is_empty() {
        return None;
    }

    members.iter().find_map(|member| {
        member
            .proxy_tags
            .iter()
            .find_map(|tag| tag.strip(text))
            .map(|inner| ProxyMatch { member, text: inner })
    })
}
