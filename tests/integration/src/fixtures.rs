//! Test fixtures and canned remote payloads

use serde_json::{json, Value};

/// Token the mock Simply Plural API accepts
pub const SP_TOKEN: &str = "test-token";

/// PluralKit system id served by the mock
pub const PK_SYSTEM: &str = "abcde";

/// Simply Plural account id served by the mock
pub const SP_ACCOUNT: &str = "acct42";

/// Smallest valid PNG (1x1, transparent)
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// PluralKit member list: one working avatar, one that 404s, one without
pub fn pluralkit_members(base_url: &str) -> Value {
    json!([
        {
            "id": "aaaaa",
            "name": "Alex",
            "pronouns": "they/them",
            "color": "FF8800",
            "avatar_url": format!("{base_url}/avatars/alex.png"),
            "proxy_tags": [{ "prefix": "a:", "suffix": null }]
        },
        {
            "id": "bbbbb",
            "name": "Sam",
            "pronouns": null,
            "avatar_url": format!("{base_url}/avatars/missing.png"),
            "proxy_tags": [{ "prefix": null, "suffix": "-s" }]
        },
        {
            "id": "ccccc",
            "name": "Rin",
            "avatar_url": null,
            "proxy_tags": []
        }
    ])
}

/// `pk;export` document whose avatars point at the mock CDN
pub fn pluralkit_export(base_url: &str) -> Value {
    json!({
        "version": 2,
        "id": PK_SYSTEM,
        "uuid": "7d3f4a52-0000-4000-8000-000000000000",
        "name": "Test System",
        "members": [
            {
                "id": "aaaaa",
                "name": "alex",
                "display_name": "Alex",
                "color": "ff8800",
                "avatar_url": format!("{base_url}/avatars/alex.png"),
                "proxy_tags": [{ "prefix": "a:", "suffix": null }]
            },
            {
                "id": "ddddd",
                "name": "Text",
                "avatar_url": format!("{base_url}/avatars/text.png"),
                "proxy_tags": []
            }
        ],
        "switches": []
    })
}

/// Simply Plural member list
pub fn simplyplural_members(base_url: &str) -> Value {
    json!([
        {
            "id": "sp-1",
            "content": {
                "name": "Juno",
                "pronouns": "she/her",
                "avatarUrl": format!("{base_url}/avatars/juno.png"),
                "color": "#3366FF",
                "desc": "front desk"
            }
        },
        {
            "id": "sp-2",
            "content": { "name": "Kai" }
        }
    ])
}
