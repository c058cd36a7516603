//! Value objects - immutable types that represent domain concepts

mod color;
mod member_id;
mod proxy_tag;
mod theme;

pub use color::{ColorParseError, ThemeColor};
pub use member_id::{MemberId, MemberIdParseError};
pub use proxy_tag::ProxyTag;
pub use theme::{parse_themes, Theme, ThemeColors, ThemeType};
