//! Message entity <-> model mapper

use plural_core::value_objects::MemberId;
use plural_core::Message;

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: model.id,
            member_id: MemberId::new(model.member_id),
            text: model.message,
            timestamp: model.timestamp,
            created_at: model.created_at,
        }
    }
}
