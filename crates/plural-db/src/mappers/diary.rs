//! Diary entry entity <-> model mapper

use plural_core::value_objects::MemberId;
use plural_core::DiaryEntry;

use crate::models::DiaryEntryModel;

impl From<DiaryEntryModel> for DiaryEntry {
    fn from(model: DiaryEntryModel) -> Self {
        DiaryEntry {
            id: model.id,
            member_id: MemberId::new(model.member_id),
            member_name: model.member_name,
            title: model.title,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
