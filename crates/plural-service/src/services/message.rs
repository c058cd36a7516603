//! Message service
//!
//! Attributes chat lines to members by proxy tag.

use plural_core::detect_proxy;
use plural_core::entities::Message;
use plural_core::traits::MessageRepository;
use plural_core::value_objects::MemberId;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn repo(&self) -> ServiceResult<&'a dyn MessageRepository> {
        self.ctx
            .message_repo()
            .ok_or(ServiceError::Unavailable("messages"))
    }

    /// Store a message, attributed by proxy tag or to `fallback`
    ///
    /// A matching proxy tag wins and its tag is stripped from the stored text.
    /// Otherwise the whole text is stored under the fallback member.
    #[instrument(skip(self, text))]
    pub async fn send(&self, text: &str, fallback: Option<MemberId>) -> ServiceResult<Message> {
        let repo = self.repo()?;
        if text.trim().is_empty() {
            return Err(ServiceError::validation("message is empty"));
        }

        let members = self.ctx.member_repo().list().await?;
        let (member_id, body) = match detect_proxy(&members, text) {
            Some(hit) => {
                debug!(member_id = %hit.member.id, "proxy tag matched");
                (hit.member.id, hit.text)
            }
            None => match fallback {
                Some(id) => (id, text.trim()),
                None => {
                    return Err(ServiceError::validation(
                        "no proxy tag matched and no member is selected",
                    ))
                }
            },
        };

        Ok(repo
            .create(member_id, body, &Message::display_timestamp())
            .await?)
    }

    /// Most recent messages, newest first
    #[instrument(skip(self))]
    pub async fn recent(&self, limit: i64) -> ServiceResult<Vec<Message>> {
        Ok(self.repo()?.recent(limit).await?)
    }

    /// Total number of stored messages
    pub async fn count(&self) -> ServiceResult<i64> {
        Ok(self.repo()?.count().await?)
    }
}
