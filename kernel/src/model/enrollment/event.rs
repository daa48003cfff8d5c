use crate::model::id::{EventId, UserId};
use derive_new::new;

#[derive(Debug, new)]
pub struct JoinEvent {
    pub event_id: EventId,
    pub user_id: UserId,
}
