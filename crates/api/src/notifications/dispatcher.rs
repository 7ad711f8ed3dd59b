//! Event-to-notification fan-out engine.
//!
//! [`NotificationDispatcher`] subscribes to the platform event bus and, for
//! each schedule event, writes one notification row per recipient and sends
//! the matching email. Running off the bus keeps the fan-out work (N emails
//! for N followers) out of the HTTP request that committed the change.

use std::sync::Arc;

use tokio::sync::broadcast;

use fansync_core::types::DbId;
use fansync_db::models::notification::CreateNotification;
use fansync_db::repositories::{FavoriteRepo, LikeRepo, NotificationRepo};
use fansync_db::DbPool;
use fansync_events::bus::{SCHEDULE_CREATED, SCHEDULE_DELETED, SCHEDULE_UPDATED};
use fansync_events::{EmailMessage, Mailer, PlatformEvent};

type DispatchError = Box<dyn std::error::Error + Send + Sync>;

/// A deletion-notice recipient, snapshotted into the `schedule.deleted`
/// payload before the favorites rows cascade away.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Recipient {
    pub user_id: DbId,
    pub email: String,
    pub nickname: String,
}

/// Fans schedule events out to notification rows and emails.
pub struct NotificationDispatcher {
    pool: DbPool,
    mailer: Arc<dyn Mailer>,
    site_url: String,
}

impl NotificationDispatcher {
    /// Create a new dispatcher. `site_url` is used for the link appended to
    /// each notification email.
    pub fn new(pool: DbPool, mailer: Arc<dyn Mailer>, site_url: impl Into<String>) -> Self {
        Self {
            pool,
            mailer,
            site_url: site_url.into(),
        }
    }

    /// Run the main dispatch loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](fansync_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.dispatch(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to dispatch event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification dispatcher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification dispatcher shutting down");
                    break;
                }
            }
        }
    }

    /// Fan a single event out to all recipients.
    ///
    /// A mail transport error aborts the remaining recipients for this
    /// event; the run loop logs it.
    pub async fn dispatch(&self, event: &PlatformEvent) -> Result<(), DispatchError> {
        match event.event_type.as_str() {
            SCHEDULE_CREATED => self.handle_created(event).await,
            SCHEDULE_UPDATED => self.handle_updated(event).await,
            SCHEDULE_DELETED => self.handle_deleted(event).await,
            other => {
                tracing::warn!(event_type = other, "Unknown event type, skipping");
                Ok(())
            }
        }
    }

    /// `schedule.created`: notify everyone who likes the schedule's artist
    /// or group.
    async fn handle_created(&self, event: &PlatformEvent) -> Result<(), DispatchError> {
        let Some(title) = event.payload["title"].as_str() else {
            tracing::warn!(event_type = %event.event_type, "Payload missing title, skipping");
            return Ok(());
        };
        let display_name = event.payload["display_name"].as_str().unwrap_or_default();

        let (likes, body) = if let Some(artist_id) = event.payload["artist_id"].as_i64() {
            (
                LikeRepo::list_for_artist(&self.pool, artist_id).await?,
                format!("좋아요하신 아티스트 {display_name}의 새 일정 '{title}'이 등록되었습니다."),
            )
        } else if let Some(group_id) = event.payload["artist_group_id"].as_i64() {
            (
                LikeRepo::list_for_artist_group(&self.pool, group_id).await?,
                format!(
                    "좋아요하신 아티스트 그룹 {display_name}의 새 일정 '{title}'이 등록되었습니다."
                ),
            )
        } else {
            tracing::warn!(event_type = %event.event_type, "Payload names no owner, skipping");
            return Ok(());
        };

        let link = self.schedule_link(event.source_entity_id);
        for like in &likes {
            NotificationRepo::create(
                &self.pool,
                &CreateNotification {
                    is_active: true,
                    likes_id: Some(like.id),
                    favorites_id: None,
                },
            )
            .await?;

            let message = EmailMessage::new(
                like.user_email.clone(),
                "새 일정 등록 알림",
                format!("{body}\n{link}"),
            );
            self.mailer.send(&message).await?;
        }

        tracing::info!(
            recipients = likes.len(),
            schedule_id = event.source_entity_id,
            "Dispatched schedule.created notifications"
        );
        Ok(())
    }

    /// `schedule.updated`: notify everyone who favorited the schedule.
    async fn handle_updated(&self, event: &PlatformEvent) -> Result<(), DispatchError> {
        let Some(schedule_id) = event.source_entity_id else {
            tracing::warn!(event_type = %event.event_type, "Event names no schedule, skipping");
            return Ok(());
        };
        let title = event.payload["title"].as_str().unwrap_or_default();

        let favorites = FavoriteRepo::list_for_schedule(&self.pool, schedule_id).await?;
        let body = format!("즐겨찾기하신 일정 '{title}'이 수정되었습니다.");
        let link = self.schedule_link(Some(schedule_id));

        for favorite in &favorites {
            NotificationRepo::create(
                &self.pool,
                &CreateNotification {
                    is_active: true,
                    likes_id: None,
                    favorites_id: Some(favorite.id),
                },
            )
            .await?;

            let message = EmailMessage::new(
                favorite.user_email.clone(),
                "일정 수정 알림",
                format!("{body}\n{link}"),
            );
            self.mailer.send(&message).await?;
        }

        tracing::info!(
            recipients = favorites.len(),
            schedule_id,
            "Dispatched schedule.updated notifications"
        );
        Ok(())
    }

    /// `schedule.deleted`: notify the recipients snapshotted in the payload.
    /// The favorite rows are gone, so the notification rows carry no source
    /// reference.
    async fn handle_deleted(&self, event: &PlatformEvent) -> Result<(), DispatchError> {
        let title = event.payload["title"].as_str().unwrap_or_default();
        let recipients: Vec<Recipient> =
            match serde_json::from_value(event.payload["recipients"].clone()) {
                Ok(recipients) => recipients,
                Err(e) => {
                    tracing::warn!(error = %e, "Malformed recipient snapshot, skipping");
                    return Ok(());
                }
            };

        let body = format!("즐겨찾기하신 일정 '{title}'이 삭제되었습니다.");

        for recipient in &recipients {
            NotificationRepo::create(
                &self.pool,
                &CreateNotification {
                    is_active: true,
                    likes_id: None,
                    favorites_id: None,
                },
            )
            .await?;

            let message = EmailMessage::new(
                recipient.email.clone(),
                "일정 삭제 알림",
                // The schedule page no longer exists, link to the home page.
                format!("{body}\n{}", self.site_url),
            );
            self.mailer.send(&message).await?;
        }

        tracing::info!(
            recipients = recipients.len(),
            schedule_id = event.source_entity_id,
            "Dispatched schedule.deleted notifications"
        );
        Ok(())
    }

    fn schedule_link(&self, schedule_id: Option<DbId>) -> String {
        match schedule_id {
            Some(id) => format!("{}/schedules/{id}/", self.site_url),
            None => self.site_url.clone(),
        }
    }
}
