use std::sync::Arc;

use carelink_notify::{EmailDelivery, SmsClient};
use carelink_voice::VoiceClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: carelink_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// SMS gateway client; `None` when not configured.
    pub sms: Option<Arc<SmsClient>>,
    /// SMTP delivery; `None` when not configured.
    pub mailer: Option<Arc<EmailDelivery>>,
    /// Voice-cloning client; `None` when the integration is disabled.
    pub voice: Option<Arc<VoiceClient>>,
}
