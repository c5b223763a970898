//! Outbound OTP delivery: SMS gateway client and SMTP email fallback.
//!
//! Both channels are optional; each config loader returns `None` when its
//! required environment variables are absent, and the API skips the channel.

pub mod email;
pub mod sms;

pub use email::{EmailConfig, EmailDelivery, EmailError};
pub use sms::{SmsClient, SmsConfig, SmsError};
