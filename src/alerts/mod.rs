//! Outbound webhook alerting
//!
//! Sends rich chat-webhook notifications for service incidents: model
//! degradation, latency spikes, database loss and deployments. Delivery is
//! fail-open: an unconfigured or unreachable endpoint never fails the caller.

pub mod dispatcher;
pub mod embed;
pub mod notices;

pub use dispatcher::{AlertDispatcher, AlertError, Severity};
pub use embed::{Embed, EmbedField, EmbedFooter, WebhookPayload};
pub use notices::{DEFAULT_ACCURACY_THRESHOLD, DEFAULT_LATENCY_THRESHOLD_MS};
