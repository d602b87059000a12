//! Webhook wire payload types
//!
//! The remote chat service renders one rich "embed" per alert: a colored
//! sidebar, a description body, inline key/value fields, a UTC timestamp and
//! a footer signature.

use serde::Serialize;

/// Display name attached to every outbound alert
pub const SENDER_NAME: &str = "MLOps Bot";

/// Footer signature shown at the bottom of every embed
pub const FOOTER_TEXT: &str = "CV Cats & Dogs Monitoring";

/// Top-level webhook document: sender identity plus a single embed
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub username: &'static str,
    pub embeds: Vec<Embed>,
}

/// Rich alert message
#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    /// Display title (remote caps at 256 chars, not validated here)
    pub title: String,
    /// Message body (remote caps at 4096 chars)
    pub description: String,
    /// Sidebar color as a decimal RGB integer
    pub color: u32,
    /// ISO-8601 UTC timestamp
    pub timestamp: String,
    pub footer: EmbedFooter,
    /// Metric fields shown side by side; omitted entirely when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: &'static str,
}

/// One key/value metric displayed inside an embed
#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embed_with_fields(fields: Vec<EmbedField>) -> Embed {
        Embed {
            title: "Test".to_string(),
            description: "Body".to_string(),
            color: 3_447_003,
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            footer: EmbedFooter { text: FOOTER_TEXT },
            fields,
        }
    }

    #[test]
    fn test_fields_omitted_when_empty() {
        let json = serde_json::to_value(embed_with_fields(vec![])).unwrap();
        assert!(json.get("fields").is_none());
    }

    #[test]
    fn test_fields_preserve_order() {
        let fields = vec![
            EmbedField {
                name: "Current Accuracy".to_string(),
                value: "78.00%".to_string(),
                inline: true,
            },
            EmbedField {
                name: "Threshold".to_string(),
                value: "85.00%".to_string(),
                inline: true,
            },
        ];

        let json = serde_json::to_value(embed_with_fields(fields)).unwrap();
        let rendered = json["fields"].as_array().unwrap();
        assert_eq!(rendered[0]["name"], "Current Accuracy");
        assert_eq!(rendered[1]["name"], "Threshold");
        assert_eq!(rendered[0]["inline"], true);
    }

    #[test]
    fn test_payload_shape() {
        let payload = WebhookPayload {
            username: SENDER_NAME,
            embeds: vec![embed_with_fields(vec![])],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["username"], "MLOps Bot");
        assert_eq!(json["embeds"].as_array().unwrap().len(), 1);
        assert_eq!(json["embeds"][0]["footer"]["text"], "CV Cats & Dogs Monitoring");
    }
}
