//! LINE Messaging API transport.
//!
//! Pushes alert messages to a single LINE user via the bot push endpoint.
//! Alerts go out as a Flex bubble (colored header for the risk level, a
//! table of the measurements, the advice and precaution text) with a plain
//! `altText` fallback for clients that cannot render Flex.
//!
//! API reference: https://developers.line.biz/en/reference/messaging-api/#send-push-message

use std::time::Duration;

use serde_json::json;

use crate::model::{AlertEvent, NotifyError};
use crate::notify::Notifier;

const LINE_PUSH_URL: &str = "https://api.line.me/v2/bot/message/push";

/// Environment variables holding the credentials.
pub const ENV_CHANNEL_TOKEN: &str = "LINE_CHANNEL_ACCESS_TOKEN";
pub const ENV_USER_ID: &str = "LINE_USER_ID";

/// LINE push client bound to one channel token and one recipient.
///
/// Missing credentials are a construction-time error; a notifier that
/// silently cannot deliver would defeat the whole alerting path.
pub struct LineNotifier {
    client: reqwest::blocking::Client,
    channel_access_token: String,
    user_id: String,
}

impl LineNotifier {
    pub fn new(
        channel_access_token: String,
        user_id: String,
    ) -> Result<Self, crate::model::ConfigError> {
        if channel_access_token.is_empty() {
            return Err(crate::model::ConfigError::MissingCredential(ENV_CHANNEL_TOKEN));
        }
        if user_id.is_empty() {
            return Err(crate::model::ConfigError::MissingCredential(ENV_USER_ID));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| crate::model::ConfigError::ClientInit(e.to_string()))?;
        Ok(LineNotifier {
            client,
            channel_access_token,
            user_id,
        })
    }

    /// Build from `LINE_CHANNEL_ACCESS_TOKEN` / `LINE_USER_ID`, loading a
    /// `.env` file first if one is present.
    pub fn from_env() -> Result<Self, crate::model::ConfigError> {
        dotenv::dotenv().ok();
        let token = std::env::var(ENV_CHANNEL_TOKEN)
            .map_err(|_| crate::model::ConfigError::MissingCredential(ENV_CHANNEL_TOKEN))?;
        let user_id = std::env::var(ENV_USER_ID)
            .map_err(|_| crate::model::ConfigError::MissingCredential(ENV_USER_ID))?;
        Self::new(token, user_id)
    }

    /// POST one message object to the push endpoint.
    fn push(&self, message: serde_json::Value) -> Result<(), NotifyError> {
        let body = json!({
            "to": self.user_id,
            "messages": [message],
        });

        let response = self
            .client
            .post(LINE_PUSH_URL)
            .bearer_auth(&self.channel_access_token)
            .json(&body)
            .send()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

impl Notifier for LineNotifier {
    fn send_alert(&self, event: &AlertEvent, hydration_ml: u32) -> Result<(), NotifyError> {
        self.push(build_flex_message(event, hydration_ml))
    }

    fn send_text(&self, message: &str) -> Result<(), NotifyError> {
        self.push(json!({ "type": "text", "text": message }))
    }
}

// ---------------------------------------------------------------------------
// Message construction
// ---------------------------------------------------------------------------

fn level_icon(event: &AlertEvent) -> &'static str {
    use crate::alert::RiskLevel;
    match event.level {
        RiskLevel::Danger => "🆘",
        RiskLevel::SevereWarning => "🚨",
        _ => "⚠️",
    }
}

/// Two-column baseline row for the measurement table.
fn detail_row(name: &str, value: String) -> serde_json::Value {
    json!({
        "type": "box",
        "layout": "baseline",
        "spacing": "sm",
        "contents": [
            { "type": "text", "text": name, "color": "#aaaaaa", "size": "sm", "flex": 2 },
            { "type": "text", "text": value, "wrap": true, "color": "#666666",
              "size": "md", "flex": 3, "weight": "bold" },
        ],
    })
}

fn section(heading: &str, text: &str) -> serde_json::Value {
    json!({
        "type": "box",
        "layout": "vertical",
        "margin": "lg",
        "contents": [
            { "type": "text", "text": heading, "size": "sm", "color": "#aaaaaa", "weight": "bold" },
            { "type": "text", "text": text, "size": "sm", "wrap": true,
              "color": "#666666", "margin": "sm" },
        ],
    })
}

/// Assemble the Flex bubble for one alert event.
fn build_flex_message(event: &AlertEvent, hydration_ml: u32) -> serde_json::Value {
    let level = event.level;
    let icon = level_icon(event);
    let measured_at = event.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();

    let bubble = json!({
        "type": "bubble",
        "size": "mega",
        "header": {
            "type": "box",
            "layout": "vertical",
            "contents": [
                { "type": "text", "text": format!("{} 熱中症警告", icon),
                  "weight": "bold", "size": "xl", "color": "#ffffff" },
            ],
            "backgroundColor": level.color(),
        },
        "body": {
            "type": "box",
            "layout": "vertical",
            "contents": [
                { "type": "text", "text": level.label(), "weight": "bold", "size": "xxl",
                  "color": level.color(), "align": "center", "margin": "md" },
                { "type": "separator", "margin": "lg" },
                {
                    "type": "box",
                    "layout": "vertical",
                    "margin": "lg",
                    "spacing": "sm",
                    "contents": [
                        detail_row("🌡️ 気温", format!("{}°C", event.reading.temperature_c)),
                        detail_row("💧 湿度", format!("{}%", event.reading.humidity_pct)),
                        detail_row("😓 不快指数", format!("{}", event.indices.discomfort)),
                        detail_row("🥵 WBGT", format!("{}°C", event.indices.wbgt)),
                        detail_row("🚰 水分補給", format!("{} ml/時", hydration_ml)),
                    ],
                },
                { "type": "separator", "margin": "lg" },
                section("💡 推奨対策", level.advice()),
                { "type": "separator", "margin": "lg" },
                section("⚠️ 注意事項", level.precautions()),
            ],
        },
        "footer": {
            "type": "box",
            "layout": "vertical",
            "contents": [
                { "type": "text", "text": format!("測定時刻: {}", measured_at),
                  "size": "xs", "color": "#aaaaaa", "align": "center" },
            ],
        },
    });

    json!({
        "type": "flex",
        "altText": format!("{} 熱中症警告: {}", icon, level.label()),
        "contents": bubble,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
