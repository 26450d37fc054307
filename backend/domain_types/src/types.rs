//! Gateway connection settings.

use common_utils::{PeekInterface, Secret};
use serde::Deserialize;
use url::Url;

use crate::errors::ConnectorError;

/// Immutable SmartRoute merchant configuration.
///
/// Loaded once at startup, validated, then shared read-only across calls;
/// nothing in the connector mutates it.
#[derive(Clone, Debug, Deserialize)]
pub struct GatewaySettings {
    /// Direct-post message handler endpoint.
    pub direct_post_url: Url,
    /// Hosted payment page the browser is redirected to.
    pub payment_page_url: Url,
    /// B2B transaction inquiry endpoint.
    pub inquiry_url: Url,
    /// B2B refund endpoint.
    pub refund_url: Url,
    pub merchant_id: String,
    /// Shared authentication token used as the secure-hash secret.
    pub authentication_token: Secret<String>,
    /// Numeric ISO 4217 currency code, e.g. `682` for SAR.
    pub currency_iso_code: String,
    #[serde(default)]
    pub channel: Channel,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub theme_id: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Merchant callback URL the gateway posts the payment response to.
    #[serde(default)]
    pub response_back_url: Option<Url>,
    #[serde(default)]
    pub failed_payment_reply_url: Option<Url>,
    #[serde(default = "default_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_quantity() -> u32 {
    1
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    Web,
    Mobile,
    CallCenter,
}

impl Channel {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Web => "0",
            Self::Mobile => "1",
            Self::CallCenter => "2",
        }
    }
}

impl GatewaySettings {
    /// Startup validation. Operations assume a validated configuration and
    /// never re-check these fields.
    pub fn validate(&self) -> Result<(), ConnectorError> {
        if self.merchant_id.trim().is_empty() {
            return Err(ConnectorError::IncompleteMerchantConfiguration {
                field_name: "merchant_id",
            });
        }
        if self.authentication_token.peek().trim().is_empty() {
            return Err(ConnectorError::IncompleteMerchantConfiguration {
                field_name: "authentication_token",
            });
        }
        if self.currency_iso_code.trim().is_empty() {
            return Err(ConnectorError::IncompleteMerchantConfiguration {
                field_name: "currency_iso_code",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_json(token: &str) -> String {
        format!(
            r#"{{
                "direct_post_url": "https://gateway.example/SRPayMsgHandler",
                "payment_page_url": "https://gateway.example/SmartRoutePaymentWeb/SRPayMsgHandler",
                "inquiry_url": "https://gateway.example/SRPayMsgHandler",
                "refund_url": "https://gateway.example/SRPayMsgHandler",
                "merchant_id": "MERCHANT001",
                "authentication_token": "{token}",
                "currency_iso_code": "682"
            }}"#
        )
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: GatewaySettings =
            serde_json::from_str(&settings_json("TESTTOKEN123")).expect("settings");
        assert_eq!(settings.channel, Channel::Web);
        assert_eq!(settings.quantity, 1);
        assert_eq!(settings.version, "1.0");
        assert_eq!(settings.language, "en");
        assert_eq!(settings.http_timeout_secs, 30);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn blank_authentication_token_fails_validation() {
        let settings: GatewaySettings =
            serde_json::from_str(&settings_json("   ")).expect("settings");
        assert!(matches!(
            settings.validate(),
            Err(ConnectorError::IncompleteMerchantConfiguration {
                field_name: "authentication_token"
            })
        ));
    }

    #[test]
    fn channel_codes_match_the_wire_contract() {
        assert_eq!(Channel::Web.as_code(), "0");
        assert_eq!(Channel::Mobile.as_code(), "1");
        assert_eq!(Channel::CallCenter.as_code(), "2");
    }
}
