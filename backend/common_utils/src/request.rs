//! Transport-ready request value types.

use serde::{Deserialize, Serialize};

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

/// An outbound request as handed to the HTTP layer.
#[derive(Debug)]
pub struct Request {
    pub url: String,
    pub method: Method,
    pub body: Option<RequestContent>,
}

impl Request {
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::Post,
            body: None,
        }
    }

    pub fn set_body(mut self, body: RequestContent) -> Self {
        self.body = Some(body);
        self
    }
}

pub enum RequestContent {
    FormUrlEncoded(Vec<(String, String)>),
}

impl RequestContent {
    /// Render the body as it goes on the wire.
    pub fn render(&self) -> String {
        match self {
            Self::FormUrlEncoded(pairs) => {
                serde_urlencoded::to_string(pairs).unwrap_or_default()
            }
        }
    }
}

// Bodies can carry cardholder data; Debug prints the body kind only.
impl std::fmt::Debug for RequestContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::FormUrlEncoded(_) => "FormUrlEncodedRequestBody",
        })
    }
}
