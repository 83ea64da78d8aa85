use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchWcaParams {
    /// Free text: a person's name or WCA ID, a competition, or a regulation number.
    pub query: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRegulationParams {
    /// Regulation or guideline ID such as "4a1" or "2e+".
    pub regulation_id: String,
}

/// Markup dialect the card body is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    Plain,
    Markdown,
    Html,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MessageBody {
    pub text: String,
    pub parse_mode: ParseMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResultCard {
    pub id: String,
    pub title: String,
    pub thumb_url: String,
    pub target_url: String,
    pub description: String,
    pub body: MessageBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchWcaResponse {
    pub results: Vec<ResultCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RegulationLookupResponse {
    pub found: bool,
    /// The rendered regulation when found, otherwise a human-readable fallback.
    pub message: MessageBody,
    pub item: Option<ResultCard>,
}
