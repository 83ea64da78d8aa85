/// MCP server exposing the WCA search pipeline.
///
/// Exposes two tools:
/// - `search_wca`: Omnisearch over people, competitions and regulations
/// - `get_regulation`: Look up a regulation or guideline by ID in the local dataset
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::{error, info};

use crate::error::AppError;
use crate::search::SearchEngine;
use wca_common::mcp_api::{
    GetRegulationParams, MessageBody, ParseMode, RegulationLookupResponse, ResultCard,
    SearchWcaParams, SearchWcaResponse,
};

const HELP_TEXT: &str = "WCA search server. Use search_wca with a person's name or WCA ID, a \
competition name, or a regulation number to search the World Cube Association. Queries \
shorter than three characters return no results. Use get_regulation to read a specific \
regulation or guideline (for example 4a1 or 4a1+) from the bundled dataset.";

#[derive(Clone)]
pub struct WcaSearchServer {
    search_engine: Arc<SearchEngine>,
    tool_router: ToolRouter<WcaSearchServer>,
}

impl WcaSearchServer {
    pub fn new(search_engine: Arc<SearchEngine>) -> Self {
        Self {
            search_engine,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl WcaSearchServer {
    #[tool(description = "Search the World Cube Association for people, competitions and regulations. Returns display-ready result cards in relevance order.")]
    async fn search_wca(
        &self,
        Parameters(params): Parameters<SearchWcaParams>,
    ) -> Result<Json<SearchWcaResponse>, String> {
        let results = self
            .search_engine
            .search(&params.query)
            .await
            .map_err(|e| {
                log_failure(&params.query, &e);
                format!("search failed: {e}")
            })?;

        Ok(Json(SearchWcaResponse {
            results: results.into_iter().map(ResultCard::from).collect(),
        }))
    }

    #[tool(description = "Get a WCA Regulation or Guideline by ID (e.g. '4a1', '4a1+'). Exact, case-sensitive match.")]
    async fn get_regulation(
        &self,
        Parameters(params): Parameters<GetRegulationParams>,
    ) -> Result<Json<RegulationLookupResponse>, String> {
        let regulation_id = params.regulation_id.trim();
        if regulation_id.is_empty() {
            return Err("regulation_id must not be empty".to_string());
        }

        let (lookup, item) = self.search_engine.regulation(regulation_id);
        info!(regulation_id, found = lookup.is_found(), "regulation lookup");

        let message = match &item {
            Some(card) => card.body.clone(),
            None => MessageBody {
                text: lookup.message().to_string(),
                parse_mode: ParseMode::Plain,
            },
        };

        Ok(Json(RegulationLookupResponse {
            found: lookup.is_found(),
            message,
            item: item.map(ResultCard::from),
        }))
    }
}

fn log_failure(query: &str, err: &AppError) {
    let timeout = matches!(err, AppError::Common(e) if e.is_timeout());
    error!(query, timeout, error = %err, "search request failed");
}

#[tool_handler]
impl ServerHandler for WcaSearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "wca-search".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(HELP_TEXT.to_string()),
        }
    }
}
