use std::sync::Arc;

use tracing::info;

use crate::classify::{classify, render_regulation};
use crate::config::SiteUrls;
use crate::error::AppError;
use crate::model::RenderedItem;
use crate::rules::{RuleLookup, RulesIndex};
use wca_common::wca_api::WcaClient;

/// Queries this short are answered with nothing rather than hitting the API.
const MIN_QUERY_CHARS: usize = 3;

pub struct SearchEngine {
    client: Arc<WcaClient>,
    rules: Arc<RulesIndex>,
    site: SiteUrls,
}

impl SearchEngine {
    pub fn new(client: Arc<WcaClient>, rules: Arc<RulesIndex>, site: SiteUrls) -> Self {
        Self {
            client,
            rules,
            site,
        }
    }

    /// Runs the WCA omnisearch and renders every supported hit, in upstream order.
    pub async fn search(&self, query: &str) -> Result<Vec<RenderedItem>, AppError> {
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let response = self.client.search(query).await?;
        let hits = response.result.len();
        let items: Vec<RenderedItem> = response
            .result
            .iter()
            .filter_map(|raw| classify(raw, &self.site))
            .collect();

        info!(query, hits, rendered = items.len(), "search complete");
        Ok(items)
    }

    /// Looks a rule up in the local dataset and renders it as a card when found.
    pub fn regulation(&self, id: &str) -> (RuleLookup<'_>, Option<RenderedItem>) {
        let lookup = self.rules.lookup(id);
        let item = lookup
            .entry()
            .map(|rule| render_regulation(rule, &self.site));
        (lookup, item)
    }
}
