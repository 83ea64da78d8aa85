use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;
use wca_common::mcp_api::{MessageBody, ParseMode};

use crate::config::SiteUrls;
use crate::flag::flag_from_iso2;
use crate::format::{competition_description, person_description, regulation_description};
use crate::model::{Competition, Person, RenderedItem, ResultKind, RuleEntry};

const SUMMARY_CHARS: usize = 20;

/// Renders one raw search hit, or `None` when it should be skipped.
///
/// Unknown kinds are skipped quietly. Hits of a known kind that do not match the
/// expected shape are skipped with a warning; the rest of the batch is unaffected.
pub fn classify(raw: &Value, site: &SiteUrls) -> Option<RenderedItem> {
    let class = raw.get("class").and_then(Value::as_str).unwrap_or_default();
    match ResultKind::from_class(class) {
        ResultKind::Person => decode::<Person>(raw, class).map(|p| render_person(&p)),
        ResultKind::Competition => {
            decode::<Competition>(raw, class).map(|c| render_competition(&c, site))
        }
        ResultKind::Regulation => {
            decode::<RuleEntry>(raw, class).map(|r| render_regulation(&r, site))
        }
        ResultKind::Unknown => {
            debug!(class, "skipping unsupported search result");
            None
        }
    }
}

fn decode<T: DeserializeOwned>(raw: &Value, class: &str) -> Option<T> {
    T::deserialize(raw)
        .inspect_err(|e| warn!(error = %e, class, "skipping malformed search result"))
        .ok()
}

pub fn render_person(person: &Person) -> RenderedItem {
    RenderedItem {
        id: new_item_id(),
        title: format!("{}'s profile", person.name),
        thumb_url: person.avatar.thumb_url.clone(),
        target_url: person.url.clone(),
        description: flag_from_iso2(&person.country_iso2),
        body: MessageBody {
            text: person_description(person),
            parse_mode: ParseMode::Markdown,
        },
    }
}

pub fn render_competition(comp: &Competition, site: &SiteUrls) -> RenderedItem {
    RenderedItem {
        id: new_item_id(),
        title: comp.name.clone(),
        thumb_url: site.logo_url.clone(),
        target_url: comp.url.clone(),
        description: format!(
            "Competition, starts {} in {}, {}",
            comp.start_date,
            comp.city,
            flag_from_iso2(&comp.country_iso2)
        ),
        body: MessageBody {
            text: competition_description(comp),
            parse_mode: ParseMode::Markdown,
        },
    }
}

pub fn render_regulation(rule: &RuleEntry, site: &SiteUrls) -> RenderedItem {
    let label = rule.kind_label();
    let summary: String = rule.content_html.chars().take(SUMMARY_CHARS).collect();
    RenderedItem {
        id: new_item_id(),
        title: format!("{label} {}", rule.id),
        thumb_url: site.logo_url.clone(),
        target_url: format!("{}{}", site.base_url, rule.url),
        description: format!("{summary} ..."),
        body: MessageBody {
            text: regulation_description(label, rule, &site.base_url),
            parse_mode: ParseMode::Html,
        },
    }
}

fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;

    fn site() -> SiteUrls {
        SiteUrls::new("https://www.worldcubeassociation.org")
    }

    fn person_hit() -> Value {
        json!({
            "class": "person",
            "name": "Max Park",
            "wca_id": "2012PARK03",
            "country_iso2": "US",
            "delegate_status": null,
            "region": null,
            "teams": [],
            "avatar": { "thumb_url": "https://avatars.example.org/2012PARK03.jpg" },
            "url": "https://www.worldcubeassociation.org/persons/2012PARK03"
        })
    }

    fn competition_hit() -> Value {
        json!({
            "class": "competition",
            "name": "WCA World Championship 2025",
            "id": "WC2025",
            "country_iso2": "US",
            "start_date": "2025-07-03",
            "end_date": "2025-07-06",
            "city": "Seattle, Washington",
            "url": "https://www.worldcubeassociation.org/competitions/WC2025",
            "delegates": [
                { "name": "Alice", "url": "https://www.worldcubeassociation.org/persons/2010ALIC01" }
            ],
            "organizers": []
        })
    }

    #[test]
    fn person_card() {
        let item = classify(&person_hit(), &site()).expect("person renders");
        assert_eq!(item.title, "Max Park's profile");
        assert_eq!(item.thumb_url, "https://avatars.example.org/2012PARK03.jpg");
        assert_eq!(item.target_url, "https://www.worldcubeassociation.org/persons/2012PARK03");
        assert_eq!(item.description, "🇺🇸");
        assert_eq!(item.body.parse_mode, ParseMode::Markdown);
        assert!(item.body.text.starts_with("Max Park (2012PARK03) - 🇺🇸\n"));
    }

    #[test]
    fn competition_card() {
        let item = classify(&competition_hit(), &site()).expect("competition renders");
        assert_eq!(item.title, "WCA World Championship 2025");
        assert_eq!(item.thumb_url, site().logo_url);
        assert_eq!(
            item.description,
            "Competition, starts 2025-07-03 in Seattle, Washington, 🇺🇸"
        );
        assert_eq!(item.body.parse_mode, ParseMode::Markdown);
    }

    #[test]
    fn regulation_card() {
        let hit = json!({
            "class": "regulation",
            "id": "4a1",
            "url": "/regulations#4a1",
            "content_html": "<p>Rule text that is longer than twenty characters</p>"
        });
        let item = classify(&hit, &site()).expect("regulation renders");
        assert_eq!(item.title, "Regulation 4a1");
        assert_eq!(item.target_url, "https://www.worldcubeassociation.org/regulations#4a1");
        assert_eq!(item.thumb_url, site().logo_url);
        assert_eq!(item.description, "<p>Rule text that is ...");
        assert_eq!(item.body.parse_mode, ParseMode::Html);
    }

    #[test]
    fn short_regulation_summary_is_not_padded() {
        let hit = json!({
            "class": "regulation",
            "id": "2e+",
            "url": "/regulations/guidelines.html#2e+",
            "content_html": "Short"
        });
        let item = classify(&hit, &site()).unwrap();
        assert_eq!(item.title, "Guideline 2e+");
        assert_eq!(item.description, "Short ...");
    }

    #[test]
    fn unknown_kinds_are_skipped() {
        for hit in [
            json!({ "class": "post", "title": "News" }),
            json!({ "class": 42 }),
            json!({ "name": "no class at all" }),
            json!("not even an object"),
        ] {
            assert!(classify(&hit, &site()).is_none(), "{hit} should be skipped");
        }
    }

    #[test]
    fn malformed_known_kinds_are_skipped() {
        let mut no_avatar = person_hit();
        no_avatar.as_object_mut().unwrap().remove("avatar");
        assert!(classify(&no_avatar, &site()).is_none());

        let mut bad_dates = competition_hit();
        bad_dates["start_date"] = json!(20250703);
        assert!(classify(&bad_dates, &site()).is_none());
    }

    #[test]
    fn null_team_flags_and_lists_still_render() {
        let mut hit = person_hit();
        hit["teams"] = json!([{ "friendly_id": "wrt", "leader": null }]);
        let item = classify(&hit, &site()).expect("null leader renders");
        assert!(item.body.text.contains("\nWRT team member.\n"));

        hit["teams"] = Value::Null;
        assert!(classify(&hit, &site()).is_some());

        let mut comp = competition_hit();
        comp["organizers"] = Value::Null;
        let item = classify(&comp, &site()).expect("null organizers render");
        assert!(item.body.text.contains("\nOrganizer(s): \n"));
    }

    #[test]
    fn item_ids_are_unique() {
        let ids: HashSet<String> = (0..50)
            .filter_map(|_| classify(&person_hit(), &site()))
            .map(|item| item.id)
            .collect();
        assert_eq!(ids.len(), 50);
    }
}
