use serde::{Deserialize, Deserializer, Serialize};
use wca_common::mcp_api::{MessageBody, ResultCard};

/// A single regulation or guideline (e.g., "4a1", or "4a1+" for the guideline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Rule identifier; a trailing `+` marks a guideline
    pub id: String,
    /// Path relative to the website root, e.g. "/regulations#4a1"
    pub url: String,
    /// Rule text with inline HTML
    pub content_html: String,
}

impl RuleEntry {
    pub fn is_guideline(&self) -> bool {
        self.id.ends_with('+')
    }

    pub fn kind_label(&self) -> &'static str {
        if self.is_guideline() {
            "Guideline"
        } else {
            "Regulation"
        }
    }
}

/// Discriminator carried in the `class` field of every search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Person,
    Competition,
    Regulation,
    /// Anything the search API may add later (posts, incidents, ...).
    Unknown,
}

impl ResultKind {
    pub fn from_class(class: &str) -> Self {
        match class {
            "person" => ResultKind::Person,
            "competition" => ResultKind::Competition,
            "regulation" => ResultKind::Regulation,
            _ => ResultKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub name: String,
    pub wca_id: String,
    pub country_iso2: String,
    #[serde(default)]
    pub delegate_status: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<TeamMembership>,
    pub avatar: Avatar,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamMembership {
    pub friendly_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub leader: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Avatar {
    pub thumb_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Competition {
    pub name: String,
    pub id: String,
    pub country_iso2: String,
    pub start_date: String,
    pub end_date: String,
    pub city: String,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub delegates: Vec<PersonRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organizers: Vec<PersonRef>,
}

/// The short person record nested in competition hits.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonRef {
    pub name: String,
    pub url: String,
}

/// The search API sends `null` for empty lists and unset flags on some records.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateStatus {
    Trainee,
    Junior,
    Full,
    Senior,
}

impl DelegateStatus {
    /// Parses the API value. The WCA still calls junior delegates "candidate".
    pub fn from_api(value: &str) -> Option<Self> {
        match value {
            "trainee_delegate" => Some(DelegateStatus::Trainee),
            "candidate_delegate" => Some(DelegateStatus::Junior),
            "delegate" => Some(DelegateStatus::Full),
            "senior_delegate" => Some(DelegateStatus::Senior),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DelegateStatus::Trainee => "Trainee Delegate",
            DelegateStatus::Junior => "Junior Delegate",
            DelegateStatus::Full => "Delegate",
            DelegateStatus::Senior => "Senior Delegate",
        }
    }
}

/// A display-ready result card.
#[derive(Debug, Clone)]
pub struct RenderedItem {
    /// Random per-card token, unique within a batch
    pub id: String,
    pub title: String,
    pub thumb_url: String,
    pub target_url: String,
    /// One-line summary shown under the title
    pub description: String,
    /// Message sent when the card is picked
    pub body: MessageBody,
}

impl From<RenderedItem> for ResultCard {
    fn from(item: RenderedItem) -> Self {
        ResultCard {
            id: item.id,
            title: item.title,
            thumb_url: item.thumb_url,
            target_url: item.target_url,
            description: item.description,
            body: item.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_kind_is_total() {
        assert_eq!(ResultKind::from_class("person"), ResultKind::Person);
        assert_eq!(ResultKind::from_class("competition"), ResultKind::Competition);
        assert_eq!(ResultKind::from_class("regulation"), ResultKind::Regulation);
        assert_eq!(ResultKind::from_class("post"), ResultKind::Unknown);
        assert_eq!(ResultKind::from_class("Person"), ResultKind::Unknown);
        assert_eq!(ResultKind::from_class(""), ResultKind::Unknown);
    }

    #[test]
    fn delegate_labels() {
        let labels: Vec<_> = [
            "trainee_delegate",
            "candidate_delegate",
            "delegate",
            "senior_delegate",
        ]
        .iter()
        .map(|s| DelegateStatus::from_api(s).map(DelegateStatus::label))
        .collect();
        assert_eq!(
            labels,
            vec![
                Some("Trainee Delegate"),
                Some("Junior Delegate"),
                Some("Delegate"),
                Some("Senior Delegate"),
            ]
        );
        assert_eq!(DelegateStatus::from_api("regional_delegate"), None);
    }

    fn person_json(teams: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "name": "Ana Lopez",
            "wca_id": "2015LOPE01",
            "country_iso2": "ES",
            "delegate_status": null,
            "teams": teams,
            "avatar": { "thumb_url": "https://avatars.example.org/a.jpg" },
            "url": "https://www.worldcubeassociation.org/persons/2015LOPE01"
        })
    }

    #[test]
    fn null_leader_reads_as_member() {
        let person: Person = serde_json::from_value(person_json(serde_json::json!([
            { "friendly_id": "wrt", "leader": null },
            { "friendly_id": "wct" }
        ])))
        .unwrap();
        assert_eq!(person.teams.len(), 2);
        assert!(person.teams.iter().all(|t| !t.leader));
    }

    #[test]
    fn null_lists_read_as_empty() {
        let person: Person = serde_json::from_value(person_json(serde_json::Value::Null)).unwrap();
        assert!(person.teams.is_empty());

        let comp: Competition = serde_json::from_value(serde_json::json!({
            "name": "Madrid Open 2025",
            "id": "MadridOpen2025",
            "country_iso2": "ES",
            "start_date": "2025-05-10",
            "end_date": "2025-05-11",
            "city": "Madrid",
            "url": "https://www.worldcubeassociation.org/competitions/MadridOpen2025",
            "delegates": null,
            "organizers": null
        }))
        .unwrap();
        assert!(comp.delegates.is_empty());
        assert!(comp.organizers.is_empty());
    }

    #[test]
    fn rendered_item_converts_to_card() {
        let card = ResultCard::from(RenderedItem {
            id: "id-1".to_string(),
            title: "Regulation 1a".to_string(),
            thumb_url: "https://example.org/logo.svg".to_string(),
            target_url: "https://example.org/regulations#1a".to_string(),
            description: "Each WCA competitio ...".to_string(),
            body: MessageBody {
                text: "<b>1a</b>".to_string(),
                parse_mode: wca_common::mcp_api::ParseMode::Html,
            },
        });
        assert_eq!(card.id, "id-1");
        assert_eq!(card.title, "Regulation 1a");
        assert_eq!(card.target_url, "https://example.org/regulations#1a");
        assert_eq!(card.body.text, "<b>1a</b>");
    }

    #[test]
    fn guideline_marker() {
        let rule = RuleEntry {
            id: "4a1+".to_string(),
            url: "/regulations/guidelines.html#4a1+".to_string(),
            content_html: String::new(),
        };
        assert!(rule.is_guideline());
        assert_eq!(rule.kind_label(), "Guideline");
    }
}
