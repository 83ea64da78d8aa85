/// Message bodies for each kind of search hit.
///
/// Person and competition bodies are Markdown. Regulation bodies are HTML because
/// the rule text from the WCA already carries inline `<a>`/`<em>` markup.
use tracing::debug;

use crate::flag::flag_from_iso2;
use crate::model::{Competition, DelegateStatus, Person, PersonRef, RuleEntry};

pub fn person_description(person: &Person) -> String {
    let mut lines = vec![format!(
        "{} ({}) - {}",
        person.name,
        person.wca_id,
        flag_from_iso2(&person.country_iso2)
    )];

    if let Some(line) = delegate_line(person) {
        lines.push(line);
    }

    lines.extend(person.teams.iter().map(|team| {
        let role = if team.leader { "leader" } else { "member" };
        format!("{} team {role}.", team.friendly_id.to_uppercase())
    }));

    lines.push(format!("[WCA profile]({})", person.url));
    lines.join("\n")
}

fn delegate_line(person: &Person) -> Option<String> {
    let raw = person.delegate_status.as_deref()?;
    let Some(status) = DelegateStatus::from_api(raw) else {
        debug!(wca_id = %person.wca_id, status = raw, "unrecognized delegate status");
        return None;
    };
    Some(match person.region.as_deref() {
        Some(region) => format!("This person is a {} for {region}.", status.label()),
        None => format!("This person is a {}.", status.label()),
    })
}

pub fn competition_description(comp: &Competition) -> String {
    [
        format!(
            "{} ({}) - {}",
            comp.name,
            comp.id,
            flag_from_iso2(&comp.country_iso2)
        ),
        format!(
            "Competition starts on {} and ends on {}",
            comp.start_date, comp.end_date
        ),
        format!("Delegate(s): {}", markdown_links(&comp.delegates)),
        format!("Organizer(s): {}", markdown_links(&comp.organizers)),
        format!("Page on the [WCA website]({})", comp.url),
    ]
    .join("\n")
}

fn markdown_links(people: &[PersonRef]) -> String {
    people
        .iter()
        .map(|p| format!("[{}]({})", p.name, p.url))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn regulation_description(kind_label: &str, rule: &RuleEntry, base_url: &str) -> String {
    format!(
        "<a href=\"{base_url}{}\">{kind_label} {}</a>:\n{}",
        rule.url, rule.id, rule.content_html
    )
}
