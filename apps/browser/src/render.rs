//! Plain-text rendering of controller snapshots and character details.

use std::fmt::Write as _;

use client_core::{ListSnapshot, ListStatus};
use shared::domain::CharacterDetail;

pub fn status_line(snapshot: &ListSnapshot) -> String {
    let status = match snapshot.status {
        ListStatus::Idle => "idle",
        ListStatus::Loading => "loading",
        ListStatus::Ready => "ready",
        ListStatus::Failed => "failed",
    };
    let mut line = format!(
        "[{status}] page {} | {} loaded | {} visible",
        snapshot.current_page,
        snapshot.total_loaded,
        snapshot.visible_records.len()
    );
    if snapshot.has_more && !snapshot.is_searching() {
        line.push_str(" | more available");
    }
    if snapshot.is_searching() {
        let _ = write!(line, " | search \"{}\"", snapshot.search_term);
    }
    line
}

pub fn snapshot(snapshot: &ListSnapshot) -> String {
    if snapshot.is_initial_loading() {
        return "Loading characters...".to_string();
    }
    if let Some(message) = &snapshot.error_message {
        if snapshot.visible_records.is_empty() {
            return message.clone();
        }
    }
    if snapshot.is_empty_search_result() {
        return format!("No results for \"{}\"", snapshot.search_term);
    }

    let mut out = String::new();
    for record in &snapshot.visible_records {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:<14} ki {}",
            record.id.0, record.name, record.race, record.ki
        );
    }
    if snapshot.shows_footer_loader() {
        out.push_str("Loading more characters...\n");
    }
    if let Some(message) = &snapshot.error_message {
        let _ = writeln!(out, "{message}");
    }
    out.push_str(&status_line(snapshot));
    out
}

pub fn detail(detail: &CharacterDetail) -> String {
    let character = &detail.character;
    let mut out = String::new();
    let _ = writeln!(out, "#{} {} ({})", character.id.0, character.name, character.race);
    let _ = writeln!(out, "  gender:      {}", character.gender);
    let _ = writeln!(out, "  base ki:     {}", character.ki);
    let _ = writeln!(out, "  max ki:      {}", character.max_ki);
    let _ = writeln!(out, "  affiliation: {}", character.affiliation);
    if let Some(planet) = &detail.origin_planet {
        let destroyed = if planet.is_destroyed { " (destroyed)" } else { "" };
        let _ = writeln!(out, "  origin:      {}{destroyed}", planet.name);
    }
    if !character.description.is_empty() {
        let _ = writeln!(out, "\n{}", character.description);
    }
    if !detail.transformations.is_empty() {
        let _ = writeln!(out, "\ntransformations ({}):", detail.transformations.len());
        for transformation in &detail.transformations {
            let _ = writeln!(out, "  - {} (ki {})", transformation.name, transformation.ki);
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{Character, CharacterId, Transformation, TransformationId};

    fn goku() -> Character {
        Character {
            id: CharacterId(1),
            name: "Goku".into(),
            race: "Saiyan".into(),
            ki: "60.000.000".into(),
            max_ki: "90 Septillion".into(),
            gender: "Male".into(),
            description: "El protagonista".into(),
            image: String::new(),
            affiliation: "Z Fighter".into(),
            deleted_at: None,
        }
    }

    #[test]
    fn initial_loading_and_empty_search_have_dedicated_messages() {
        let loading = ListSnapshot {
            status: ListStatus::Loading,
            has_more: true,
            ..ListSnapshot::default()
        };
        assert_eq!(snapshot(&loading), "Loading characters...");

        let empty_search = ListSnapshot {
            status: ListStatus::Ready,
            search_term: "zz".into(),
            total_loaded: 3,
            ..ListSnapshot::default()
        };
        assert_eq!(snapshot(&empty_search), "No results for \"zz\"");
    }

    #[test]
    fn list_ends_with_status_line() {
        let ready = ListSnapshot {
            visible_records: vec![goku()],
            status: ListStatus::Ready,
            has_more: true,
            current_page: 1,
            total_loaded: 1,
            ..ListSnapshot::default()
        };
        let rendered = snapshot(&ready);
        assert!(rendered.contains("Goku"));
        assert!(rendered.ends_with("[ready] page 1 | 1 loaded | 1 visible | more available"));
    }

    #[test]
    fn detail_lists_transformations() {
        let rendered = detail(&CharacterDetail {
            character: goku(),
            origin_planet: None,
            transformations: vec![Transformation {
                id: TransformationId(1),
                name: "Goku SSJ".into(),
                image: String::new(),
                ki: "3 Billion".into(),
            }],
        });
        assert!(rendered.starts_with("#1 Goku (Saiyan)"));
        assert!(rendered.contains("transformations (1):"));
        assert!(rendered.contains("- Goku SSJ (ki 3 Billion)"));
    }
}
