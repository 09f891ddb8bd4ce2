//! Slot filling for chat commands.
//!
//! Every field is extracted independently by its own set of patterns, so a
//! message with an unparseable date still yields its title and time. The
//! interpreter decides which combination is enough for each intent.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::date_parser::{parse_date, parse_day_of_month, parse_time, ExtractedDate, ExtractedTime};
use crate::intent::Intent;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Title of the new event (create) or of the event being targeted (edit, delete)
    pub title: Option<String>,
    /// Replacement title from an edit command's "para <novo título>" clause
    pub new_title: Option<String>,
    pub date: Option<ExtractedDate>,
    pub time: Option<ExtractedTime>,
    /// Bare day of month from "do dia 15", only collected for delete commands
    pub day_of_month: Option<u32>,
    pub description: Option<String>,
}

const CREATE_VERBS: &str = r"criar|crie|adicionar|adicione|agendar|agende|marcar|marque|novo";
const DELETE_VERBS: &str =
    r"deletar|delete|excluir|exclua|remover|remova|apagar|apague|cancelar|cancele";
const EDIT_VERBS: &str = r"editar|edite|mudar|mude|alterar|altere|atualizar|atualize|remarcar|remarque|renomear|renomeie";

/// Words that end a title: date, time and connector words.
const BOUNDARY_KEYWORDS: &str = r"do\s+dia|no\s+dia|na\s+data|dia|data|para|pra|em|às|as|das|hoje|de\s+hoje|amanh[ãa]|de\s+amanh[ãa]|depois\s+de\s+amanh[ãa]|\d{1,2}\s+de";

const FILLER_WORDS: &[&str] = &["o", "a", "um", "uma", "evento", "do", "da"];

const FALLBACK_STOP_WORDS: &[&str] = &[
    "dia", "data", "para", "pra", "em", "às", "as", "das", "no", "na", "hoje", "amanhã",
    "amanha", "depois", "hora", "horário", "horario",
];

static DESCRIPTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:com\s+)?(?:a\s+)?descri[çc][ãa]o\b").expect("Invalid regex")
});

static TITLE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(.*?)\s*(?:\s(?:{BOUNDARY_KEYWORDS})\b|,|\d{{1,2}}/|$)"
    ))
    .expect("Invalid regex")
});

static CREATE_TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bevento\b(.*)$").expect("Invalid regex")
});

static DELETE_TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{DELETE_VERBS})\s+(?:o\s+)?evento\b(.*)$"))
        .expect("Invalid regex")
});

static EDIT_TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{EDIT_VERBS})\s+(?:o\s+)?evento\b(.*)$"))
        .expect("Invalid regex")
});

static EDIT_RENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{EDIT_VERBS})\s+(?:o\s+)?evento\s+(.+?)\s+(?:para|pra)\s+(.+)$"
    ))
    .expect("Invalid regex")
});

/// Everything after the first "para/pra": the new values of an edit
static EDIT_TARGET_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:para|pra)\b(.*)$").expect("Invalid regex")
});

/// A "para ..." value that starts like this is a new date or time, not a new title
static DATE_TIME_LEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:o\s+|a\s+)?(?:(?:dia|data|hora|horário|horario|às|as|hoje|amanh[ãa]|depois)\b|\d)",
    )
    .expect("Invalid regex")
});

static COMMAND_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{CREATE_VERBS}|{DELETE_VERBS}|{EDIT_VERBS})\b"))
        .expect("Invalid regex")
});

/// Extract every field the message carries for the given intent.
///
/// `today` is the caller's local date; it supplies the default year and
/// anchors relative words like "amanhã".
pub fn extract(message: &str, intent: Intent, today: NaiveDate) -> ExtractedFields {
    let (head, description) = split_description(message);

    let mut fields = ExtractedFields {
        date: parse_date(head, today),
        time: parse_time(head),
        description,
        ..Default::default()
    };

    match intent {
        Intent::Create => {
            fields.title = title_after(&CREATE_TITLE_PATTERN, head)
                .or_else(|| fallback_title(head));
        }
        Intent::Delete => {
            fields.title = title_after(&DELETE_TITLE_PATTERN, head)
                .or_else(|| fallback_title(head));
            fields.day_of_month = parse_day_of_month(head);
        }
        Intent::Edit => {
            // "do dia 20/06 para o dia 25/06": the value after "para" is the new one
            if let Some(target) = EDIT_TARGET_CLAUSE
                .captures(head)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
            {
                if let Some(date) = parse_date(target, today) {
                    fields.date = Some(date);
                }
                if let Some(time) = parse_time(target) {
                    fields.time = Some(time);
                }
            }

            let rename = rename_clause(head);
            fields.new_title = rename.as_ref().map(|(_, new_title)| new_title.clone());
            fields.title = title_after(&EDIT_TITLE_PATTERN, head)
                .or_else(|| rename.map(|(target, _)| target))
                .or_else(|| fallback_title(head));
        }
        Intent::View | Intent::Unrecognized => {}
    }

    fields
}

/// Splits off everything after the description marker, which is kept verbatim
fn split_description(message: &str) -> (&str, Option<String>) {
    let Some(marker) = DESCRIPTION_MARKER.find(message) else {
        return (message, None);
    };

    let head = &message[..marker.start()];
    let description = message[marker.end()..]
        .trim_start_matches(|c: char| c.is_whitespace() || c == ':' || c == '-')
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”'))
        .trim();

    if description.is_empty() {
        (head, None)
    } else {
        (head, Some(description.to_string()))
    }
}

/// Text before the first boundary keyword, or `None` when that is empty or
/// a lone character
fn cut_at_boundary(text: &str) -> Option<String> {
    let padded = format!(" {}", text.trim());
    let caps = TITLE_BOUNDARY.captures(&padded)?;
    let title = clean_title(caps.get(1)?.as_str());

    (title.chars().count() > 1).then_some(title)
}

fn clean_title(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”' | ':' | '-'))
        .trim()
        .to_string()
}

fn title_after(pattern: &Regex, text: &str) -> Option<String> {
    let rest = pattern.captures(text)?.get(1)?.as_str();
    let rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ':');
    cut_at_boundary(rest)
}

/// "mudar o evento X para Y": returns (target, new title) unless Y is a date or time
fn rename_clause(text: &str) -> Option<(String, String)> {
    let caps = EDIT_RENAME_PATTERN.captures(text)?;
    let value = caps.get(2)?.as_str().trim();

    if DATE_TIME_LEAD.is_match(value) {
        return None;
    }

    let target = cut_at_boundary(caps.get(1)?.as_str())?;
    let new_title = cut_at_boundary(value)?;
    Some((target, new_title))
}

/// Loose fallback: up to four plain words after the command verb
fn fallback_title(text: &str) -> Option<String> {
    let verb = COMMAND_VERB.find(text)?;

    let words: Vec<&str> = text[verb.end()..]
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .skip_while(|word| FILLER_WORDS.contains(&word.to_lowercase().as_str()))
        .take_while(|word| {
            !FALLBACK_STOP_WORDS.contains(&word.to_lowercase().as_str())
                && !word.chars().any(|c| c.is_ascii_digit())
        })
        .take(4)
        .collect();

    let title = words.join(" ");
    (title.chars().count() > 1).then_some(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    #[test]
    fn test_create_command_fields() {
        let fields = extract(
            "criar evento Dentista no dia 20/06 às 09:00",
            Intent::Create,
            today(),
        );

        assert_eq!(fields.title.as_deref(), Some("Dentista"));
        assert_eq!(fields.date, Some(ExtractedDate { day: 20, month: 6, year: 2026 }));
        assert_eq!(fields.time, Some(ExtractedTime { hour: 9, minute: 0 }));
        assert!(fields.description.is_none());
    }

    #[test]
    fn test_create_title_with_several_words() {
        let fields = extract(
            "Crie um evento Reunião com João para o dia 01/07 às 10h",
            Intent::Create,
            today(),
        );
        assert_eq!(fields.title.as_deref(), Some("Reunião com João"));
        assert_eq!(fields.time, Some(ExtractedTime { hour: 10, minute: 0 }));

        let fields = extract("criar evento Aula de Yoga 3 de julho as 7", Intent::Create, today());
        assert_eq!(fields.title.as_deref(), Some("Aula de Yoga"));
        assert_eq!(fields.date, Some(ExtractedDate { day: 3, month: 7, year: 2026 }));
    }

    #[test]
    fn test_create_title_stops_at_glued_date() {
        let fields = extract("agendar evento Dentista 20/06 às 9h", Intent::Create, today());
        assert_eq!(fields.title.as_deref(), Some("Dentista"));
    }

    #[test]
    fn test_create_without_title() {
        let fields = extract("agendar evento para amanhã às 10", Intent::Create, today());
        assert!(fields.title.is_none());
        assert_eq!(fields.date, Some(ExtractedDate { day: 2, month: 6, year: 2026 }));
        assert_eq!(fields.time, Some(ExtractedTime { hour: 10, minute: 0 }));
    }

    #[test]
    fn test_fallback_title_after_verb() {
        let fields = extract("marque Dentista amanhã às 10", Intent::Create, today());
        assert_eq!(fields.title.as_deref(), Some("Dentista"));

        let fields = extract("novo evento: Dentista amanhã às 10", Intent::Create, today());
        assert_eq!(fields.title.as_deref(), Some("Dentista"));
    }

    #[test]
    fn test_rename_to_title_starting_like_a_keyword() {
        let fields = extract(
            "renomear o evento Reunião para Assembleia Geral",
            Intent::Edit,
            today(),
        );
        assert_eq!(fields.new_title.as_deref(), Some("Assembleia Geral"));
    }

    #[test]
    fn test_description_is_taken_verbatim() {
        let fields = extract(
            "criar evento Dentista dia 20/06 às 9h com descrição: \"levar exames às 8h\"",
            Intent::Create,
            today(),
        );
        assert_eq!(fields.title.as_deref(), Some("Dentista"));
        assert_eq!(fields.description.as_deref(), Some("levar exames às 8h"));
        // the time inside the description must not leak into the time field
        assert_eq!(fields.time, Some(ExtractedTime { hour: 9, minute: 0 }));
    }

    #[test]
    fn test_delete_fields() {
        let fields = extract("deletar evento Dentista", Intent::Delete, today());
        assert_eq!(fields.title.as_deref(), Some("Dentista"));
        assert!(fields.day_of_month.is_none());

        let fields = extract("excluir o evento Aula do dia 15", Intent::Delete, today());
        assert_eq!(fields.title.as_deref(), Some("Aula"));
        assert_eq!(fields.day_of_month, Some(15));
        assert!(fields.date.is_none());
    }

    #[test]
    fn test_edit_with_new_date_only() {
        let fields = extract(
            "editar evento Dentista para o dia 25/06",
            Intent::Edit,
            today(),
        );
        assert_eq!(fields.title.as_deref(), Some("Dentista"));
        assert!(fields.new_title.is_none());
        assert_eq!(fields.date, Some(ExtractedDate { day: 25, month: 6, year: 2026 }));
        assert!(fields.time.is_none());
    }

    #[test]
    fn test_edit_rename_clause() {
        let fields = extract(
            "renomear o evento Dentista para Consulta Médica",
            Intent::Edit,
            today(),
        );
        assert_eq!(fields.title.as_deref(), Some("Dentista"));
        assert_eq!(fields.new_title.as_deref(), Some("Consulta Médica"));

        let fields = extract(
            "mudar o evento Dentista para Consulta no dia 26/06 às 10h",
            Intent::Edit,
            today(),
        );
        assert_eq!(fields.title.as_deref(), Some("Dentista"));
        assert_eq!(fields.new_title.as_deref(), Some("Consulta"));
        assert_eq!(fields.date.map(|d| d.day), Some(26));
        assert_eq!(fields.time, Some(ExtractedTime { hour: 10, minute: 0 }));
    }

    #[test]
    fn test_edit_time_is_not_a_new_title() {
        let fields = extract("alterar o evento Dentista para as 15h", Intent::Edit, today());
        assert_eq!(fields.title.as_deref(), Some("Dentista"));
        assert!(fields.new_title.is_none());
        assert_eq!(fields.time, Some(ExtractedTime { hour: 15, minute: 0 }));
    }

    #[test]
    fn test_edit_prefers_values_after_para() {
        let fields = extract(
            "mudar o evento Dentista do dia 20/06 para o dia 25/06",
            Intent::Edit,
            today(),
        );
        assert_eq!(fields.title.as_deref(), Some("Dentista"));
        assert_eq!(fields.date, Some(ExtractedDate { day: 25, month: 6, year: 2026 }));

        let fields = extract("mudar o evento Dentista das 9h para as 15h", Intent::Edit, today());
        assert_eq!(fields.title.as_deref(), Some("Dentista"));
        assert_eq!(fields.time, Some(ExtractedTime { hour: 15, minute: 0 }));

        // Only the time moves; the date still comes from the whole message
        let fields = extract(
            "mudar o evento Dentista do dia 20/06 para as 15h",
            Intent::Edit,
            today(),
        );
        assert_eq!(fields.date.map(|d| d.day), Some(20));
        assert_eq!(fields.time, Some(ExtractedTime { hour: 15, minute: 0 }));
    }

    #[test]
    fn test_edit_description() {
        let fields = extract(
            "editar evento Dentista descrição: levar raio-x",
            Intent::Edit,
            today(),
        );
        assert_eq!(fields.title.as_deref(), Some("Dentista"));
        assert_eq!(fields.description.as_deref(), Some("levar raio-x"));
        assert!(fields.new_title.is_none());
    }

    #[test]
    fn test_view_has_no_title() {
        let fields = extract("mostrar próximos eventos", Intent::View, today());
        assert!(fields.title.is_none());
        assert!(fields.date.is_none());
    }
}
