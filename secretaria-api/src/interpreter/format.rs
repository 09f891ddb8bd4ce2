use crate::helpers::local_time::{format_date, format_time, local_date};
use chrono::{Datelike, FixedOffset, NaiveDate, Weekday};
use shared_types::Event;
use std::collections::BTreeMap;

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Agenda grouped by local calendar day, days ascending
pub fn format_agenda(events: &[Event], offset: FixedOffset) -> String {
    let mut by_day: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
    for event in events {
        let day = local_date(event.start, offset).unwrap_or_default();
        by_day.entry(day).or_default().push(event);
    }

    let mut days = Vec::new();
    for (day, mut day_events) in by_day {
        day_events.sort_by_key(|e| (e.start, e.id));

        let entries: Vec<String> = day_events
            .iter()
            .enumerate()
            .map(|(index, event)| format_entry(index + 1, event, offset))
            .collect();

        days.push(format!(
            "📅 **{}, {}**\n\n{}",
            weekday_name(day.weekday()),
            day.format("%d/%m/%Y"),
            entries.join("\n\n")
        ));
    }

    days.join("\n\n")
}

fn format_entry(number: usize, event: &Event, offset: FixedOffset) -> String {
    let mut lines = vec![
        format!("{}. {}", number, event.title),
        format!(
            "   🕐 {} às {}",
            format_time(event.start, offset),
            format_time(event.end, offset)
        ),
        format!("   {} {}", event.event_type.emoji(), event.event_type.label()),
    ];
    if let Some(description) = &event.description {
        lines.push(format!("   ℹ️ {}", description));
    }
    lines.join("\n")
}

/// One line per event, used when an edit target cannot be found
pub fn format_event_list(events: &[Event], offset: FixedOffset) -> String {
    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            format!(
                "{}. {} - {} às {}",
                index + 1,
                event.title,
                format_date(event.start, offset),
                format_time(event.start, offset)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
