use shared_types::Event;

/// Pick the event a chat command refers to.
///
/// Three stages, each tried over the whole list before the next one:
/// exact title (case-insensitive), containment in either direction, then
/// any candidate word longer than two characters found in the title. Within
/// a stage the first event in list order wins.
pub fn resolve<'a>(candidate: &str, events: &'a [Event]) -> Option<&'a Event> {
    let candidate = candidate.trim().to_lowercase();
    if candidate.is_empty() {
        return None;
    }

    let titles: Vec<String> = events.iter().map(|e| e.title.to_lowercase()).collect();

    if let Some(index) = titles.iter().position(|title| *title == candidate) {
        return events.get(index);
    }

    if let Some(index) = titles
        .iter()
        .position(|title| title.contains(&candidate) || candidate.contains(title.as_str()))
    {
        return events.get(index);
    }

    let words: Vec<&str> = candidate
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .collect();
    if words.is_empty() {
        return None;
    }

    titles
        .iter()
        .position(|title| words.iter().any(|word| title.contains(word)))
        .and_then(|index| events.get(index))
}
