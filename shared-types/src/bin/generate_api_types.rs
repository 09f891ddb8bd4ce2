use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut types = Vec::new();

    // Event types
    types.push(clean_type(EventType::export_to_string()?));
    types.push(clean_type(Event::export_to_string()?));
    types.push(clean_type(CreateEventRequest::export_to_string()?));
    types.push(clean_type(UpdateEventRequest::export_to_string()?));
    types.push(clean_type(EventsResponse::export_to_string()?));

    // Chat types
    types.push(clean_type(ChatRequest::export_to_string()?));
    types.push(clean_type(ChatResponse::export_to_string()?));
    types.push(clean_type(ChatMessage::export_to_string()?));
    types.push(clean_type(ChatHistoryResponse::export_to_string()?));

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../web/src/api-types"));
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("types.ts");
    fs::write(&output_path, types.join("\n\n"))?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Strips the generator banner; imports are dropped because every type
/// lands in the same file.
fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let kept: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = kept.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
