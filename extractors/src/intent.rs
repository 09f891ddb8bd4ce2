//! Phrase-table intent classification for chat commands.

use serde::{Deserialize, Serialize};

/// What a chat message asks the assistant to do with the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    View,
    Create,
    Edit,
    Delete,
    Unrecognized,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::View => "view",
            Intent::Create => "create",
            Intent::Edit => "edit",
            Intent::Delete => "delete",
            Intent::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const VIEW_PHRASES: &[&str] = &[
    "proximos eventos",
    "próximos eventos",
    "mostrar eventos",
    "listar eventos",
    "ver eventos",
    "meus eventos",
    "quais eventos",
    "minha agenda",
    "mostrar agenda",
    "ver agenda",
];

const CREATE_PHRASES: &[&str] = &[
    "criar evento",
    "criar um evento",
    "crie um evento",
    "crie o evento",
    "adicionar evento",
    "adicione um evento",
    "agendar evento",
    "agende um evento",
    "marcar evento",
    "marque um evento",
    "novo evento",
];

const DELETE_PHRASES: &[&str] = &[
    "deletar evento",
    "deletar o evento",
    "delete o evento",
    "excluir evento",
    "excluir o evento",
    "exclua o evento",
    "remover evento",
    "remover o evento",
    "remova o evento",
    "apagar evento",
    "apagar o evento",
    "apague o evento",
    "cancelar evento",
    "cancelar o evento",
    "cancele o evento",
];

const EDIT_PHRASES: &[&str] = &[
    "editar evento",
    "editar o evento",
    "edite o evento",
    "mudar evento",
    "mudar o evento",
    "mude o evento",
    "alterar evento",
    "alterar o evento",
    "altere o evento",
    "atualizar evento",
    "atualizar o evento",
    "atualize o evento",
    "remarcar evento",
    "remarcar o evento",
    "remarque o evento",
    "renomear evento",
    "renomear o evento",
    "renomeie o evento",
];

fn matches_any(message: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| message.contains(phrase))
}

/// Classify a chat message.
///
/// Overlaps resolve Edit > Delete > Create > View: edit and delete commands
/// routinely contain words that also appear in the create and view tables
/// ("mudar o evento X para o dia..."), so the more specific intent wins.
pub fn classify(message: &str) -> Intent {
    let normalized = message.to_lowercase();

    if matches_any(&normalized, EDIT_PHRASES) {
        Intent::Edit
    } else if matches_any(&normalized, DELETE_PHRASES) {
        Intent::Delete
    } else if matches_any(&normalized, CREATE_PHRASES) {
        Intent::Create
    } else if matches_any(&normalized, VIEW_PHRASES) {
        Intent::View
    } else {
        Intent::Unrecognized
    }
}
