use std::path::PathBuf;

/// Returns the path to the SecretarIA database based on the operating system
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/secretaria/db.sqlite3`
/// - **Linux**: `~/.local/share/secretaria/db.sqlite3`
/// - **Windows**: `%LOCALAPPDATA%\secretaria\db.sqlite3`
pub fn get_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("secretaria").join("db.sqlite3"))
}

/// Open the on-disk database, or a private in-memory one
pub fn initialize_database(in_memory: bool) -> anyhow::Result<std::sync::Arc<crate::database::Database>> {
    let db = if in_memory {
        crate::database::Database::in_memory()?
    } else {
        let db_path = get_db_path()?;
        crate::database::Database::new(&db_path)?
    };
    Ok(std::sync::Arc::new(db))
}
