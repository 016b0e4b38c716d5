use std::path::{Path, PathBuf};

/// Application data directory (platform data dir, falling back to a
/// home-relative dot directory, then the temp dir).
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("explorative-chat"))
        .or_else(|| dirs::home_dir().map(|dir| dir.join(".explorative-chat")))
        .unwrap_or_else(|| std::env::temp_dir().join("explorative-chat"))
}

/// config.json path inside the data directory.
pub fn config_json_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Ensure the data directory exists.
pub fn ensure_data_dir() -> std::io::Result<PathBuf> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON file into a deserializable value.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

/// Save a serializable value as pretty JSON.
pub fn save_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {e}"))?;
    }
    let content =
        serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize: {e}"))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
