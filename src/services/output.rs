use std::path::Path;

/// Path as shown in reports: `~/...` under `$HOME`, otherwise as given.
pub fn display_path(path: &Path) -> String {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            if let Ok(rel) = path.strip_prefix(&home) {
                return format!("~/{}", rel.display());
            }
        }
    }
    path.display().to_string()
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
