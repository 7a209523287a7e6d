//! Path utilities: expand ~, validate video paths, build project file names.

use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Characters Windows refuses in file names.
const INVALID_WIN: &str = "<>:\"/\\|?*";
const MAX_NAME_LEN: usize = 120;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Lower-case extension of `path` without the dot ("" when missing).
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Check a video path before it is attached to the project.
///
/// - empty → `EmptyPath`
/// - extension not in `allowed` → `UnsupportedExt`
/// - missing file → `FileNotFound`
///
/// Returns the normalized (tilde-expanded, canonical when possible) path.
pub fn validate_video_path(raw: &str, allowed: &[String]) -> AppResult<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyPath);
    }

    let p = expand_tilde(trimmed);

    let ext = extension_of(&p);
    if !allowed.iter().any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(&ext)) {
        return Err(AppError::UnsupportedExt(if ext.is_empty() {
            "(none)".to_string()
        } else {
            format!(".{ext}")
        }));
    }

    if !p.is_file() {
        return Err(AppError::FileNotFound(p.display().to_string()));
    }

    Ok(p.canonicalize().unwrap_or(p))
}

/// Make `name` usable as a file name on every platform.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut s: String = name
        .trim()
        .chars()
        .map(|c| if INVALID_WIN.contains(c) { ' ' } else { c })
        .collect();

    s = s.trim().trim_end_matches(['.', ' ']).to_string();
    s = s.split_whitespace().collect::<Vec<_>>().join(" ");

    if s.chars().count() > MAX_NAME_LEN {
        s = s.chars().take(MAX_NAME_LEN).collect::<String>().trim_end().to_string();
    }

    if s.is_empty() { fallback.to_string() } else { s }
}

/// Default project file name: "【process】element.csv".
pub fn default_project_filename(process_name: &str, element_work_name: &str) -> String {
    let proc_ = sanitize_filename(process_name, "工程名未設定");
    let elem = sanitize_filename(element_work_name, "要素作業名未設定");
    format!("【{proc_}】{elem}.csv")
}
