//! Picture uploads.
//!
//! Files are copied under `<uploads>/images/<id>_<name>/`. The returned
//! paths are relative to the uploads directory and are what gets stored in
//! an animal's picture list.

use std::path::{Path, PathBuf};

use ossaca_model::{Animal, Identified};

use crate::CliError;

pub(crate) const ALLOWED_EXTENSIONS: &[&str] = &["txt", "pdf", "png", "jpg", "jpeg", "gif"];

pub(crate) fn allowed_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Keep only the final path component and replace anything outside
/// `[A-Za-z0-9._-]` with `_`. Leading dots are dropped so the result is never
/// hidden or a parent reference. `None` if nothing is left.
pub(crate) fn secure_filename(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// `images/<id>_<lowercased name, spaces as underscores>`
pub(crate) fn animal_dir(animal: &Animal) -> PathBuf {
    let name = animal.name.replace(' ', "_").to_lowercase();
    Path::new("images").join(format!("{}_{}", animal.id, name))
}

/// Copy picture files for a persisted animal. Returns the stored paths.
pub(crate) fn upload_images(
    uploads: &Path,
    animal: &Animal,
    files: &[PathBuf],
) -> Result<Vec<String>, CliError> {
    if files.is_empty() {
        return Ok(Vec::new());
    }
    if !animal.is_persisted() {
        return Err(CliError::upload("pictures can only be added to a stored animal"));
    }

    let relative_dir = animal_dir(animal);
    let target_dir = uploads.join(&relative_dir);
    std::fs::create_dir_all(&target_dir)?;

    let mut stored = Vec::with_capacity(files.len());
    for file in files {
        let original = file.to_string_lossy();
        let name = secure_filename(&original)
            .ok_or_else(|| CliError::upload(format!("invalid file name '{original}'")))?;
        if !allowed_file(&name) {
            return Err(CliError::upload(format!(
                "'{}' is not one of {}",
                name,
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }
        std::fs::copy(file, target_dir.join(&name))?;
        log::debug!("Stored {} as {}", file.display(), target_dir.join(&name).display());
        stored.push(relative_dir.join(&name).to_string_lossy().into_owned());
    }
    Ok(stored)
}
