use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::{DirectoryListing, FileEntry, HomeserverError};

/// Liste un répertoire (entrées triées par nom).
///
/// Une entrée dont les métadonnées sont illisibles garde `size = 0` et pas de `modified`.
pub fn list_directory(path: impl AsRef<Path>) -> Result<DirectoryListing, HomeserverError> {
    let path = path.as_ref();
    let mut files = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let metadata = entry.metadata().ok();
        let size = metadata.as_ref().map(|md| md.len()).unwrap_or(0);
        let modified = metadata
            .and_then(|md| md.modified().ok())
            .map(|ts| DateTime::<Utc>::from(ts).to_rfc3339_opts(SecondsFormat::Secs, true));

        files.push(FileEntry {
            name,
            is_dir,
            size,
            modified,
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(DirectoryListing {
        path: path.to_string_lossy().into_owned(),
        files,
    })
}
