pub mod discovery;
pub mod files;
pub mod logging;
pub mod registry;
pub mod system;

#[cfg(feature = "web")]
pub mod web;

#[cfg(feature = "config")]
use crate::domain::{ApiConfig, HomeserverError};

#[cfg(feature = "config")]
const CONFIG_MAX_BYTES: u64 = 1_048_576; // 1 MiB

/// Charge un fichier TOML. Les chemins contenant `..` et les fichiers de plus
/// de 1 Mio sont refusés ; les champs inconnus sont rejetés.
#[cfg(feature = "config")]
pub fn load_config_from_path<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<ApiConfig, HomeserverError> {
    use std::path::Component;

    let path_ref = path.as_ref();
    if path_ref
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(HomeserverError::Config(format!(
            "{}: chemins contenant `..` refusés",
            path_ref.display()
        )));
    }

    let metadata = std::fs::metadata(path_ref).map_err(|e| {
        tracing::error!(path = %path_ref.display(), error = %e, "config_error");
        HomeserverError::Config(format!("read {}: {e}", path_ref.display()))
    })?;
    if !metadata.is_file() {
        return Err(HomeserverError::Config(format!(
            "{} n'est pas un fichier régulier",
            path_ref.display()
        )));
    }
    if metadata.len() > CONFIG_MAX_BYTES {
        return Err(HomeserverError::Config(format!(
            "{} trop volumineux (> 1 MiB)",
            path_ref.display()
        )));
    }

    let data = std::fs::read_to_string(path_ref).map_err(|e| {
        tracing::error!(path = %path_ref.display(), error = %e, "config_error");
        HomeserverError::Config(format!("read {}: {e}", path_ref.display()))
    })?;
    toml::from_str::<ApiConfig>(&data).map_err(|e| {
        tracing::error!(path = %path_ref.display(), error = %e, "config_error");
        HomeserverError::Config(format!("toml parse: {e}"))
    })
}
