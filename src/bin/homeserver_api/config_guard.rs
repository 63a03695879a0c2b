use crate::cli_opts::Opts;
use anyhow::{Context, Result};

/// Défauts → fichier TOML → environnement → options CLI.
/// Renvoie aussi l'origine de la config (pour le log de démarrage).
pub(crate) fn resolve_config(opts: &Opts) -> Result<(homeserver::ApiConfig, String)> {
    let (mut cfg, source) = match &opts.config {
        Some(path) => (
            homeserver::load_config_from_path(path).context("chargement config TOML")?,
            path.display().to_string(),
        ),
        None => (homeserver::ApiConfig::default(), "defaults".to_string()),
    };

    cfg.apply_process_env();

    if let Some(port) = opts.port {
        cfg.port = port;
    }
    if let Some(bind) = opts.bind {
        cfg.bind = bind;
    }

    Ok((cfg, source))
}
