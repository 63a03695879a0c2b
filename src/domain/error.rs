use thiserror::Error;

/// Erreurs possibles de la bibliothèque.
#[derive(Debug, Error)]
pub enum HomeserverError {
    /// Erreur liée au système (sysinfo, serveur HTTP).
    #[error("system error: {0}")]
    System(String),

    /// Appel externe (ex: launchctl, systemctl, ps) a échoué.
    #[error("external command failed: {0}")]
    External(String),

    /// Erreur de parsing.
    #[error("parse error: {0}")]
    Parse(String),

    /// Erreur de config.
    #[error("config error: {0}")]
    Config(String),

    /// Erreur d'entrée/sortie (listing de répertoire...).
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
