//! Sources textuelles brutes : listing du gestionnaire de services et table des processus.
//!
//! Le moteur de découverte ne connaît que le format canonique :
//! - gestionnaire de services : `<pid|-> <statut> <libellé>` (une ligne par service) ;
//! - table des processus : sortie `ps aux` (commande à partir de la 11e colonne).
//!
//! Chaque plateforme fournit un adaptateur qui produit ce format.

use std::process::Command;
use std::sync::Arc;

use crate::domain::HomeserverError;

pub(crate) const PS_PROGRAM: &str = "ps";
pub(crate) const PS_ARGS: [&str; 1] = ["aux"];
/// Texte de l'invocation `ps`, tel qu'il apparaît dans sa propre sortie.
pub(crate) const PROCESS_TABLE_COMMAND: &str = "ps aux";

/// Capacité d'observation de l'hôte, une implémentation par famille d'OS.
pub trait HostListing: Send + Sync {
    /// Sortie complète du gestionnaire de services, au format canonique.
    fn service_listing(&self) -> Result<String, HomeserverError>;

    /// Sortie complète de la table des processus.
    fn process_table(&self) -> Result<String, HomeserverError>;

    /// Commande de listing des processus, exclue des correspondances.
    fn process_table_command(&self) -> &str {
        PROCESS_TABLE_COMMAND
    }
}

/// Adaptateur correspondant à la cible de compilation.
pub fn native() -> Arc<dyn HostListing> {
    #[cfg(target_os = "macos")]
    {
        Arc::new(super::launchd::Launchd)
    }
    #[cfg(not(target_os = "macos"))]
    {
        Arc::new(super::systemd::Systemd)
    }
}

/// Exécute une commande et renvoie sa sortie standard (UTF-8 lossy).
pub(crate) fn run_listing(program: &str, args: &[&str]) -> Result<String, HomeserverError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| HomeserverError::External(format!("{program}: {e}")))?;

    if !output.status.success() {
        return Err(HomeserverError::External(format!(
            "{program} exit code: {}",
            output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

pub(crate) fn run_process_table() -> Result<String, HomeserverError> {
    run_listing(PS_PROGRAM, &PS_ARGS)
}

/// Sources figées en mémoire (tests, benchs, démonstrations).
///
/// Une source retirée via [`FixedListing::without_services`] ou
/// [`FixedListing::without_processes`] se comporte comme une commande en échec.
#[derive(Debug, Clone, Default)]
pub struct FixedListing {
    services: Option<String>,
    processes: Option<String>,
}

impl FixedListing {
    pub fn new(services: impl Into<String>, processes: impl Into<String>) -> Self {
        Self {
            services: Some(services.into()),
            processes: Some(processes.into()),
        }
    }

    pub fn without_services(mut self) -> Self {
        self.services = None;
        self
    }

    pub fn without_processes(mut self) -> Self {
        self.processes = None;
        self
    }
}

impl HostListing for FixedListing {
    fn service_listing(&self) -> Result<String, HomeserverError> {
        self.services
            .clone()
            .ok_or_else(|| HomeserverError::External("service listing unavailable".into()))
    }

    fn process_table(&self) -> Result<String, HomeserverError> {
        self.processes
            .clone()
            .ok_or_else(|| HomeserverError::External("process table unavailable".into()))
    }
}
