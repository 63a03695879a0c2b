//! Moteur de découverte : quels services/processus du catalogue tournent sur l'hôte.
//!
//! Chaque source (gestionnaire de services, table des processus) est invoquée une
//! seule fois par découverte ; le texte capturé est partagé par toutes les entrées
//! du catalogue. Une source indisponible est traitée comme une sortie vide.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use crate::application::logging::LogEvent;
use crate::application::registry::ServiceRegistry;
use crate::domain::ServiceRecord;
use crate::infrastructure::listing::{self, HostListing};

/// Colonnes minimales d'une ligne du gestionnaire de services.
const SERVICE_MIN_FIELDS: usize = 3;
/// Colonnes minimales d'une ligne `ps aux` (user, pid, %cpu, %mem, vsz, rss, tty, stat, start, time, command).
const PROCESS_MIN_FIELDS: usize = 11;
const PROCESS_PID_FIELD: usize = 1;
const PROCESS_COMMAND_FIELD: usize = 10;
/// Jetons de la ligne de commande repris dans le libellé.
const COMMAND_TOKENS: usize = 3;
/// Marqueur « pas de PID » du gestionnaire de services.
const NO_PID: &str = "-";

#[derive(Clone)]
pub struct ServiceDiscoveryEngine {
    registry: Arc<ServiceRegistry>,
    listing: Arc<dyn HostListing>,
}

impl ServiceDiscoveryEngine {
    pub fn new(registry: ServiceRegistry, listing: Arc<dyn HostListing>) -> Self {
        Self {
            registry: Arc::new(registry),
            listing,
        }
    }

    /// Moteur branché sur l'adaptateur de la plateforme courante.
    pub fn native(registry: ServiceRegistry) -> Self {
        Self::new(registry, listing::native())
    }

    /// Invoque chaque source une fois. Les échecs sont journalisés puis ignorés.
    pub fn capture(&self) -> CapturedListings {
        let services = self.listing.service_listing().unwrap_or_else(|err| {
            LogEvent::SourceUnavailable {
                source: "service_manager",
                error: Cow::Owned(err.to_string()),
            }
            .emit();
            String::new()
        });
        let processes = self.listing.process_table().unwrap_or_else(|err| {
            LogEvent::SourceUnavailable {
                source: "process_table",
                error: Cow::Owned(err.to_string()),
            }
            .emit();
            String::new()
        });
        CapturedListings {
            services,
            processes,
            self_command: self.listing.process_table_command().to_string(),
        }
    }

    /// Services du catalogue trouvés (ordre du catalogue), puis tous les
    /// processus correspondant aux motifs (ordre des motifs, puis des lignes).
    /// Ne renvoie jamais d'erreur ni d'entrée `not_found`.
    pub fn discover(&self) -> Vec<ServiceRecord> {
        let started_at = Instant::now();
        let captured = self.capture();

        let mut records: Vec<ServiceRecord> = self
            .registry
            .services()
            .iter()
            .map(|name| captured.check_service(name))
            .filter(ServiceRecord::is_found)
            .collect();
        let services_found = records.len();

        for pattern in self.registry.processes() {
            records.extend(captured.check_process(pattern));
        }

        LogEvent::DiscoveryCompleted {
            services: services_found,
            processes: records.len() - services_found,
            duration_ms: started_at.elapsed().as_millis(),
        }
        .emit();

        records
    }
}

/// Sorties brutes capturées pour une découverte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedListings {
    pub services: String,
    pub processes: String,
    /// Commande de listing des processus (garde anti auto-correspondance).
    pub self_command: String,
}

impl CapturedListings {
    /// Première ligne exploitable du gestionnaire de services, sinon premier
    /// processus correspondant, sinon `not_found`.
    pub fn check_service(&self, name: &str) -> ServiceRecord {
        self.services
            .lines()
            .find_map(|line| parse_service_line(line, name))
            .or_else(|| self.check_process(name).into_iter().next())
            .unwrap_or_else(|| ServiceRecord::not_found(name))
    }

    /// Tous les processus correspondant au motif, dans l'ordre de la table.
    pub fn check_process(&self, pattern: &str) -> Vec<ServiceRecord> {
        self.processes
            .lines()
            .filter_map(|line| parse_process_line(line, pattern, &self.self_command))
            .collect()
    }
}

/// Ligne du gestionnaire de services `<pid|-> <statut> <libellé>`.
///
/// `None` si la ligne ne contient pas `name` (casse ignorée) ou compte moins
/// de trois colonnes. Un PID illisible vaut 0.
pub fn parse_service_line(line: &str, name: &str) -> Option<ServiceRecord> {
    if !contains_ignore_case(line, name) {
        return None;
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < SERVICE_MIN_FIELDS {
        return None;
    }
    let pid = match fields[0] {
        NO_PID => 0,
        raw => parse_pid(raw),
    };
    Some(ServiceRecord::running(name, pid))
}

/// Ligne `ps aux` correspondant à `pattern` (casse ignorée).
///
/// Les lignes contenant `self_command` (l'invocation de listing elle-même) et
/// les lignes tronquées (moins de 11 colonnes) sont ignorées. Le libellé est
/// `"<pattern> (<jusqu'à 3 jetons de la commande>)"`.
pub fn parse_process_line(line: &str, pattern: &str, self_command: &str) -> Option<ServiceRecord> {
    if !contains_ignore_case(line, pattern) {
        return None;
    }
    if !self_command.is_empty() && line.contains(self_command) {
        return None;
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < PROCESS_MIN_FIELDS {
        return None;
    }
    let pid = parse_pid(fields[PROCESS_PID_FIELD]);
    let command = &fields[PROCESS_COMMAND_FIELD..];
    let shown = &command[..command.len().min(COMMAND_TOKENS)];
    let name = format!("{pattern} ({})", shown.join(" "));
    Some(ServiceRecord::running(name, pid))
}

fn parse_pid(raw: &str) -> u32 {
    raw.parse::<u32>().unwrap_or(0)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
