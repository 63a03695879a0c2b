use serde::{Deserialize, Serialize};

/// État observé d'un service ou d'un processus.
///
/// Aucun autre état n'est distingué : un service installé mais arrêté et un
/// service absent sont tous deux `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Running,
    NotFound,
}

/// Un service (ou processus) découvert sur l'hôte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Nom canonique du catalogue, ou libellé `"<motif> (<commande>)"` pour un processus.
    pub name: String,
    pub status: ServiceStatus,
    /// 0 si absent ou non lisible.
    pub pid: u32,
}

impl ServiceRecord {
    pub fn running(name: impl Into<String>, pid: u32) -> Self {
        Self {
            name: name.into(),
            status: ServiceStatus::Running,
            pid,
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ServiceStatus::NotFound,
            pid: 0,
        }
    }

    pub fn is_found(&self) -> bool {
        self.status != ServiceStatus::NotFound
    }
}

/// Vue d'ensemble de l'hôte servie par `/api/system`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    pub os: String,
    pub architecture: String,
    pub cpu_count: usize,
    pub memory: MemoryInfo,
    pub cpu: CpuInfo,
    pub disks: Vec<DiskInfo>,
    pub network: Vec<NetworkInfo>,
    /// Secondes depuis le démarrage.
    pub uptime: u64,
    /// 1, 5 et 15 minutes ; vide si la plateforme ne le fournit pas.
    pub load_average: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    /// Utilisation par cœur (%), mesurée sur une fenêtre d'échantillonnage.
    pub usage_percent: Vec<f64>,
    pub cores: usize,
}

/// Système de fichiers monté.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskInfo {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub total: u64,
    pub free: u64,
    pub used: u64,
    pub used_percent: f64,
}

/// Compteurs cumulés d'une interface réseau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub name: String,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

/// Synthèse réseau servie par `/api/network`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub total_bytes_sent: u64,
    pub total_bytes_received: u64,
    pub active_connections: usize,
    pub timestamp: i64,
}

/// Contenu d'un répertoire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub path: String,
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    /// Horodatage RFC 3339 (UTC), absent si les métadonnées sont illisibles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_record_has_zero_pid() {
        let rec = ServiceRecord::not_found("nginx");
        assert_eq!(rec.pid, 0);
        assert!(!rec.is_found());
    }

    #[test]
    fn record_serializes_with_snake_case_status() {
        let json = serde_json::to_string(&ServiceRecord::running("nginx", 1234)).unwrap();
        assert_eq!(json, r#"{"name":"nginx","status":"running","pid":1234}"#);

        let json = serde_json::to_string(&ServiceRecord::not_found("redis-server")).unwrap();
        assert!(json.contains(r#""status":"not_found""#));
    }
}
