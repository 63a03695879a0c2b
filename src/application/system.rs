use crate::domain::{HomeserverError, NetworkSummary, SystemInfo};
use crate::infrastructure::{net, sysinfo};

/// Vue CPU/mémoire/disque/réseau de l'hôte (bloquant : fenêtre de mesure CPU).
pub fn system_info() -> Result<SystemInfo, HomeserverError> {
    sysinfo::gather_system_info()
}

/// Totaux réseau et nombre de sockets actifs.
pub fn network_status() -> NetworkSummary {
    let interfaces = sysinfo::gather_network_counters();
    let (sent, received) = sysinfo::sum_counters(&interfaces);
    NetworkSummary {
        total_bytes_sent: sent,
        total_bytes_received: received,
        active_connections: net::count_active_connections(),
        timestamp: unix_timestamp(),
    }
}

pub(crate) fn unix_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
