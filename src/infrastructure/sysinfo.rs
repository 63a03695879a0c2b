use std::time::Duration;

use sysinfo::{
    CpuRefreshKind, Disks, MemoryRefreshKind, Networks, RefreshKind, System,
    MINIMUM_CPU_UPDATE_INTERVAL,
};
use tracing::debug;

use crate::domain::{CpuInfo, DiskInfo, HomeserverError, MemoryInfo, NetworkInfo, SystemInfo};

/// Fenêtre de mesure de l'utilisation CPU.
const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);
const ROOT_MOUNT: &str = "/";

/// Collecte bloquante (attend `CPU_SAMPLE_WINDOW` pour mesurer le CPU).
pub(crate) fn gather_system_info() -> Result<SystemInfo, HomeserverError> {
    let mut sys = System::new_with_specifics(
        RefreshKind::new()
            .with_memory(MemoryRefreshKind::new().with_ram())
            .with_cpu(CpuRefreshKind::new().with_cpu_usage()),
    );
    std::thread::sleep(CPU_SAMPLE_WINDOW.max(MINIMUM_CPU_UPDATE_INTERVAL));
    sys.refresh_cpu_specifics(CpuRefreshKind::new().with_cpu_usage());

    let cores = sys.cpus().len();
    if cores == 0 {
        return Err(HomeserverError::System("aucun CPU détecté".into()));
    }
    let usage_percent: Vec<f64> = sys
        .cpus()
        .iter()
        .map(|cpu| f64::from(cpu.cpu_usage()))
        .collect();

    let total = sys.total_memory();
    let used = sys.used_memory();
    let memory = MemoryInfo {
        total,
        available: sys.available_memory(),
        used,
        used_percent: used_percent(total, used),
    };

    let disks = root_disk(gather_disks()).into_iter().collect();
    let network = gather_network_counters();

    let info = SystemInfo {
        hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
        platform: System::name().unwrap_or_default(),
        os: std::env::consts::OS.to_string(),
        architecture: std::env::consts::ARCH.to_string(),
        cpu_count: cores,
        memory,
        cpu: CpuInfo {
            usage_percent,
            cores,
        },
        disks,
        network,
        uptime: System::uptime(),
        load_average: load_average(),
    };

    debug!(
        cpu = info.cpu_count,
        mem_used = info.memory.used,
        mem_total = info.memory.total,
        disks = info.disks.len(),
        interfaces = info.network.len(),
        "system_info_gathered"
    );

    Ok(info)
}

/// Compteurs cumulés par interface, triés par nom.
pub(crate) fn gather_network_counters() -> Vec<NetworkInfo> {
    let networks = Networks::new_with_refreshed_list();
    let mut out: Vec<NetworkInfo> = networks
        .list()
        .iter()
        .map(|(name, data)| NetworkInfo {
            name: name.clone(),
            bytes_sent: data.total_transmitted(),
            bytes_recv: data.total_received(),
        })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

/// (octets émis, octets reçus) sur l'ensemble des interfaces.
pub(crate) fn sum_counters(interfaces: &[NetworkInfo]) -> (u64, u64) {
    interfaces.iter().fold((0u64, 0u64), |(sent, recv), itf| {
        (
            sent.saturating_add(itf.bytes_sent),
            recv.saturating_add(itf.bytes_recv),
        )
    })
}

fn gather_disks() -> Vec<DiskInfo> {
    let disks = Disks::new_with_refreshed_list();
    disks
        .list()
        .iter()
        .map(|d| {
            let total = d.total_space();
            let free = d.available_space().min(total);
            let used = total - free;
            DiskInfo {
                device: d.name().to_string_lossy().into_owned(),
                mountpoint: d.mount_point().to_string_lossy().into_owned(),
                fstype: d.file_system().to_string_lossy().into_owned(),
                total,
                free,
                used,
                used_percent: used_percent(total, used),
            }
        })
        .collect()
}

fn root_disk(disks: Vec<DiskInfo>) -> Option<DiskInfo> {
    disks.into_iter().find(|d| d.mountpoint == ROOT_MOUNT)
}

fn load_average() -> Vec<f64> {
    #[cfg(unix)]
    {
        let la = System::load_average();
        vec![la.one, la.five, la.fifteen]
    }
    #[cfg(not(unix))]
    {
        Vec::new()
    }
}

pub(crate) fn used_percent(total: u64, used: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = used.min(total) as f64 / total as f64;
    (ratio * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(mountpoint: &str) -> DiskInfo {
        DiskInfo {
            device: "/dev/sda1".into(),
            mountpoint: mountpoint.into(),
            fstype: "ext4".into(),
            total: 100,
            free: 40,
            used: 60,
            used_percent: 60.0,
        }
    }

    #[test]
    fn used_percent_handles_regular_case() {
        let pct = used_percent(1_000, 750);
        assert!((pct - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn used_percent_handles_zero_total() {
        assert_eq!(used_percent(0, 0), 0.0);
    }

    #[test]
    fn used_percent_is_capped() {
        assert_eq!(used_percent(10, 50), 100.0);
    }

    #[test]
    fn root_disk_picks_slash_mount() {
        let picked = root_disk(vec![disk("/boot"), disk("/"), disk("/home")]).expect("root");
        assert_eq!(picked.mountpoint, "/");
        assert!(root_disk(vec![disk("/data")]).is_none());
    }

    #[test]
    fn sum_counters_adds_every_interface() {
        let itfs = vec![
            NetworkInfo {
                name: "eth0".into(),
                bytes_sent: 10,
                bytes_recv: 20,
            },
            NetworkInfo {
                name: "lo".into(),
                bytes_sent: 1,
                bytes_recv: 2,
            },
        ];
        assert_eq!(sum_counters(&itfs), (11, 22));
        assert_eq!(sum_counters(&[]), (0, 0));
    }
}
