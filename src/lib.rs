//! homeserver : télémétrie d'un serveur domestique exposée en HTTP.
//!
//! Le cœur est le moteur de découverte de services : il croise le listing du
//! gestionnaire de services et la table des processus pour dire quels services
//! du catalogue tournent sur l'hôte.
//!
//! # Examples
//! ```rust
//! use std::sync::Arc;
//! use homeserver::{FixedListing, ServiceDiscoveryEngine, ServiceRegistry};
//!
//! let listing = FixedListing::new("1234\t0\tcom.example.nginx\n", "");
//! let engine = ServiceDiscoveryEngine::new(ServiceRegistry::default(), Arc::new(listing));
//! let records = engine.discover();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].name, "nginx");
//! assert_eq!(records[0].pid, 1234);
//! ```

#![forbid(unsafe_code)]

mod application;
pub mod domain;
mod infrastructure;

pub use domain::{
    ApiConfig, CatalogConfig, CpuInfo, DirectoryListing, DiskInfo, FileEntry, HomeserverError,
    MemoryInfo, NetworkInfo, NetworkSummary, ServiceRecord, ServiceStatus, SystemInfo,
};

pub use application::discovery::{
    parse_process_line, parse_service_line, CapturedListings, ServiceDiscoveryEngine,
};
pub use application::registry::{ServiceRegistry, DEFAULT_PROCESSES, DEFAULT_SERVICES};

pub use infrastructure::launchd::Launchd;
pub use infrastructure::listing::{native as native_listing, FixedListing, HostListing};
pub use infrastructure::systemd::Systemd;

// API fonctionnelle
pub use application::files::list_directory;
pub use application::system::{network_status, system_info};

#[cfg(feature = "config")]
pub use application::load_config_from_path;

#[cfg(feature = "web")]
pub use application::web::serve_http;

pub use application::logging::{init_logging, LogEvent};

// Outils de test/fuzz internes
#[cfg(any(test, feature = "internals"))]
pub mod internals {
    pub use crate::infrastructure::systemd::__normalize_systemctl_show_for_tests;
}
