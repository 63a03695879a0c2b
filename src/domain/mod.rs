pub mod config;
pub mod error;
pub mod model;

pub use config::{ApiConfig, CatalogConfig};
pub use error::HomeserverError;
pub use model::{
    CpuInfo, DirectoryListing, DiskInfo, FileEntry, MemoryInfo, NetworkInfo, NetworkSummary,
    ServiceRecord, ServiceStatus, SystemInfo,
};
