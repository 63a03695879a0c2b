use crate::domain::HomeserverError;

use super::listing::{run_listing, run_process_table, HostListing};

/// macOS : `launchctl list` produit déjà `PID Status Label`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Launchd;

impl HostListing for Launchd {
    fn service_listing(&self) -> Result<String, HomeserverError> {
        run_listing("launchctl", &["list"])
    }

    fn process_table(&self) -> Result<String, HomeserverError> {
        run_process_table()
    }
}
