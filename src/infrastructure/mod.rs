pub mod listing;
pub mod sysinfo;

pub mod launchd;
pub mod systemd;

pub mod net;
