#[cfg(target_os = "linux")]
pub mod linux;

/// Nombre de sockets TCP/UDP connus du noyau (0 hors Linux).
pub(crate) fn count_active_connections() -> usize {
    #[cfg(target_os = "linux")]
    {
        linux::count_active_connections()
    }
    #[cfg(not(target_os = "linux"))]
    {
        0
    }
}
