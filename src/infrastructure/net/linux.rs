use std::fs;

const SOCKET_TABLES: [&str; 4] = [
    "/proc/net/tcp",
    "/proc/net/tcp6",
    "/proc/net/udp",
    "/proc/net/udp6",
];

pub(crate) fn count_active_connections() -> usize {
    SOCKET_TABLES
        .iter()
        .filter_map(|path| fs::read_to_string(path).ok())
        .map(|content| count_socket_entries(&content))
        .sum()
}

/// Compte les entrées d'une table /proc/net (en-tête ignoré).
pub(crate) fn count_socket_entries(content: &str) -> usize {
    content
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_blank_lines_are_skipped() {
        let table = "\
  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 0100007F:1F90 00000000:0000 0A 00000000:00000000 00:00000000 00000000  1000        0 12345 1
   1: 0100007F:0035 00000000:0000 0A 00000000:00000000 00:00000000 00000000   101        0 23456 1

";
        assert_eq!(count_socket_entries(table), 2);
    }

    #[test]
    fn empty_table_counts_zero() {
        assert_eq!(count_socket_entries(""), 0);
    }
}
