use crate::domain::HomeserverError;

use super::listing::{run_listing, run_process_table, HostListing};

/// Linux/systemd : les blocs `systemctl show` sont ramenés au format canonique
/// `<pid|-> <sub> <unit>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Systemd;

impl HostListing for Systemd {
    fn service_listing(&self) -> Result<String, HomeserverError> {
        // systemctl show --property=Id,MainPID,ActiveState,SubState '*.service'
        let raw = run_listing(
            "systemctl",
            &[
                "show",
                "--property=Id,MainPID,ActiveState,SubState",
                "*.service",
            ],
        )?;
        Ok(normalize_show_output(&raw))
    }

    fn process_table(&self) -> Result<String, HomeserverError> {
        run_process_table()
    }
}

/// `ActiveState` d'une unité dont le processus principal tourne.
const RUNNING_STATES: [&str; 2] = ["active", "reloading"];

#[derive(Debug, Default)]
struct UnitProperties {
    id: Option<String>,
    main_pid: Option<String>,
    active: Option<String>,
    sub: Option<String>,
}

impl UnitProperties {
    fn is_empty(&self) -> bool {
        self.id.is_none() && self.main_pid.is_none() && self.active.is_none() && self.sub.is_none()
    }

    fn set(&mut self, key: &str, value: &str) {
        let value = Some(value.trim().to_string());
        match key.trim() {
            "Id" => self.id = value,
            "MainPID" => self.main_pid = value,
            "ActiveState" => self.active = value,
            "SubState" => self.sub = value,
            _ => {}
        }
    }

    fn to_line(&self) -> Option<String> {
        if !matches!(self.active.as_deref(), Some(state) if RUNNING_STATES.contains(&state)) {
            return None;
        }
        let id = self.id.as_deref().filter(|id| !id.is_empty())?;
        let pid = match self.main_pid.as_deref() {
            Some(pid) if !pid.is_empty() && pid != "0" => pid,
            _ => "-",
        };
        let sub = self.sub.as_deref().filter(|s| !s.is_empty()).unwrap_or("-");
        Some(format!("{pid} {sub} {id}"))
    }
}

/// Blocs `Clé=valeur` séparés par une ligne vide → une ligne par unité active.
fn normalize_show_output(raw: &str) -> String {
    let mut lines = Vec::new();
    let mut current = UnitProperties::default();

    for line in raw.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                lines.extend(current.to_line());
                current = UnitProperties::default();
            }
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            current.set(key, value);
        }
    }
    if !current.is_empty() {
        lines.extend(current.to_line());
    }

    lines.join("\n")
}

/// Wrapper public pour tests/fuzz (feature-gated).
#[cfg(any(test, feature = "internals"))]
#[doc(hidden)]
pub fn __normalize_systemctl_show_for_tests(raw: &str) -> String {
    normalize_show_output(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn active_units_become_canonical_lines() {
        let raw = "\
MainPID=812
Id=nginx.service
ActiveState=active
SubState=running

MainPID=0
Id=systemd-tmpfiles-setup.service
ActiveState=active
SubState=exited

MainPID=0
Id=redis-server.service
ActiveState=inactive
SubState=dead
";
        let out = normalize_show_output(raw);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "812 running nginx.service",
                "- exited systemd-tmpfiles-setup.service"
            ]
        );
    }

    #[test]
    fn reloading_unit_is_kept_and_activating_is_dropped() {
        let raw = "\
Id=nginx.service
MainPID=812
ActiveState=reloading
SubState=reload

Id=postgresql.service
MainPID=0
ActiveState=activating
SubState=start
";
        assert_eq!(normalize_show_output(raw), "812 reload nginx.service");
    }

    #[test]
    fn block_without_trailing_blank_line_is_flushed() {
        let out = normalize_show_output("Id=ssh.service\nActiveState=active\nMainPID=77");
        assert_eq!(out, "77 - ssh.service");
    }

    #[test]
    fn missing_id_is_dropped() {
        assert_eq!(normalize_show_output("ActiveState=active\nMainPID=1\n"), "");
    }

    proptest! {
        #[test]
        fn normalized_lines_always_have_three_fields(
            units in prop::collection::vec(
                ("[a-z][a-z0-9-]{0,12}", 0u32..100_000, "[a-z]{1,8}"),
                0..8
            )
        ) {
            let mut raw = String::new();
            for (name, pid, sub) in &units {
                raw.push_str(&format!(
                    "MainPID={pid}\nId={name}.service\nActiveState=active\nSubState={sub}\n\n"
                ));
            }
            let out = normalize_show_output(&raw);
            prop_assert_eq!(out.lines().count(), units.len());
            for line in out.lines() {
                prop_assert_eq!(line.split_whitespace().count(), 3);
            }
        }

        #[test]
        fn normalize_tolerates_garbage(data: Vec<u8>) {
            let text = String::from_utf8_lossy(&data);
            let _ = normalize_show_output(&text);
        }
    }
}
