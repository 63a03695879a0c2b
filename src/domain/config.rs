use std::net::{IpAddr, Ipv4Addr};

use serde::Deserialize;

/// Configuration haut-niveau de l'API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Adresse d'écoute (toutes les interfaces par défaut).
    pub bind: IpAddr,
    /// Port HTTP.
    pub port: u16,
    /// Origins autorisés par la politique CORS (`*` = tous).
    pub cors_origins: Vec<String>,
    /// Répertoire listé par `/api/files` quand `path` est absent.
    pub file_browser_root: String,
    /// Monte la route `/api/files`.
    pub enable_file_browser: bool,
    /// Niveau de log appliqué si RUST_LOG n'est pas défini.
    pub log_level: String,
    /// Délai maximal (secondes) d'une découverte de services côté HTTP.
    pub services_timeout_secs: u64,
    /// Surcharge des catalogues de services/processus.
    pub catalog: Option<CatalogConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            file_browser_root: "/".to_string(),
            enable_file_browser: true,
            log_level: "info".to_string(),
            services_timeout_secs: 10,
            catalog: None,
        }
    }
}

/// Catalogues fixés au déploiement. Une liste absente garde les valeurs intégrées.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Noms de services cherchés dans le gestionnaire de services.
    pub services: Option<Vec<String>>,
    /// Motifs cherchés dans la table des processus.
    pub processes: Option<Vec<String>>,
}

impl ApiConfig {
    /// Applique les variables d'environnement (`PORT`, `BIND_ADDR`, `CORS_ORIGINS`,
    /// `FILE_BROWSER_ROOT`, `ENABLE_FILE_BROWSER`, `LOG_LEVEL`).
    /// Les valeurs vides ou invalides sont ignorées.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = var("PORT").and_then(|v| v.trim().parse::<u16>().ok()) {
            self.port = port;
        }
        if let Some(bind) = var("BIND_ADDR").and_then(|v| v.trim().parse::<IpAddr>().ok()) {
            self.bind = bind;
        }
        if let Some(origins) = var("CORS_ORIGINS") {
            self.cors_origins = parse_origins(&origins);
        }
        if let Some(root) = var("FILE_BROWSER_ROOT") {
            self.file_browser_root = root;
        }
        if let Some(enabled) = var("ENABLE_FILE_BROWSER").and_then(|v| parse_bool(&v)) {
            self.enable_file_browser = enabled;
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = level.trim().to_string();
        }
    }

    /// Variante lisant l'environnement du processus.
    pub fn apply_process_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_dashboard_setup() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.port, 8080);
        assert!(cfg.enable_file_browser);
        assert_eq!(cfg.file_browser_root, "/");
        assert_eq!(cfg.cors_origins.len(), 2);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn env_overrides_are_applied() {
        let mut cfg = ApiConfig::default();
        cfg.apply_env(env(&[
            ("PORT", "9090"),
            ("CORS_ORIGINS", " http://a.lan , http://b.lan ,"),
            ("ENABLE_FILE_BROWSER", "false"),
            ("FILE_BROWSER_ROOT", "/srv"),
            ("BIND_ADDR", "127.0.0.1"),
        ]));
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.cors_origins, vec!["http://a.lan", "http://b.lan"]);
        assert!(!cfg.enable_file_browser);
        assert_eq!(cfg.file_browser_root, "/srv");
        assert_eq!(cfg.bind, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn invalid_or_empty_env_values_are_ignored() {
        let mut cfg = ApiConfig::default();
        cfg.apply_env(env(&[
            ("PORT", "not-a-port"),
            ("ENABLE_FILE_BROWSER", "maybe"),
            ("LOG_LEVEL", "  "),
        ]));
        assert_eq!(cfg, ApiConfig::default());
    }

    #[test]
    fn bool_parsing_accepts_common_spellings() {
        for raw in ["1", "t", "TRUE", "True"] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["0", "F", "false"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_bool("yes"), None);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_document_keeps_defaults() {
        let cfg: ApiConfig = toml::from_str(
            r#"
            port = 9000
            [catalog]
            processes = ["jellyfin"]
            "#,
        )
        .expect("deserialize config");
        assert_eq!(cfg.port, 9000);
        assert!(cfg.enable_file_browser);
        let catalog = cfg.catalog.expect("catalog");
        assert_eq!(catalog.processes, Some(vec!["jellyfin".to_string()]));
        assert_eq!(catalog.services, None);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_rejects_unknown_fields() {
        let res = toml::from_str::<ApiConfig>("gin_mode = \"release\"");
        assert!(res.is_err());
    }
}
