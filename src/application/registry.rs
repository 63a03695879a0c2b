use crate::domain::ApiConfig;

/// Services cherchés via le gestionnaire de services (démons réseau, web, bases).
pub const DEFAULT_SERVICES: [&str; 9] = [
    "ssh",
    "nginx",
    "docker",
    "postgresql",
    "mysql",
    "httpd",
    "apache2",
    "redis-server",
    "mongodb",
];

/// Motifs cherchés dans la table des processus (l'API elle-même, runtimes).
pub const DEFAULT_PROCESSES: [&str; 3] = ["homeserver-api", "node", "go"];

/// Catalogues fixes interrogés par le moteur de découverte.
/// L'ordre des catalogues fixe l'ordre du résultat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRegistry {
    services: Vec<String>,
    processes: Vec<String>,
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICES, DEFAULT_PROCESSES)
    }
}

impl ServiceRegistry {
    /// Les entrées vides (après trim) sont ignorées.
    pub fn new<S, P>(services: S, processes: P) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            services: clean(services),
            processes: clean(processes),
        }
    }

    /// Catalogues intégrés, surchargés liste par liste par `[catalog]`.
    pub fn from_config(cfg: &ApiConfig) -> Self {
        let defaults = Self::default();
        let Some(catalog) = cfg.catalog.as_ref() else {
            return defaults;
        };
        Self {
            services: catalog
                .services
                .clone()
                .map(clean)
                .unwrap_or(defaults.services),
            processes: catalog
                .processes
                .clone()
                .map(clean)
                .unwrap_or(defaults.processes),
        }
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    pub fn processes(&self) -> &[String] {
        &self.processes
    }
}

fn clean<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    items
        .into_iter()
        .map(Into::into)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatalogConfig;

    #[test]
    fn default_catalogs_keep_declared_order() {
        let reg = ServiceRegistry::default();
        assert_eq!(reg.services().first().map(String::as_str), Some("ssh"));
        assert_eq!(reg.services().last().map(String::as_str), Some("mongodb"));
        assert_eq!(reg.processes(), ["homeserver-api", "node", "go"]);
    }

    #[test]
    fn blank_entries_are_dropped() {
        let reg = ServiceRegistry::new(["nginx", "  ", ""], [" node "]);
        assert_eq!(reg.services(), ["nginx"]);
        assert_eq!(reg.processes(), ["node"]);
    }

    #[test]
    fn config_overrides_each_catalog_independently() {
        let cfg = ApiConfig {
            catalog: Some(CatalogConfig {
                services: None,
                processes: Some(vec!["jellyfin".into(), "python".into()]),
            }),
            ..ApiConfig::default()
        };
        let reg = ServiceRegistry::from_config(&cfg);
        assert_eq!(reg.services(), ServiceRegistry::default().services());
        assert_eq!(reg.processes(), ["jellyfin", "python"]);
    }

    #[test]
    fn config_without_catalog_uses_defaults() {
        let reg = ServiceRegistry::from_config(&ApiConfig::default());
        assert_eq!(reg, ServiceRegistry::default());
    }
}
