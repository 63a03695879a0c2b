use clap::{ArgAction, Parser};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "homeserver-api",
    version,
    about = "API de télémétrie du serveur domestique"
)]
pub(crate) struct Opts {
    /// Fichier de config TOML (feature `config`)
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Port d'écoute (prime sur PORT et la config)
    #[arg(
        long,
        value_name = "PORT",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub(crate) port: Option<u16>,

    /// Adresse d'écoute (prime sur BIND_ADDR et la config)
    #[arg(long, value_name = "ADDR")]
    pub(crate) bind: Option<IpAddr>,

    /// Affiche les services découverts (JSON) puis quitte, sans serveur HTTP
    #[arg(long = "list-services", action = ArgAction::SetTrue)]
    pub(crate) list_services: bool,

    /// Mise en forme JSON indentée (avec --list-services)
    #[arg(long, action = ArgAction::SetTrue, requires = "list_services")]
    pub(crate) pretty: bool,
}
