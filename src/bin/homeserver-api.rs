#![forbid(unsafe_code)]

#[path = "../cli/opts.rs"]
mod cli_opts;
#[path = "homeserver_api/config_guard.rs"]
mod config_guard;
#[path = "homeserver_api/web_mode.rs"]
mod web_mode;

use std::borrow::Cow;

use anyhow::Result;
use clap::Parser;

use cli_opts::Opts;

fn main() -> Result<()> {
    let opts = Opts::parse();

    let (cfg, source) = config_guard::resolve_config(&opts)?;
    homeserver::init_logging(&cfg.log_level);
    homeserver::LogEvent::ConfigLoaded {
        source: Cow::Owned(source),
        port: cfg.port,
        file_browser: cfg.enable_file_browser,
    }
    .emit();

    let engine =
        homeserver::ServiceDiscoveryEngine::native(homeserver::ServiceRegistry::from_config(&cfg));

    if opts.list_services {
        let records = engine.discover();
        let json = if opts.pretty {
            serde_json::to_string_pretty(&records)?
        } else {
            serde_json::to_string(&records)?
        };
        println!("{json}");
        return Ok(());
    }

    web_mode::run_server(cfg, engine)
}
