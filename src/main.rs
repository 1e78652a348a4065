//! vhost-mapper command line.
//!
//! # Commands
//!
//! ```text
//! vhost-mapper check   --config vhost.toml
//! vhost-mapper resolve --config vhost.toml --host www.example.com --uri /index.html
//! vhost-mapper strip   /srv/www.example.com/public/htdocs/index.html ...
//! ```
//!
//! `resolve` and `strip` probe the real filesystem.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use vhost_mapper::config::{load_config, VhostConfig};
use vhost_mapper::fallback::resolver::{DEFAULT_MAX_HOSTNAME_LEN, DEFAULT_PREFIX};
use vhost_mapper::fallback::{FallbackResolver, FsProbe};
use vhost_mapper::observability::logging::init_logging;
use vhost_mapper::routing::{RequestContext, Translator};
use vhost_mapper::ResolvedPath;

#[derive(Parser)]
#[command(name = "vhost-mapper")]
#[command(about = "Map virtual host requests onto the filesystem", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a configuration file
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Translate a single request
    Resolve {
        /// Configuration file; built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Requested server name
        #[arg(long)]
        host: String,
        /// Request URI
        #[arg(long, default_value = "/")]
        uri: String,
        /// Local port
        #[arg(short, long, default_value_t = 80)]
        port: u16,
        /// Local IP address, for IP-based maps
        #[arg(long)]
        ip: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the fallback search over literal paths
    Strip {
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
        #[arg(long, default_value_t = DEFAULT_MAX_HOSTNAME_LEN)]
        max_hostname_len: usize,
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            init_logging(&VhostConfig::default().observability);
            let loaded = load_config(&config)?;
            println!("{}: ok", config.display());
            println!("  document_root = {}", loaded.document_root.map);
            println!("  script_alias  = {}", loaded.script_alias.map);
            println!(
                "  fallback      = {}",
                if loaded.fallback.enabled { loaded.fallback.prefix.as_str() } else { "off" }
            );
        }
        Commands::Resolve { config, host, uri, port, ip, json } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => VhostConfig::default(),
            };
            init_logging(&config.observability);

            let translator = Translator::from_config(&config)?;
            let mut req = RequestContext::new(host, uri).with_port(port);
            req.local_ip = ip;

            match translator.translate(&req, &FsProbe) {
                Ok(t) => {
                    let document_root = t
                        .document_root
                        .as_deref()
                        .map(|root| String::from_utf8_lossy(root).into_owned());
                    if json {
                        let out = json!({
                            "filename": t.filename.to_string(),
                            "handler": t.handler.map(|h| h.to_string()),
                            "document_root": document_root,
                            "fallback": t.fallback.to_string(),
                        });
                        println!("{}", serde_json::to_string_pretty(&out)?);
                    } else {
                        println!("{}", t.filename);
                        if let Some(handler) = t.handler {
                            println!("handler: {}", handler);
                        }
                        if let Some(root) = document_root {
                            println!("document root: {}", root);
                        }
                        println!("fallback: {}", t.fallback);
                    }
                }
                Err(decline) => {
                    if json {
                        println!("{}", json!({ "declined": decline.to_string() }));
                    } else {
                        println!("declined: {}", decline);
                    }
                }
            }
        }
        Commands::Strip { prefix, max_hostname_len, paths } => {
            init_logging(&VhostConfig::default().observability);
            let resolver = FallbackResolver::new(prefix, max_hostname_len);
            for input in paths {
                let (path, outcome) = resolver.resolve(ResolvedPath::from(input.as_str()), &FsProbe);
                println!("{} -> {} [{}]", input, path, outcome);
            }
        }
    }

    Ok(())
}
