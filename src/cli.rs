use layered_env::{define_config, docs, format_config_error, Load, Resolve};
use std::{process, time::Duration};
use tracing_subscriber::EnvFilter;

define_config! {
    #[derive(Debug, Default)]
    pub struct ServiceConfig {
        #[field(env = "APP_ENV", doc = "Deployment environment", default = "dev")]
        pub env: String,

        #[field(env = "PORT", doc = "Port the service listens on", default = "8080")]
        pub port: u16,

        #[field(env = "DEBUG", doc = "Enable debug mode", default = "false")]
        pub debug: bool,

        #[field(env = "REQUEST_TIMEOUT", doc = "Upstream request timeout", default = "5s")]
        pub timeout: Duration,

        #[field(env = "DATABASE_URL", doc = "Database connection string")]
        pub database_url: String,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("resolve") => resolve(args.next().as_deref().unwrap_or(".env")),
        Some("docs") => generate_docs(args.next().as_deref().unwrap_or("CONFIG.md")),
        Some(arg) => {
            eprintln!("unknown arg: {}. Available: resolve, docs", arg);
            process::exit(2);
        }
        None => {
            println!("Usage: util-cli [command]");
            println!("Commands:");
            println!("  resolve [FILE]  - Resolve the sample config from FILE (default .env) and the environment");
            println!("  docs [OUT]      - Write the sample config documentation to OUT (default CONFIG.md)");
        }
    }
}

fn resolve(path: &str) {
    match ServiceConfig::load_or_error(path) {
        Ok(config) => {
            println!("Config loaded successfully!");
            println!("  env: {}", config.env);
            println!("  port: {}", config.port);
            println!("  debug: {}", config.debug);
            println!("  timeout: {}", humantime::format_duration(config.timeout));
            println!("  database_url: <{} chars>", config.database_url.len());
        }
        Err(err) => {
            eprintln!("{}", format_config_error(&err));
            process::exit(1);
        }
    }
}

fn generate_docs(path: &str) {
    match docs::write_docs(&ServiceConfig::descriptors(), path) {
        Ok(_) => println!("✓ Documentation written to {}", path),
        Err(e) => {
            eprintln!("✗ Failed to write documentation: {}", e);
            process::exit(1);
        }
    }
}
