use std::env;
use std::process;

use pawshelt::cli;
use pawshelt::config::AppConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pawshelt=info".into()),
        )
        .init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => match AppConfig::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("No se pudo leer la configuración: {err}");
                process::exit(1);
            }
        },
        Err(_) => AppConfig::default(),
    };

    if let Err(err) = cli::run(config).await {
        eprintln!("{err}");
        process::exit(1);
    }
}
