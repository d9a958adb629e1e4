use log::{error, info};

use ftp_client::config::ClientConfig;
use ftp_client::utils::logging;
use ftp_client::FtpClient;

fn main() {
    logging::setup_logging();

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    info!("Connecting to {}:{}", config.host, config.port);
    let mut client = FtpClient::new();
    if !client.connect_with_port(&config.host, &config.port.to_string()) {
        error!("Could not connect to {}", config.host);
        std::process::exit(1);
    }

    if !client.login(&config.credentials()) {
        error!("Login failed for user {}", config.username);
        client.quit();
        std::process::exit(1);
    }

    if let Some(dir) = client.pwd() {
        info!("Working directory: {dir}");
    }

    match client.list(config.list_dir.as_deref()) {
        Some(listing) => print!("{listing}"),
        None => error!("Could not retrieve directory listing"),
    }

    if !client.quit() {
        error!("Control connection did not close cleanly");
        std::process::exit(1);
    }
}
