//! Command Line Interface (CLI) arguments.

use clap::Parser;
use std::path::PathBuf;

/// Climate API command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// The IP address on which the server should listen
    #[arg(long, default_value = "0.0.0.0", env = "CLIMATE_API_HOST")]
    pub host: String,
    /// The port to which the server should bind
    #[arg(long, default_value_t = 8080, env = "CLIMATE_API_PORT")]
    pub port: u16,
    /// Flag indicating whether HTTPS should be used
    #[arg(long, default_value_t = false, env = "CLIMATE_API_HTTPS")]
    pub https: bool,
    /// Path to the certificate file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/climate-api/certs/cert.pem",
        env = "CLIMATE_API_CERT_FILE"
    )]
    pub cert_file: String,
    /// Path to the key file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/climate-api/certs/key.pem",
        env = "CLIMATE_API_KEY_FILE"
    )]
    pub key_file: String,
    /// Maximum time in seconds to wait for requests to complete upon receiving `ctrl+c` signal.
    #[arg(long, default_value_t = 60, env = "CLIMATE_API_SHUTDOWN_TIMEOUT")]
    pub graceful_shutdown_timeout: u64,
    /// CSV file holding the station roster
    #[arg(
        long,
        default_value = "Resources/hawaii_stations.csv",
        env = "CLIMATE_API_STATIONS_FILE"
    )]
    pub stations_file: PathBuf,
    /// CSV file holding the daily measurements
    #[arg(
        long,
        default_value = "Resources/hawaii_measurements.csv",
        env = "CLIMATE_API_MEASUREMENTS_FILE"
    )]
    pub measurements_file: PathBuf,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
