use std::net::SocketAddr;

use clap::Parser;

#[derive(Parser)]
#[command(author, about, version)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[clap(long, env = "CONFIG_FILE", default_value = "config.yaml")]
    pub config_file: String,

    /// Overrides `socket_address` from the configuration file.
    #[clap(long, env = "SOCKET_ADDRESS")]
    pub socket_address: Option<SocketAddr>,
}
