//! CLI arguments for the `tron-gateway` binary.

use {clap::Parser, std::net::SocketAddr, std::path::PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The address to bind the HTTP API to.
    #[clap(long, env, default_value = "127.0.0.1:7878")]
    pub addr: SocketAddr,

    /// Log filter to use.
    ///
    /// This is the same format as the `RUST_LOG` environment variable
    /// typically used by `tracing-subscriber`.
    #[clap(long, env, default_value = "warn,tron_gateway=debug")]
    pub log: String,

    /// The path to the gateway configuration file.
    #[clap(long, env)]
    pub config: PathBuf,
}
