#[cfg(unix)]
use tokio::signal::unix::{self, SignalKind};
use {
    crate::{
        api::Api,
        domain::Gateway,
        infra::{cli, config, node::TronGrid, recovery::Secp256k1, wallet},
    },
    clap::Parser,
    std::{net::SocketAddr, sync::Arc},
    tokio::sync::oneshot,
};

pub async fn start(args: impl IntoIterator<Item = String>) {
    let args = cli::Args::parse_from(args);
    run_with(args, None).await;
}

pub async fn run(
    args: impl IntoIterator<Item = String>,
    bind: Option<oneshot::Sender<SocketAddr>>,
) {
    let args = cli::Args::parse_from(args);
    run_with(args, bind).await;
}

async fn run_with(args: cli::Args, bind: Option<oneshot::Sender<SocketAddr>>) {
    // Tests start several gateways in one process, only the first one gets
    // to install the subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&args.log))
        .try_init();
    tracing::info!("running gateway with {args:#?}");

    let config = config::load(&args.config).await;
    tracing::info!(network = %config.network, "loaded config");

    let node = TronGrid::try_new(config.node).unwrap_or_else(|err| {
        panic!("failed to create node client: {err}");
    });
    let wallet = wallet::try_new(config.wallet).unwrap_or_else(|err| {
        panic!("failed to create wallet client: {err}");
    });
    let gateway = Gateway::new(
        wallet,
        Arc::new(node),
        Arc::new(Secp256k1),
        config.tokens,
        config.dispatch,
    );

    Api {
        addr: args.addr,
        gateway,
    }
    .serve(bind, shutdown_signal())
    .await
    .unwrap();
}

#[cfg(unix)]
async fn shutdown_signal() {
    // Kubernetes sends SIGTERM, whereas locally SIGINT (ctrl-c) is most common.
    let mut interrupt =
        unix::signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    let mut terminate =
        unix::signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    tokio::select! {
        _ = interrupt.recv() => tracing::info!("received SIGINT"),
        _ = terminate.recv() => tracing::info!("received SIGTERM"),
    }
}

#[cfg(windows)]
async fn shutdown_signal() {
    // We don't support signal handling on windows.
    std::future::pending().await
}
