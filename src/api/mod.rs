//! The HTTP API a front-end talks to.

use {
    crate::domain::Gateway,
    std::{future::Future, net::SocketAddr, sync::Arc},
    tokio::sync::oneshot,
};

mod routes;

pub struct Api {
    pub addr: SocketAddr,
    pub gateway: Gateway,
}

impl Api {
    pub async fn serve(
        self,
        bind: Option<oneshot::Sender<SocketAddr>>,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), hyper::Error> {
        let app = axum::Router::new()
            .route("/healthz", axum::routing::get(routes::healthz))
            .route("/metrics", axum::routing::get(routes::metrics))
            .route("/wallet/connect", axum::routing::post(routes::connect))
            .route("/wallet/disconnect", axum::routing::post(routes::disconnect))
            .route("/wallet/account", axum::routing::get(routes::account))
            .route(
                "/wallet/accounts-changed",
                axum::routing::post(routes::accounts_changed),
            )
            .route("/status", axum::routing::get(routes::status))
            .route("/tokens", axum::routing::get(routes::tokens))
            .route("/balance/:address", axum::routing::get(routes::balance))
            .route("/transfer", axum::routing::post(routes::transfer))
            .route("/approve", axum::routing::post(routes::approve))
            .route("/sign-message", axum::routing::post(routes::sign_message))
            .route("/verify/message", axum::routing::post(routes::verify_message))
            .route(
                "/verify/transaction",
                axum::routing::post(routes::verify_transaction),
            )
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .with_state(Arc::new(self.gateway));

        let server = axum::Server::bind(&self.addr).serve(app.into_make_service());
        if let Some(bind) = bind {
            let _ = bind.send(server.local_addr());
        }

        server.with_graceful_shutdown(shutdown).await
    }
}
