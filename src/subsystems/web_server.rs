use std::net::SocketAddr;

use async_trait::async_trait;
use axum::{
    Json,
    extract::State,
    routing::{get, post, put},
};
use futures::FutureExt;
use tokio::select;
use tokio_graceful_shutdown::{IntoSubsystem, SubsystemHandle};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{AppState, domain, infra::ClientError};

pub struct WebServer {
    state: AppState,
}

impl WebServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl IntoSubsystem<anyhow::Error> for WebServer {
    async fn run(self, subsys: SubsystemHandle) -> Result<(), anyhow::Error> {
        let address = self.state.settings.application.address();
        let socket_addr: SocketAddr = address.parse()
            .inspect_err(|e| error!("Could not parse server address {address}.\nCheck application host and port in configuration settings.\nFailed with {e}"))?;

        let router = axum::Router::new()
            // Catalog
            .route("/products", get(domain::catalog::browse_endpoint))
            .route(
                "/products/{product_id}",
                get(domain::catalog::product_detail_endpoint),
            )
            .route(
                "/products/{product_id}/reviews",
                post(domain::reviews::submit_review_endpoint),
            )
            // Admin product management
            .route(
                "/admin/products",
                post(domain::catalog::create_product_endpoint),
            )
            .route(
                "/admin/products/{product_id}",
                put(domain::catalog::update_product_endpoint)
                    .delete(domain::catalog::delete_product_endpoint),
            )
            // Cart
            .route("/cart", get(domain::cart::cart_endpoint))
            .route(
                "/addtocart/{product_id}",
                post(domain::cart::add_to_cart_endpoint),
            )
            .route(
                "/updatecart/{item_id}",
                post(domain::cart::update_cart_endpoint),
            )
            .route(
                "/removefromcart/{item_id}",
                post(domain::cart::remove_from_cart_endpoint),
            )
            // Checkout
            .route("/checkout", post(domain::checkout::checkout_endpoint))
            .route(
                "/checkout/success",
                get(domain::checkout::checkout_success_endpoint),
            )
            .route(
                "/checkout/cancel",
                get(domain::checkout::checkout_cancel_endpoint),
            )
            // Orders
            .route("/orders", get(domain::orders::orders_endpoint))
            .route(
                "/orders/{order_id}",
                get(domain::orders::order_detail_endpoint),
            )
            // Wishlist
            .route("/wishlist", get(domain::wishlist::wishlist_endpoint))
            .route(
                "/addtowishlist/{product_id}",
                post(domain::wishlist::add_to_wishlist_endpoint),
            )
            .route(
                "/removefromwishlist/{product_id}",
                post(domain::wishlist::remove_from_wishlist_endpoint),
            )
            // Profile
            .route(
                "/profile",
                get(domain::profile::profile_endpoint)
                    .post(domain::profile::update_profile_endpoint),
            )
            // Auth
            .route("/register", post(domain::auth::register_endpoint))
            .route("/login", post(domain::auth::login_endpoint))
            .route("/logout", post(domain::auth::logout_endpoint))
            .route("/healthcheck", get(health_check_endpoint))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);

        let listener = tokio::net::TcpListener::bind(socket_addr)
            .await
            .inspect_err(|e| {
                error!("Could not bind socket address {socket_addr}. Failed with {e}")
            })?;

        info!("Web server starting on http://{socket_addr}");
        select!(
            result = axum::serve(listener, router.into_make_service()).into_future().map(|result| result.map_err(anyhow::Error::new)) => {
                error!("Web server completed with {result:?}");
            }
            _ = subsys.on_shutdown_requested() => {
                info!("Web server shutdown");
            }
        );
        Ok(())
    }
}

pub async fn health_check_endpoint(
    State(_app_state): State<AppState>,
) -> Result<Json<String>, ClientError> {
    Ok(Json("Ok".to_owned()))
}
