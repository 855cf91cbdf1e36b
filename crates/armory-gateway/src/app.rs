use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_item_handler, delete_item_handler, get_item_handler, health_handler,
    list_items_handler, update_item_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/api/v1",
                Router::new()
                    .route("/item", get(list_items_handler).post(create_item_handler))
                    .route(
                        "/item/{id}",
                        get(get_item_handler)
                            .put(update_item_handler)
                            .delete(delete_item_handler),
                    ),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
