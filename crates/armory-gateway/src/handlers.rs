mod health;
mod item;

pub use health::health_handler;
pub use item::{
    create_item_handler, delete_item_handler, get_item_handler, list_items_handler,
    update_item_handler,
};
