pub mod rest;
pub mod state;

// Re-export the handlers so the binary that builds the router can reach
// them without digging through submodules.
pub use rest::{
    create_resource_handler, delete_resource_handler, generate_handler, list_resources_handler,
    update_resource_handler, upload_asset_handler,
};
