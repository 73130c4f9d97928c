pub mod cli_args;
pub mod error;
mod extractor;
pub mod inventory;
mod middleware;
mod pretty_json;
mod route;
pub mod server;
mod state;
mod traits;
