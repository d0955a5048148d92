pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod sync;
pub mod tui;
pub mod utils;

pub use api::ApiClient;
pub use config::Config;
pub use models::{Priority, Status, Task};
pub use utils::Profile;
