// Infrastructure module - background task tracking, reconnection budget, endpoints
pub mod endpoint;
pub mod task_manager;
pub mod timer;

pub use endpoint::{page_origin, socket_endpoint};
pub use task_manager::TaskManager;
pub use timer::ReconnectPolicy;
