pub mod router;
pub mod types;
pub mod handlers {
    pub mod admin;
    pub mod common;
    pub mod dashboards;
    pub mod doctors;
    pub mod health;
    pub mod questions;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
