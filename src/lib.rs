// Library exports for testing
pub mod config;
pub mod confidence;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;
pub mod session;
pub mod sink;
pub mod validation;
pub mod visual;

pub use crate::config::*;
pub use crate::confidence::*;
pub use crate::error::*;
pub use crate::handlers::*;
pub use crate::models::*;
pub use crate::service::*;
pub use crate::session::*;
pub use crate::sink::*;
pub use crate::validation::*;
pub use crate::visual::*;
