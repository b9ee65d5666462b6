mod error;
mod genre;
mod health;

pub use self::{
    error::{ErrorResponse, ErrorType},
    genre::GenrePlays,
    health::{HealthStatus, ServiceStatus},
};
