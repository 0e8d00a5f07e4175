//! OGS CRUD: configuration-driven service layer for the OGS administration API.

pub mod auth;
pub mod client;
pub mod config;
pub mod entities;
pub mod error;
pub mod lookup;
pub mod mapping;
pub mod query;
pub mod response;
pub mod service;
pub mod settings;

pub use auth::{SessionFn, StaticToken, TokenProvider};
pub use client::ApiClient;
pub use config::{validate, EntityConfig, Payload};
pub use error::{ApiError, ConfigError};
pub use response::{PaginatedResponse, Pagination};
pub use service::{create_crud_service, create_extended_service, CrudApi, CrudService, ExtendedService};
pub use settings::ClientSettings;
