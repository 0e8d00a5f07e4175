//! CrudService: generic CRUD over the REST API, plus the extended wrapper.

mod crud;
mod extended;
pub use crud::{create_crud_service, CrudApi, CrudService};
pub use extended::{create_extended_service, ExtendedService};
