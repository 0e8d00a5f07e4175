pub mod types;
pub mod form;
pub mod view;
pub mod service;
pub mod validator;

pub use types::*;
pub use form::*;
pub use view::*;
pub use service::*;
pub use validator::*;
