//! Service overrides and lifecycle hooks carried by an entity configuration.

use crate::client::ApiClient;
use crate::config::types::Payload;
use crate::error::ApiError;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

/// Names under which a custom method shadows a standard operation.
pub const GET_LIST_METHOD: &str = "getList";
pub const GET_ONE_METHOD: &str = "getOne";
pub const CREATE_METHOD: &str = "create";
pub const UPDATE_METHOD: &str = "update";
pub const DELETE_METHOD: &str = "delete";

pub type ResponseMapper<T> = Arc<dyn Fn(Value) -> Result<T, ApiError> + Send + Sync>;
pub type RequestMapper = Arc<dyn Fn(Payload) -> Value + Send + Sync>;
pub type CreateOverride<T> =
    Arc<dyn Fn(ApiClient, Payload, Option<String>) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;
pub type UpdateOverride<T> =
    Arc<dyn Fn(ApiClient, String, Payload, Option<String>) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;
pub type DeleteOverride =
    Arc<dyn Fn(ApiClient, String, Option<String>) -> BoxFuture<'static, Result<(), ApiError>> + Send + Sync>;
/// Arbitrary named async operation. Arguments and result are raw JSON.
pub type CustomMethod = Arc<dyn Fn(ApiClient, Value) -> BoxFuture<'static, Result<Value, ApiError>> + Send + Sync>;

pub type BeforeCreate = Arc<dyn Fn(Payload) -> BoxFuture<'static, Result<Payload, ApiError>> + Send + Sync>;
pub type BeforeUpdate = Arc<dyn Fn(String, Payload) -> BoxFuture<'static, Result<Payload, ApiError>> + Send + Sync>;
/// Receives the saved entity and hands it back (possibly changed).
pub type AfterSave<T> = Arc<dyn Fn(T) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;
/// `Ok(false)` cancels the delete.
pub type BeforeDelete = Arc<dyn Fn(String) -> BoxFuture<'static, Result<bool, ApiError>> + Send + Sync>;
pub type AfterDelete = Arc<dyn Fn(String) -> BoxFuture<'static, Result<(), ApiError>> + Send + Sync>;

pub struct ServiceOverrides<T> {
    pub map_response: Option<ResponseMapper<T>>,
    pub map_request: Option<RequestMapper>,
    pub create: Option<CreateOverride<T>>,
    pub update: Option<UpdateOverride<T>>,
    pub delete: Option<DeleteOverride>,
    pub custom_methods: BTreeMap<String, CustomMethod>,
}

impl<T> Default for ServiceOverrides<T> {
    fn default() -> Self {
        ServiceOverrides {
            map_response: None,
            map_request: None,
            create: None,
            update: None,
            delete: None,
            custom_methods: BTreeMap::new(),
        }
    }
}

impl<T: 'static> ServiceOverrides<T> {
    pub fn map_response<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Result<T, ApiError> + Send + Sync + 'static,
    {
        self.map_response = Some(Arc::new(f));
        self
    }

    pub fn map_request<F>(mut self, f: F) -> Self
    where
        F: Fn(Payload) -> Value + Send + Sync + 'static,
    {
        self.map_request = Some(Arc::new(f));
        self
    }

    pub fn create<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(ApiClient, Payload, Option<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        self.create = Some(Arc::new(move |c, p, t| f(c, p, t).boxed()));
        self
    }

    pub fn update<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(ApiClient, String, Payload, Option<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        self.update = Some(Arc::new(move |c, id, p, t| f(c, id, p, t).boxed()));
        self
    }

    pub fn delete<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(ApiClient, String, Option<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ApiError>> + Send + 'static,
    {
        self.delete = Some(Arc::new(move |c, id, t| f(c, id, t).boxed()));
        self
    }

    pub fn custom_method<F, Fut>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(ApiClient, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ApiError>> + Send + 'static,
    {
        self.custom_methods
            .insert(name.into(), Arc::new(move |c, args| f(c, args).boxed()));
        self
    }
}

pub struct Hooks<T> {
    pub before_create: Option<BeforeCreate>,
    pub after_create: Option<AfterSave<T>>,
    pub before_update: Option<BeforeUpdate>,
    pub after_update: Option<AfterSave<T>>,
    pub before_delete: Option<BeforeDelete>,
    pub after_delete: Option<AfterDelete>,
}

impl<T> Default for Hooks<T> {
    fn default() -> Self {
        Hooks {
            before_create: None,
            after_create: None,
            before_update: None,
            after_update: None,
            before_delete: None,
            after_delete: None,
        }
    }
}

impl<T: 'static> Hooks<T> {
    pub fn before_create<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Payload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Payload, ApiError>> + Send + 'static,
    {
        self.before_create = Some(Arc::new(move |p| f(p).boxed()));
        self
    }

    pub fn after_create<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        self.after_create = Some(Arc::new(move |e| f(e).boxed()));
        self
    }

    pub fn before_update<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(String, Payload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Payload, ApiError>> + Send + 'static,
    {
        self.before_update = Some(Arc::new(move |id, p| f(id, p).boxed()));
        self
    }

    pub fn after_update<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        self.after_update = Some(Arc::new(move |e| f(e).boxed()));
        self
    }

    pub fn before_delete<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, ApiError>> + Send + 'static,
    {
        self.before_delete = Some(Arc::new(move |id| f(id).boxed()));
        self
    }

    pub fn after_delete<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ApiError>> + Send + 'static,
    {
        self.after_delete = Some(Arc::new(move |id| f(id).boxed()));
        self
    }
}
