//! Base CRUD service plus the entity's named custom methods.

use crate::client::ApiClient;
use crate::config::{
    CustomMethod, EntityConfig, Payload, CREATE_METHOD, DELETE_METHOD, GET_LIST_METHOD, GET_ONE_METHOD,
    UPDATE_METHOD,
};
use crate::error::ApiError;
use crate::response::PaginatedResponse;
use crate::service::crud::{CrudApi, CrudService};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Custom methods that share a name with a standard operation. They win over the base.
#[derive(Clone, Default)]
struct Shadows {
    get_list: Option<CustomMethod>,
    get_one: Option<CustomMethod>,
    create: Option<CustomMethod>,
    update: Option<CustomMethod>,
    delete: Option<CustomMethod>,
}

impl Shadows {
    fn from_methods(methods: &BTreeMap<String, CustomMethod>) -> Self {
        Shadows {
            get_list: methods.get(GET_LIST_METHOD).cloned(),
            get_one: methods.get(GET_ONE_METHOD).cloned(),
            create: methods.get(CREATE_METHOD).cloned(),
            update: methods.get(UPDATE_METHOD).cloned(),
            delete: methods.get(DELETE_METHOD).cloned(),
        }
    }
}

pub struct ExtendedService<T> {
    base: CrudService<T>,
    methods: BTreeMap<String, CustomMethod>,
    shadows: Shadows,
}

impl<T> Clone for ExtendedService<T> {
    fn clone(&self) -> Self {
        ExtendedService {
            base: self.base.clone(),
            methods: self.methods.clone(),
            shadows: self.shadows.clone(),
        }
    }
}

/// Build the CRUD service and attach `service.custom_methods`. A custom method
/// named `getList`, `getOne`, `create`, `update` or `delete` replaces that operation
/// (hooks and mappers do not run for it). Without custom methods every call goes to
/// the base service unchanged.
pub fn create_extended_service<T>(config: impl Into<Arc<EntityConfig<T>>>, client: ApiClient) -> ExtendedService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    ExtendedService::new(CrudService::new(config.into(), client))
}

impl<T> ExtendedService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(base: CrudService<T>) -> Self {
        let methods = base.config().service.custom_methods.clone();
        let shadows = Shadows::from_methods(&methods);
        ExtendedService { base, methods, shadows }
    }

    pub fn base(&self) -> &CrudService<T> {
        &self.base
    }

    pub fn into_base(self) -> CrudService<T> {
        self.base
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Invoke a custom method by name with raw JSON arguments.
    pub async fn call(&self, name: &str, args: Value) -> Result<Value, ApiError> {
        let method = self
            .methods
            .get(name)
            .ok_or_else(|| ApiError::UnknownMethod(name.to_string()))?;
        let result = method(self.base.client().clone(), args).await;
        if let Err(e) = &result {
            tracing::error!(entity = %self.base.config().name.plural, method = %name, error = %e, "custom method failed");
        }
        result
    }

    /// Like [`call`](Self::call), decoding the result.
    pub async fn call_as<R: DeserializeOwned>(&self, name: &str, args: Value) -> Result<R, ApiError> {
        let v = self.call(name, args).await?;
        Ok(serde_json::from_value(v)?)
    }

    async fn call_shadow<R: DeserializeOwned>(&self, method: &CustomMethod, args: Value) -> Result<R, ApiError> {
        let v = method(self.base.client().clone(), args).await?;
        Ok(serde_json::from_value(v)?)
    }

    pub async fn get_list(&self, filters: &[(String, Value)]) -> Result<PaginatedResponse<T>, ApiError> {
        match &self.shadows.get_list {
            Some(m) => {
                let args: Map<String, Value> = filters.iter().cloned().collect();
                self.call_shadow(m, Value::Object(args)).await
            }
            None => self.base.get_list(filters).await,
        }
    }

    pub async fn get_one(&self, id: &str) -> Result<T, ApiError> {
        match &self.shadows.get_one {
            Some(m) => self.call_shadow(m, Value::String(id.to_string())).await,
            None => self.base.get_one(id).await,
        }
    }

    pub async fn create(&self, data: Payload) -> Result<T, ApiError> {
        match &self.shadows.create {
            Some(m) => self.call_shadow(m, Value::Object(data)).await,
            None => self.base.create(data).await,
        }
    }

    pub async fn update(&self, id: &str, data: Payload) -> Result<T, ApiError> {
        match &self.shadows.update {
            Some(m) => self.call_shadow(m, json!({ "id": id, "data": data })).await,
            None => self.base.update(id, data).await,
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        match &self.shadows.delete {
            Some(m) => {
                m(self.base.client().clone(), Value::String(id.to_string())).await?;
                Ok(())
            }
            None => self.base.delete(id).await,
        }
    }
}

#[async_trait]
impl<T> CrudApi<T> for ExtendedService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn get_list(&self, filters: &[(String, Value)]) -> Result<PaginatedResponse<T>, ApiError> {
        ExtendedService::get_list(self, filters).await
    }

    async fn get_one(&self, id: &str) -> Result<T, ApiError> {
        ExtendedService::get_one(self, id).await
    }

    async fn create(&self, data: Payload) -> Result<T, ApiError> {
        ExtendedService::create(self, data).await
    }

    async fn update(&self, id: &str, data: Payload) -> Result<T, ApiError> {
        ExtendedService::update(self, id, data).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        ExtendedService::delete(self, id).await
    }
}
