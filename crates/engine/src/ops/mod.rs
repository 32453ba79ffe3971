use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use sea_orm::DatabaseConnection;

use crate::{resource::Resource, service::Service};

mod seed;
mod users;

pub use seed::SeedReport;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

type ServiceRegistry = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    services: Mutex<ServiceRegistry>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The shared service for resource `R`.
    ///
    /// Every call returns the same instance, so listeners registered through
    /// one handle see writes made through another.
    pub fn service<R: Resource>(&self) -> Arc<Service<R>> {
        let mut services = self.services.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = services.entry(TypeId::of::<R>()).or_insert_with(|| {
            let service: Arc<dyn Any + Send + Sync> =
                Arc::new(Service::<R>::new(self.database.clone()));
            service
        });

        // Keyed by `TypeId`, so the downcast cannot miss.
        Arc::clone(entry)
            .downcast::<Service<R>>()
            .unwrap_or_else(|_| Arc::new(Service::new(self.database.clone())))
    }
}

#[derive(Debug, Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> Engine {
        Engine {
            database: self.database,
            services: Mutex::new(HashMap::new()),
        }
    }
}
