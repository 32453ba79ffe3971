//! Generic CRUD service over one [`Resource`] table.

use api_types::notification::{ChangeType, Notification};
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, QueryFilter, QueryOrder, Select, TransactionTrait,
    prelude::*,
};
use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    listeners::{ChangeListeners, Listener},
    ops::with_tx,
    resource::{ColumnOf, Resource},
    util::now_millis,
};

/// Outcome of [`Service::update`].
#[derive(Clone, Debug, PartialEq)]
pub enum Saved<T> {
    /// The item had no id and was inserted.
    Created(T),
    Updated(T),
}

impl<T> Saved<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Created(item) | Self::Updated(item) => item,
        }
    }
}

/// CRUD over one table.
///
/// Writes hold `writes` and run in a transaction, so the conflict scan and
/// the insert or update it guards see the same rows.
pub struct Service<R: Resource> {
    database: DatabaseConnection,
    writes: Mutex<()>,
    listeners: ChangeListeners<R::Item>,
}

impl<R: Resource> Service<R> {
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database,
            writes: Mutex::new(()),
            listeners: ChangeListeners::default(),
        }
    }

    pub async fn add_change_listener(&self, id: Uuid, listener: Listener<R::Item>) {
        self.listeners.add(id, listener).await;
    }

    pub async fn remove_change_listener(&self, id: Uuid) -> bool {
        self.listeners.remove(id).await
    }

    pub async fn change_listener_count(&self) -> usize {
        self.listeners.len().await
    }

    /// Register a fresh bounded listener under `id` and return its receiver.
    pub async fn subscribe(
        &self,
        id: Uuid,
        capacity: usize,
    ) -> mpsc::Receiver<Notification<R::Item>> {
        let (tx, rx) = mpsc::channel(capacity);
        self.add_change_listener(id, tx).await;
        rx
    }

    /// Every row visible to `owner`, ordered by id.
    pub async fn get_all(&self, owner: &str) -> ResultEngine<Vec<R::Item>> {
        let mut query = R::Entity::find().order_by_asc(R::id_column());
        if let Some(column) = R::owner_column() {
            query = query.filter(column.eq(owner));
        }

        query
            .all(&self.database)
            .await?
            .into_iter()
            .map(R::from_model)
            .collect()
    }

    /// First row (by id) whose get column equals `key`.
    pub async fn get_single(&self, key: i32, owner: &str) -> ResultEngine<R::Item> {
        let model = owned_query::<R>(R::get_column(), key, owner)
            .order_by_asc(R::id_column())
            .one(&self.database)
            .await?
            .ok_or_else(|| not_found::<R>(key))?;
        R::from_model(model)
    }

    pub async fn add(&self, mut item: R::Item, owner: &str) -> ResultEngine<R::Item> {
        R::set_owner(&mut item, owner);
        R::validate(&item)?;

        let _writes = self.writes.lock().await;
        let model = with_tx!(self, |db_tx| {
            R::check_references(&item, &db_tx).await?;
            ensure_no_conflict::<R>(&db_tx, &item, None).await?;

            let now = now_millis();
            let mut active = R::to_active_model(&item)?;
            active.not_set(R::id_column());
            active.set(R::date_created_column(), now.into());
            active.set(R::date_updated_column(), now.into());
            Ok::<_, EngineError>(active.insert(&db_tx).await?)
        })?;

        let stored = R::from_model(model)?;
        let id = stored_id::<R>(&stored)?;
        tracing::debug!(resource = R::NAME, id, "item created");

        self.listeners
            .notify(ChangeType::Create, id, Some(stored.clone()))
            .await;
        Ok(stored)
    }

    /// Update the item with `item.id`, or insert it when the id is missing.
    pub async fn update(&self, mut item: R::Item, owner: &str) -> ResultEngine<Saved<R::Item>> {
        let Some(id) = R::id(&item) else {
            return self.add(item, owner).await.map(Saved::Created);
        };

        R::set_owner(&mut item, owner);

        let _writes = self.writes.lock().await;
        let model = with_tx!(self, |db_tx| {
            if owned_query::<R>(R::id_column(), id, owner)
                .one(&db_tx)
                .await?
                .is_none()
            {
                return Err(not_found::<R>(id));
            }
            R::validate(&item)?;
            R::check_references(&item, &db_tx).await?;
            ensure_no_conflict::<R>(&db_tx, &item, Some(id)).await?;

            let mut active = R::to_active_model(&item)?;
            active.set(R::id_column(), id.into());
            active.not_set(R::date_created_column());
            active.set(R::date_updated_column(), now_millis().into());
            Ok::<_, EngineError>(active.update(&db_tx).await?)
        })?;

        let stored = R::from_model(model)?;
        tracing::debug!(resource = R::NAME, id, "item updated");

        self.listeners
            .notify(ChangeType::Update, id, Some(stored.clone()))
            .await;
        Ok(Saved::Updated(stored))
    }

    /// Delete every row whose delete column equals `key`.
    pub async fn delete(&self, key: i32, owner: &str) -> ResultEngine<()> {
        let _writes = self.writes.lock().await;
        let ids = with_tx!(self, |db_tx| {
            let ids = owned_query::<R>(R::delete_column(), key, owner)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|model| R::from_model(model).and_then(|item| stored_id::<R>(&item)))
                .collect::<ResultEngine<Vec<_>>>()?;
            if ids.is_empty() {
                return Err(not_found::<R>(key));
            }

            R::Entity::delete_many()
                .filter(R::id_column().is_in(ids.clone()))
                .exec(&db_tx)
                .await?;
            Ok::<_, EngineError>(ids)
        })?;

        for id in ids {
            tracing::debug!(resource = R::NAME, id, "item deleted");
            self.listeners.notify(ChangeType::Delete, id, None).await;
        }
        Ok(())
    }
}

fn owned_query<R: Resource>(column: ColumnOf<R>, key: i32, owner: &str) -> Select<R::Entity> {
    let mut query = R::Entity::find().filter(column.eq(key));
    if let Some(owner_column) = R::owner_column() {
        query = query.filter(owner_column.eq(owner));
    }
    query
}

async fn ensure_no_conflict<R: Resource>(
    db_tx: &DatabaseTransaction,
    item: &R::Item,
    skip_id: Option<i32>,
) -> ResultEngine<()> {
    let Some(scope) = R::conflict_scope(item) else {
        return Ok(());
    };

    let mut query = R::Entity::find().filter(scope);
    if let Some(id) = skip_id {
        query = query.filter(R::id_column().ne(id));
    }

    for model in query.all(db_tx).await? {
        let existing = R::from_model(model)?;
        if R::conflicts(item, &existing) {
            let existing_id = R::id(&existing).unwrap_or_default();
            return Err(EngineError::ExistingKey(format!(
                "{} {existing_id}",
                R::NAME
            )));
        }
    }
    Ok(())
}

fn not_found<R: Resource>(key: i32) -> EngineError {
    EngineError::KeyNotFound(format!("{} {key}", R::NAME))
}

fn stored_id<R: Resource>(item: &R::Item) -> ResultEngine<i32> {
    R::id(item).ok_or_else(|| EngineError::KeyNotFound(format!("{} id", R::NAME)))
}
