//! The contract every CRUD-able table implements.
//!
//! A [`Resource`] is a marker type tying together the wire item clients see
//! (`Item`, from `api_types`) and the sea-orm entity that stores it. The
//! generic [`Service`](crate::Service) only talks to tables through this
//! trait.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, DatabaseTransaction, FromQueryResult,
    IntoActiveModel, prelude::*,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::ResultEngine;

pub type ColumnOf<R> = <<R as Resource>::Entity as EntityTrait>::Column;

pub trait Resource: Send + Sync + Sized + 'static {
    type Item: Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Model: IntoActiveModel<Self::ActiveModel>
        + FromQueryResult
        + ModelTrait<Entity = Self::Entity>
        + Send
        + Sync;
    type Entity: EntityTrait<Model = Self::Model>;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + Sync;

    /// Base path of the router and name of the seed fixture.
    const NAME: &'static str;

    fn id(item: &Self::Item) -> Option<i32>;

    fn from_model(model: Self::Model) -> ResultEngine<Self::Item>;

    /// Data columns only. Id and timestamps are left `NotSet`; the service
    /// fills them in.
    fn to_active_model(item: &Self::Item) -> ResultEngine<Self::ActiveModel>;

    fn id_column() -> ColumnOf<Self>;

    fn date_created_column() -> ColumnOf<Self>;

    fn date_updated_column() -> ColumnOf<Self>;

    /// Column matched by `GET /<name>/{key}`.
    fn get_column() -> ColumnOf<Self> {
        Self::id_column()
    }

    /// Column matched by `DELETE /<name>/{key}`. Every matching row goes.
    fn delete_column() -> ColumnOf<Self> {
        Self::get_column()
    }

    /// Set for tables whose rows belong to a single user.
    fn owner_column() -> Option<ColumnOf<Self>> {
        None
    }

    fn set_owner(_item: &mut Self::Item, _owner: &str) {}

    fn owner_of(_item: &Self::Item) -> Option<&str> {
        None
    }

    fn validate(_item: &Self::Item) -> ResultEngine<()> {
        Ok(())
    }

    /// Rows `item` points at must exist and share its owner. Runs inside the
    /// write transaction, after [`validate`](Resource::validate).
    fn check_references(
        _item: &Self::Item,
        _tx: &DatabaseTransaction,
    ) -> impl Future<Output = ResultEngine<()>> + Send {
        async { Ok(()) }
    }

    /// Rows a new value could collide with. `None` skips the conflict scan.
    fn conflict_scope(_item: &Self::Item) -> Option<Condition> {
        None
    }

    /// Whether `item` collides with `existing`, a row from [`conflict_scope`].
    ///
    /// [`conflict_scope`]: Resource::conflict_scope
    fn conflicts(_item: &Self::Item, _existing: &Self::Item) -> bool {
        true
    }
}
