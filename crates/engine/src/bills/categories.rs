//! Bill categories, owned per user.

use api_types::bills::Category;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{
    ResultEngine,
    resource::Resource,
    util::{name_key, require_name},
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner: String,
    pub name: String,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct Categories;

impl Resource for Categories {
    type Item = Category;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "categories";

    fn id(item: &Category) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<Category> {
        Ok(Category {
            id: Some(model.id),
            owner: model.owner,
            name: model.name,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &Category) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            owner: ActiveValue::Set(item.owner.clone()),
            name: ActiveValue::Set(item.name.trim().to_string()),
            ..Default::default()
        })
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn date_created_column() -> Column {
        Column::DateCreated
    }

    fn date_updated_column() -> Column {
        Column::DateUpdated
    }

    fn owner_column() -> Option<Column> {
        Some(Column::Owner)
    }

    fn set_owner(item: &mut Category, owner: &str) {
        item.owner = owner.to_string();
    }

    fn owner_of(item: &Category) -> Option<&str> {
        Some(&item.owner)
    }

    fn validate(item: &Category) -> ResultEngine<()> {
        require_name(&item.name, "category")
    }

    fn conflict_scope(item: &Category) -> Option<Condition> {
        Some(Condition::all().add(Column::Owner.eq(item.owner.as_str())))
    }

    fn conflicts(item: &Category, existing: &Category) -> bool {
        name_key(&item.name) == name_key(&existing.name)
    }
}
