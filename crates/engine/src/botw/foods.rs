//! Cooking-pot, roasted and frozen foods. Three tables, one [`Food`] shape.

use api_types::botw::Food;

macro_rules! food_table {
    ($module:ident, $table:literal, $marker:ident, $name:literal) => {
        pub mod $module {
            use api_types::botw::Food;
            use sea_orm::{ActiveValue, Condition, entity::prelude::*};

            use crate::{
                ResultEngine,
                botw::{foods::validate_food, name_scope},
                resource::Resource,
                util::{from_json, to_json},
            };

            #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
            #[sea_orm(table_name = $table)]
            pub struct Model {
                #[sea_orm(primary_key)]
                pub id: i32,
                pub name: String,
                pub image: Option<String>,
                pub hearts: Option<f64>,
                pub effect: Option<String>,
                pub description: String,
                pub ingredients: Json,
                pub date_created: i64,
                pub date_updated: i64,
            }

            #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
            pub enum Relation {}

            impl ActiveModelBehavior for ActiveModel {}

            pub struct $marker;

            impl Resource for $marker {
                type Item = Food;
                type Model = Model;
                type Entity = Entity;
                type ActiveModel = ActiveModel;

                const NAME: &'static str = $name;

                fn id(item: &Food) -> Option<i32> {
                    item.id
                }

                fn from_model(model: Model) -> ResultEngine<Food> {
                    Ok(Food {
                        id: Some(model.id),
                        name: model.name,
                        image: model.image,
                        hearts: model.hearts,
                        effect: model.effect,
                        description: model.description,
                        ingredients: from_json(model.ingredients)?,
                        date_created: model.date_created,
                        date_updated: model.date_updated,
                    })
                }

                fn to_active_model(item: &Food) -> ResultEngine<ActiveModel> {
                    Ok(ActiveModel {
                        name: ActiveValue::Set(item.name.trim().to_string()),
                        image: ActiveValue::Set(item.image.clone()),
                        hearts: ActiveValue::Set(item.hearts),
                        effect: ActiveValue::Set(item.effect.clone()),
                        description: ActiveValue::Set(item.description.clone()),
                        ingredients: ActiveValue::Set(to_json(&item.ingredients)?),
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

                fn validate(item: &Food) -> ResultEngine<()> {
                    validate_food(item)
                }

                fn conflict_scope(item: &Food) -> Option<Condition> {
                    Some(name_scope(&item.name))
                }
            }
        }
    };
}

food_table!(cooking_pot, "cooking_pot_foods", CookingPotFoods, "cookingPotFoods");
food_table!(roasted, "roasted_foods", RoastedFoods, "roastedFoods");
food_table!(frozen, "frozen_foods", FrozenFoods, "frozenFoods");

pub use cooking_pot::CookingPotFoods;
pub use frozen::FrozenFoods;
pub use roasted::RoastedFoods;

use crate::{ResultEngine, botw::ingredients::validate_hearts, util::require_name};

pub(crate) fn validate_food(item: &Food) -> ResultEngine<()> {
    require_name(&item.name, "food")?;
    validate_hearts(item.hearts)
}
