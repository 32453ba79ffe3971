//! Breath of the Wild reference tables. Rows are global and unique by name,
//! compared case-insensitively.

pub mod critters;
pub mod effects;
pub mod elixirs;
pub mod foods;
pub mod images;
pub mod ingredients;
pub mod monster_parts;
pub mod other_foods;

pub use critters::Critters;
pub use effects::Effects;
pub use elixirs::Elixirs;
pub use foods::{CookingPotFoods, FrozenFoods, RoastedFoods};
pub use images::Images;
pub use ingredients::Ingredients;
pub use monster_parts::MonsterParts;
pub use other_foods::OtherFoods;

use sea_orm::{Condition, sea_query::Expr};

pub(crate) fn name_scope(name: &str) -> Condition {
    Condition::all().add(Expr::cust("LOWER(name)").eq(name.trim().to_lowercase()))
}
