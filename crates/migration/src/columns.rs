//! Column shapes every resource table shares.

use sea_orm_migration::prelude::*;

/// Autoincrement integer primary key.
pub(crate) fn id<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// Unix milliseconds.
pub(crate) fn timestamp<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column).big_integer().not_null().to_owned()
}
