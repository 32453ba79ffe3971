use api_types::user::{Account, AccountUpdate, SignUp};
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, password, users, util::now_millis};

use super::{Engine, with_tx};

impl Engine {
    /// Create a user and return its account.
    ///
    /// The username is stored trimmed. The password is hashed with Argon2id
    /// exactly as sent.
    pub async fn sign_up(&self, request: SignUp) -> ResultEngine<Account> {
        let username = required(request.username.as_deref(), "username")?.trim();
        let plain = required(request.password.as_deref(), "password")?;
        let hashed = password::hash_blocking(plain.to_string()).await?;

        with_tx!(self, |db_tx| {
            let exists = users::Entity::find()
                .filter(users::Column::Username.eq(username))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(username.to_string()));
            }

            let now = now_millis();
            let model = users::ActiveModel {
                id: ActiveValue::NotSet,
                uuid: ActiveValue::Set(Uuid::new_v4().to_string()),
                username: ActiveValue::Set(username.to_string()),
                password: ActiveValue::Set(hashed),
                name: ActiveValue::Set(request.name.clone()),
                email: ActiveValue::Set(request.email.clone()),
                photo_url: ActiveValue::Set(request.photo_url.clone()),
                date_created: ActiveValue::Set(now),
                date_updated: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(username, "user signed up");
            account_from_model(model)
        })
    }

    /// Check credentials. Unknown users and wrong passwords fail the same way.
    pub async fn login(&self, username: &str, plain: &str) -> ResultEngine<Account> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username.trim()))
            .one(&self.database)
            .await?
            .ok_or(EngineError::InvalidCredentials)?;

        if !password::verify_blocking(plain.to_string(), model.password.clone()).await {
            tracing::debug!(username, "password mismatch");
            return Err(EngineError::InvalidCredentials);
        }
        account_from_model(model)
    }

    pub async fn account(&self, uuid: Uuid) -> ResultEngine<Account> {
        let model = self.user_by_uuid(uuid).await?;
        account_from_model(model)
    }

    /// Update profile fields of `uuid`. A `None` field is left unchanged; a
    /// new password is rehashed.
    pub async fn update_account(&self, uuid: Uuid, update: AccountUpdate) -> ResultEngine<Account> {
        let model = self.user_by_uuid(uuid).await?;

        let mut active: users::ActiveModel = model.into();
        if let Some(name) = update.name {
            active.name = ActiveValue::Set(Some(name));
        }
        if let Some(email) = update.email {
            active.email = ActiveValue::Set(Some(email));
        }
        if let Some(photo_url) = update.photo_url {
            active.photo_url = ActiveValue::Set(Some(photo_url));
        }
        if let Some(plain) = update.password.as_deref() {
            let plain = required(Some(plain), "password")?;
            active.password = ActiveValue::Set(password::hash_blocking(plain.to_string()).await?);
        }
        active.date_updated = ActiveValue::Set(now_millis());

        let model = active.update(&self.database).await?;
        account_from_model(model)
    }

    async fn user_by_uuid(&self, uuid: Uuid) -> ResultEngine<users::Model> {
        users::Entity::find()
            .filter(users::Column::Uuid.eq(uuid.to_string()))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {uuid}")))
    }
}

/// `value` untouched, unless it is missing or only whitespace.
fn required<'a>(value: Option<&'a str>, label: &str) -> ResultEngine<&'a str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(EngineError::InvalidField(format!("{label} must not be empty"))),
    }
}

fn account_from_model(model: users::Model) -> ResultEngine<Account> {
    let uuid = Uuid::parse_str(&model.uuid)
        .map_err(|err| EngineError::InvalidField(format!("stored user uuid: {err}")))?;
    Ok(Account {
        id: model.id,
        uuid,
        username: model.username,
        name: model.name,
        email: model.email,
        photo_url: model.photo_url,
        date_created: model.date_created,
        date_updated: model.date_updated,
    })
}
