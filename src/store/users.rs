use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};

use crate::entity::user::{self, ActiveModel as UserActiveModel, Entity as UserEntity};
use crate::error::Result;
use crate::password;

/// A registered user as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password_hash: String,
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            username: model.username,
            password_hash: model.password_hash,
        }
    }
}

/// Outcome of [`UserStore::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewUser {
    Created,
    UsernameTaken,
}

/// Access to the `users` table.
#[derive(Debug, Clone)]
pub struct UserStore {
    conn: DatabaseConnection,
}

impl UserStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Looks a user up by exact name.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let model = UserEntity::find_by_id(username.to_owned())
            .one(&self.conn)
            .await?;
        Ok(model.map(User::from))
    }

    /// Inserts the user unless the name is already registered.
    ///
    /// The check and the insert are a single statement, so two concurrent
    /// signups for the same name cannot both succeed.
    pub async fn create(&self, username: &str, password: &str) -> Result<NewUser> {
        let model = UserActiveModel {
            username: Set(username.to_owned()),
            password_hash: Set(password::hash_password(password)?),
        };

        let inserted = UserEntity::insert(model)
            .on_conflict(
                OnConflict::column(user::Column::Username)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await;

        match inserted {
            Ok(0) | Err(DbErr::RecordNotInserted) => {
                tracing::debug!(username, "signup rejected, username taken");
                Ok(NewUser::UsernameTaken)
            }
            Ok(_) => {
                tracing::info!(username, "created user");
                Ok(NewUser::Created)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Checks a username/password pair. Unknown users simply fail.
    pub async fn verify(&self, username: &str, password: &str) -> Result<bool> {
        match self.find_by_username(username).await? {
            Some(user) => password::verify_password(password, &user.password_hash),
            None => Ok(false),
        }
    }

    /// Removes every user. Returns the number of rows deleted.
    pub async fn delete_all(&self) -> Result<u64> {
        let result = UserEntity::delete_many().exec(&self.conn).await?;
        Ok(result.rows_affected)
    }
}
