use crate::entities::user;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl UserRepository<'static> {
    pub fn new() -> Self {
        Self {
            db: DATABASE_CONNECTION
                .get()
                .expect("DATABASE_CONNECTION not set"),
        }
    }
}

impl<'a> UserRepository<'a> {
    pub fn with_connection(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn get_connection(&self) -> &'a DatabaseConnection {
        self.db
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<user::Model>> {
        let user = user::Entity::find_by_id(user_id).one(self.db).await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db)
            .await?;
        Ok(user)
    }

    pub async fn find_by_ids(&self, user_ids: Vec<i32>) -> Result<Vec<user::Model>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(self.db)
            .await?;
        Ok(users)
    }

    /// Insert a user; `password_hash` must already be a bcrypt hash
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        username: &str,
        password_hash: String,
        first_name: &str,
        last_name: &str,
        is_staff: bool,
    ) -> Result<user::Model> {
        let user_model = user::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password_hash),
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            is_staff: Set(is_staff),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let result = user_model.insert(conn).await?;
        Ok(result)
    }
}
