use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use super::{USERS_COLLECTION, is_duplicate_key, map_db_error, parse_object_id};
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{DEFAULT_USER_STATUS, User};

#[derive(Debug, Clone)]
pub(crate) struct MongoUserRepository {
    users: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub(crate) fn new(db: &Database) -> Self {
        Self {
            users: db.collection(USERS_COLLECTION),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    email: String,
    name: String,
    password: String,
    status: String,
    #[serde(default)]
    posts: Vec<ObjectId>,
}

impl From<UserDocument> for UserCredentials {
    fn from(document: UserDocument) -> Self {
        Self {
            user: User {
                id: document.id.to_hex(),
                name: document.name,
                email: document.email,
                status: document.status,
                post_ids: document.posts.iter().map(|id| id.to_hex()).collect(),
            },
            password_hash: document.password,
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let document = UserDocument {
            id: ObjectId::new(),
            email: input.email,
            name: input.name,
            password: input.password_hash,
            status: DEFAULT_USER_STATUS.to_string(),
            posts: Vec::new(),
        };

        self.users.insert_one(&document).await.map_err(|err| {
            if is_duplicate_key(&err) {
                DomainError::AlreadyExists
            } else {
                map_db_error(err)
            }
        })?;

        Ok(UserCredentials::from(document).user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let document = self
            .users
            .find_one(doc! { "email": email })
            .await
            .map_err(map_db_error)?;

        Ok(document.map(UserCredentials::from))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(None);
        };

        let document = self
            .users
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_db_error)?;

        Ok(document.map(|d| UserCredentials::from(d).user))
    }

    async fn push_post(&self, user_id: &str, post_id: &str) -> Result<bool, DomainError> {
        let (Some(user_oid), Some(post_oid)) = (parse_object_id(user_id), parse_object_id(post_id))
        else {
            return Ok(false);
        };

        let result = self
            .users
            .update_one(
                doc! { "_id": user_oid },
                doc! { "$push": { "posts": post_oid } },
            )
            .await
            .map_err(map_db_error)?;

        Ok(result.matched_count > 0)
    }

    async fn pull_post(&self, user_id: &str, post_id: &str) -> Result<bool, DomainError> {
        let (Some(user_oid), Some(post_oid)) = (parse_object_id(user_id), parse_object_id(post_id))
        else {
            return Ok(false);
        };

        let result = self
            .users
            .update_one(
                doc! { "_id": user_oid },
                doc! { "$pull": { "posts": post_oid } },
            )
            .await
            .map_err(map_db_error)?;

        Ok(result.matched_count > 0)
    }
}
