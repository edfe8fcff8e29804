use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use super::{
    POSTS_COLLECTION, from_bson_datetime, map_db_error, parse_object_id, to_bson_datetime,
};
use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct MongoPostRepository {
    posts: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub(crate) fn new(db: &Database) -> Self {
        Self {
            posts: db.collection(POSTS_COLLECTION),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    content: String,
    image_url: String,
    creator: ObjectId,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl TryFrom<PostDocument> for Post {
    type Error = DomainError;

    fn try_from(document: PostDocument) -> Result<Self, Self::Error> {
        Ok(Post {
            id: document.id.to_hex(),
            title: document.title,
            content: document.content,
            image_url: document.image_url,
            creator_id: document.creator.to_hex(),
            created_at: from_bson_datetime(document.created_at)?,
            updated_at: from_bson_datetime(document.updated_at)?,
        })
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let creator = parse_object_id(&input.creator_id).ok_or(DomainError::InvalidUser)?;
        let now = to_bson_datetime(Utc::now());
        let document = PostDocument {
            id: ObjectId::new(),
            title: input.title,
            content: input.content,
            image_url: input.image_url,
            creator,
            created_at: now,
            updated_at: now,
        };

        self.posts
            .insert_one(&document)
            .await
            .map_err(map_db_error)?;

        Post::try_from(document)
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(None);
        };

        self.posts
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_db_error)?
            .map(Post::try_from)
            .transpose()
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError> {
        let documents: Vec<PostDocument> = self
            .posts
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .skip(pagination.skip())
            .limit(i64::from(pagination.page_size))
            .await
            .map_err(map_db_error)?
            .try_collect()
            .await
            .map_err(map_db_error)?;

        documents.into_iter().map(Post::try_from).collect()
    }

    async fn total_posts(&self) -> Result<u64, DomainError> {
        self.posts
            .count_documents(doc! {})
            .await
            .map_err(map_db_error)
    }

    async fn get_posts_by_ids(&self, ids: &[String]) -> Result<Vec<Post>, DomainError> {
        let oids: Vec<ObjectId> = ids.iter().filter_map(|id| parse_object_id(id)).collect();
        if oids.is_empty() {
            return Ok(Vec::new());
        }

        let documents: Vec<PostDocument> = self
            .posts
            .find(doc! { "_id": { "$in": oids } })
            .await
            .map_err(map_db_error)?
            .try_collect()
            .await
            .map_err(map_db_error)?;

        let mut posts = documents
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        // $in ignores the order of the id list
        posts.sort_by_key(|post| ids.iter().position(|id| *id == post.id));
        Ok(posts)
    }

    async fn update_post(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(None);
        };

        let mut set = doc! {
            "title": patch.title,
            "content": patch.content,
            "updatedAt": to_bson_datetime(Utc::now()),
        };
        if let Some(image_url) = patch.image_url {
            set.insert("imageUrl", image_url);
        }

        self.posts
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_db_error)?
            .map(Post::try_from)
            .transpose()
    }

    async fn delete_post(&self, id: &str) -> Result<bool, DomainError> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(false);
        };

        let result = self
            .posts
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(map_db_error)?;

        Ok(result.deleted_count > 0)
    }
}
