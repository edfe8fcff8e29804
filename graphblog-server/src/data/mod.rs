pub(crate) mod image_store;
pub(crate) mod post_repository;
pub(crate) mod repositories;
pub(crate) mod storage;
pub(crate) mod user_repository;
