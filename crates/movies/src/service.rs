//! Validation in front of a [`MovieRepository`].
//!
//! Every check here runs before the repository is touched, so invalid input
//! never costs a database round trip.

use crate::error::StoreResult;
use crate::model::{Movie, MoviePatch};
use crate::store::MovieRepository;
use crate::validate::{parse_id, validate_id, validate_new, validate_patch};

#[derive(Debug, Clone)]
pub struct MovieService<R> {
    repo: R,
}

impl<R: MovieRepository> MovieService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<Movie> {
        validate_id(id)?;
        self.repo.get_by_id(id).await
    }

    /// Parse a textual id (e.g. a path parameter) and look it up.
    pub async fn get_by_raw_id(&self, raw: &str) -> StoreResult<Movie> {
        let id = parse_id(raw)?;
        self.repo.get_by_id(id).await
    }

    pub async fn get_all(&self) -> StoreResult<Vec<Movie>> {
        self.repo.get_all().await
    }

    pub async fn create(&self, movie: &MoviePatch) -> StoreResult<Movie> {
        validate_new(movie)?;
        self.repo.create(movie).await
    }

    pub async fn update(&self, id: i64, patch: &MoviePatch) -> StoreResult<Movie> {
        validate_id(id)?;
        validate_patch(patch)?;
        self.repo.update(id, patch).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        validate_id(id)?;
        self.repo.delete(id).await
    }
}
