//! Service context - dependency container for services
//!
//! Holds the repository, cache, and gateway ports needed by the comment
//! service. Everything is injected; nothing reaches for a global.

use std::sync::Arc;

use comment_cache::PageCache;
use comment_core::traits::{BlobStore, CaptchaVerifier, CommentRepository, Notifier};
use comment_core::{Snowflake, SnowflakeGenerator};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    comment_repo: Arc<dyn CommentRepository>,
    blob_store: Arc<dyn BlobStore>,
    captcha: Arc<dyn CaptchaVerifier>,
    notifier: Arc<dyn Notifier>,
    page_cache: PageCache,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        blob_store: Arc<dyn BlobStore>,
        captcha: Arc<dyn CaptchaVerifier>,
        notifier: Arc<dyn Notifier>,
        page_cache: PageCache,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            comment_repo,
            blob_store,
            captcha,
            notifier,
            page_cache,
            snowflake_generator,
        }
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the blob store
    pub fn blob_store(&self) -> &dyn BlobStore {
        self.blob_store.as_ref()
    }

    /// Get the CAPTCHA verifier
    pub fn captcha(&self) -> &dyn CaptchaVerifier {
        self.captcha.as_ref()
    }

    /// Get the notifier
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Get the page cache
    pub fn page_cache(&self) -> &PageCache {
        &self.page_cache
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("comment_repo", &"dyn CommentRepository")
            .field("gateways", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext
pub struct ServiceContextBuilder {
    comment_repo: Option<Arc<dyn CommentRepository>>,
    blob_store: Option<Arc<dyn BlobStore>>,
    captcha: Option<Arc<dyn CaptchaVerifier>>,
    notifier: Option<Arc<dyn Notifier>>,
    page_cache: Option<PageCache>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            comment_repo: None,
            blob_store: None,
            captcha: None,
            notifier: None,
            page_cache: None,
            snowflake_generator: None,
        }
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn blob_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.blob_store = Some(store);
        self
    }

    pub fn captcha(mut self, verifier: Arc<dyn CaptchaVerifier>) -> Self {
        self.captcha = Some(verifier);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn page_cache(mut self, cache: PageCache) -> Self {
        self.page_cache = Some(cache);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns an error if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.comment_repo
                .ok_or_else(|| ServiceError::internal("comment_repo is required"))?,
            self.blob_store
                .ok_or_else(|| ServiceError::internal("blob_store is required"))?,
            self.captcha
                .ok_or_else(|| ServiceError::internal("captcha is required"))?,
            self.notifier
                .ok_or_else(|| ServiceError::internal("notifier is required"))?,
            self.page_cache
                .ok_or_else(|| ServiceError::internal("page_cache is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::internal("snowflake_generator is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
