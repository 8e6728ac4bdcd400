//! Paged-listing read cache

mod page_cache;

pub use page_cache::PageCache;
