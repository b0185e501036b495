//! The article corpus: record types, data-source client, embedded fallback
//! data, and the load-once content store.

pub mod fallback;
pub mod fetch;
pub mod store;
pub mod types;

pub use fetch::FetchError;
pub use store::{ContentSource, ContentStore};
pub use types::{Article, ArticleIndex, ArticleSummary};
