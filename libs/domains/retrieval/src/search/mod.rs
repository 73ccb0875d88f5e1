mod client;
mod zilliz;

#[cfg(test)]
pub use client::MockVectorSearchClient;
pub use client::VectorSearchClient;
pub use zilliz::{ZillizConfig, ZillizSearchClient};
