pub mod errors;
pub mod feed;
pub mod flock;
pub mod types;

pub use errors::ClientError;
pub use feed::{FeedDirectory, HttpFeedClient};
pub use flock::{FlockDirectory, HttpFlockClient};
pub use types::{FeedInfo, FlockInfo};
