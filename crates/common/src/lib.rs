pub mod config;
pub mod error;
pub mod events;
pub mod gateway;
pub mod job;
pub mod memory;
pub mod models;
pub mod supabase_client;

pub use config::{Config, TrendingConfig};
pub use error::{PlatformError, PlatformResult};
pub use events::{PlatformEvent, RefreshHub};
pub use gateway::{PlatformGateway, SupabaseGateway};
pub use job::{Job, JobManager, JobSummary};
pub use memory::MemoryGateway;
pub use models::{Boost, BoostStatus, Comment, PostRecord, ReactionKind};
pub use supabase_client::{SupabaseRestClient, SupabaseStorageClient};
