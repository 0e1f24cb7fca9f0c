pub mod activity;
pub mod error;
pub mod reactions;
pub mod toggle;

pub use activity::ActivityService;
pub use error::{EngagementError, EngagementResult};
pub use reactions::ReactionController;
pub use toggle::{OptimisticToggle, Phase, Snapshot};
