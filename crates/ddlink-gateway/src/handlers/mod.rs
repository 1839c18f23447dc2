mod health;
mod info;
mod unlock;

pub use health::health_handler;
pub use info::info_handler;
pub use unlock::{unlock_handler, MAX_BATCH_SIZE};
