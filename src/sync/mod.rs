pub mod channel;
pub mod mutation;
pub mod query;

pub use channel::RefreshSignal;
pub use mutation::{SuccessBanner, TaskMutation};
pub use query::{Phase, TaskQuery};
