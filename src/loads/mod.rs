//! Load types

mod distributed;
mod node_load;

pub use distributed::{DistributedLoad, LocalAxis};
pub use node_load::NodeLoad;
