//! Systems - logic that operates on the simulator state.

mod breaks;
mod decay;
mod notifications;

pub use breaks::*;
pub use decay::*;
pub use notifications::*;
