pub mod bridge;
pub mod config;
pub mod host;
pub mod interpreter;

pub use bridge::{CallError, CallRequest};
pub use config::Config;
pub use host::{Host, HostEvent};
pub use interpreter::{Interpreter, LifecycleError};
