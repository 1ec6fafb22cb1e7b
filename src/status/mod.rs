pub mod poller;
pub mod probe;
