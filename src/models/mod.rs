pub mod server;
pub mod site;
