pub mod config;
pub mod ds;
pub mod host;
pub mod plugin;
pub mod std_lib;
