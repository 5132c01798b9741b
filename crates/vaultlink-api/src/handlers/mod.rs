pub mod remote_proxy;
pub mod settings;
pub mod submit;
