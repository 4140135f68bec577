pub mod net;
pub mod template;
pub mod time;
