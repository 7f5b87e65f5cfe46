pub mod attendance;
pub mod document;
pub mod member;
pub mod session;
