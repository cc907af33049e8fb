pub mod identity;
pub mod session;

pub use identity::IdentityService;
pub use session::SessionStore;
