// ============================================================================
// Identity Domain - registry, current session and admin credential
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod credentials;
pub mod session_store;

pub use value_objects::*;
pub use errors::*;
pub use credentials::*;
pub use session_store::*;
