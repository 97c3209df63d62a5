//! Admin authentication.
//!
//! DESIGN
//! ======
//! [`IdentityProvider`] is the only seam to the external auth service. The
//! production implementation is [`supabase::SupabaseAuth`]; tests plug in
//! in-memory mocks. [`session::SessionStore`] sits on top and owns the
//! "who is logged in" state for the console.

pub mod session;
pub mod supabase;
pub mod types;

pub use session::SessionStore;
pub use types::{AuthError, IdentityProvider, Principal, Session, ADMIN_ROLE};
