//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `supabase` - Production Supabase JWT validation
//! - `mock` - Token table for tests and local development

mod mock;
mod supabase;

pub use mock::MockSessionValidator;
pub use supabase::{SupabaseConfig, SupabaseSessionValidator, DEFAULT_AUDIENCE};
