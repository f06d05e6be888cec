//! Menu-side user interface state

pub mod login;

pub use login::{Field, LoginForm, LoginRequest};
