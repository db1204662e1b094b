pub mod cookie;
pub mod password;
pub mod rate_limit;
pub mod session;
pub mod token;
pub mod users;

pub use cookie::{SESSION_COOKIE, clear_session_cookie, session_cookie, session_token_from_headers};
pub use password::{check_password_length, hash_password, verify_password};
pub use rate_limit::RateLimiter;
pub use session::{create_session, revoke_session, validate_session};
pub use token::{generate_secure_token, hash_token};
pub use users::{authenticate, create_user};
