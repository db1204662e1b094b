pub mod auth_user;
pub mod form;

pub use auth_user::AuthUser;
pub use form::Form;
