mod login;
mod logout;
mod register;
mod session;

pub use login::{LoginPayload, LoginResponse, login, login_endpoint};
pub use logout::logout_endpoint;
pub use register::{
    RegisterCommand, RegisterPayload, hash_password, register_endpoint, register_user,
};
pub use session::{
    CurrentUser, authenticate, create_session, delete_expired_sessions, delete_session,
};
