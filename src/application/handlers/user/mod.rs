//! User and authentication handlers.

mod authenticate_user;
mod register_user;
mod update_profile;

pub use authenticate_user::{AuthenticateUserCommand, AuthenticateUserHandler};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
