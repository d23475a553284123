//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod signup_command;
mod user_store;

#[cfg(test)]
pub use signup_command::MockSignupCommand;
pub use signup_command::SignupCommand;
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UniqueField, UserStore, UserStoreError};
