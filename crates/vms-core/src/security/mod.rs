//! Handling of sensitive user input.

mod secret;

pub use secret::SecretString;
