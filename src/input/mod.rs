pub mod handler;

pub use handler::{handle_key, wants_external_editor};
