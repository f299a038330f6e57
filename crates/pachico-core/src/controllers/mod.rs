pub mod chat_controller;

pub use chat_controller::{
    APOLOGY_PREFIX, ChatController, PendingSend, SendOutcome, SharedStore, apology_message,
};
