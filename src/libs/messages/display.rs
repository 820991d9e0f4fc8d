//! Display implementation for todomvc messages.
//!
//! Every user-facing string of the service lives here, including the
//! plain-text bodies of client-error responses. Handlers and the store only
//! name a [`Message`] variant; the wording is decided in one place.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === SERVICE MESSAGES ===
            Message::Greeting => "Todo MVC Service".to_string(),
            Message::ServerStarting(addr) => format!("Starting Todo MVC Service on {}", addr),
            Message::ServerListening(addr) => format!("Listening on http://{}", addr),
            Message::ServerStopping => "Shutting down Todo MVC Service".to_string(),
            Message::ServerStopped => "Todo MVC Service stopped".to_string(),
            Message::ServerFailed(e) => format!("Server error: {}", e),
            Message::ServiceVersion { name, version } => format!("{} v{}", name, version),

            // === SIGNAL MESSAGES ===
            Message::ReceivedSigterm => "Received SIGTERM".to_string(),
            Message::ReceivedSigint => "Received SIGINT".to_string(),
            Message::ReceivedCtrlC => "Received Ctrl+C".to_string(),
            Message::CtrlCListenFailed(e) => format!("Unable to listen for Ctrl+C: {}", e),
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),

            // === STORE MESSAGES ===
            Message::StoreOpened { path, count } => format!("Loaded {} todo(s) from {}", count, path),
            Message::StoreCreatedEmpty(path) => format!("No store file at {}, starting with an empty list", path),
            Message::TodoAdded(id) => format!("Todo {} added", id),
            Message::TodoUpdated(id) => format!("Todo {} updated", id),
            Message::TodosDeleted(count) => format!("{} todo(s) deleted", count),
            Message::IdsExhausted => "No todo ids left to assign".to_string(),

            // === VALIDATION MESSAGES ===
            Message::ContentEmpty => "Todo content must be not empty".to_string(),
            Message::IdMissing => "Todo ID is missing".to_string(),
            Message::IllegalStatus => "Illegal todo status".to_string(),

            // === ROUTING MESSAGES ===
            Message::RouteNotFound => "404 Not Found".to_string(),
            Message::RequestFailed { method, path, error } => format!("{} {} failed: {}", method, path, error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::InvalidPortEnv(raw) => format!("Ignoring invalid TODOMVC_PORT value '{}'", raw),
            Message::PromptServerPort => "Port to listen on".to_string(),
            Message::PromptStoreFile => "Path of the todo store file".to_string(),
        };
        write!(f, "{}", s)
    }
}
