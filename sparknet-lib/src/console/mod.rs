//! Console operations over the backend collaborators
//!
//! A [`Console`] is built once from the three collaborators and a
//! [`ConsoleConfig`]. Every operation takes what it needs explicitly; the
//! session, when one is needed, is passed per call.

mod config;
mod crud;
mod feedback;
mod members;
mod projects;
mod session;
mod status;

use std::sync::Arc;

pub use config::*;
pub use status::*;

use crate::backend::AuthService;
use crate::backend::DocumentStore;
use crate::backend::FileStore;

/// Typed operations for the admin console.
#[derive(Clone)]
pub struct Console {
    store: Arc<dyn DocumentStore>,
    auth: Arc<dyn AuthService>,
    files: Arc<dyn FileStore>,
    config: ConsoleConfig,
}

impl Console {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthService>,
        files: Arc<dyn FileStore>,
        config: ConsoleConfig,
    ) -> Self {
        Self {
            store,
            auth,
            files,
            config,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}
