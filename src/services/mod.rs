//! Business logic services

pub mod auth;
pub mod catalog;
pub mod roster;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub roster: roster::RosterService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: &AuthConfig) -> Self {
        let catalog = catalog::CatalogService::new(repository);
        Self {
            auth: auth::AuthService::new(auth_config),
            roster: roster::RosterService::new(catalog.clone()),
            catalog,
        }
    }
}
