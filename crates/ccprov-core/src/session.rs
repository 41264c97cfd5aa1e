// Authenticated session
//
// A `Session` is an immutable snapshot of one token exchange. Refreshing
// produces a new value; callers swap it in wherever they hold the old one.

use ccprov_api::{AuthToken, CatalystClient, Credentials};
use tracing::{debug, info};

use crate::error::CoreError;

#[derive(Debug, Clone)]
pub struct Session {
    token: AuthToken,
    generation: u32,
}

impl Session {
    /// Exchange credentials for a first token.
    pub async fn open(client: &CatalystClient, credentials: &Credentials) -> Result<Self, CoreError> {
        let token = client.authenticate(credentials).await?;
        info!(controller = %client.base_url(), "authenticated");
        Ok(Self {
            token,
            generation: 1,
        })
    }

    /// Fetch a fresh token, leaving `self` untouched.
    pub async fn refresh(
        &self,
        client: &CatalystClient,
        credentials: &Credentials,
    ) -> Result<Self, CoreError> {
        let token = client.authenticate(credentials).await?;
        let generation = self.generation.saturating_add(1);
        debug!(generation, "token refreshed");
        Ok(Self { token, generation })
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    /// How many token exchanges produced this session (1 for the first).
    pub fn generation(&self) -> u32 {
        self.generation
    }
}
