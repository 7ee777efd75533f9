use serde::Serialize;

use super::GameServer;
use crate::error::NetError;
use crate::state::GameState;

#[derive(Serialize)]
struct MovePayload {
    x: i32,
    y: i32,
}

/// Blocking JSON client for the game server.
#[derive(Clone)]
pub struct HttpServer {
    agent: ureq::Agent,
    base: String,
}

impl HttpServer {
    /// `base` is the server root, e.g. `http://127.0.0.1:5000`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { agent: ureq::AgentBuilder::new().build(), base }
    }

    pub fn base_url(&self) -> &str { &self.base }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }

    fn decode(response: ureq::Response) -> Result<GameState, NetError> {
        Ok(response.into_json::<GameState>()?)
    }
}

impl GameServer for HttpServer {
    fn fetch_state(&self) -> Result<GameState, NetError> {
        tracing::trace!("GET /game_state");
        Self::decode(self.agent.get(&self.url("game_state")).call()?)
    }

    fn submit_move(&self, x: i32, y: i32) -> Result<GameState, NetError> {
        tracing::trace!(x, y, "POST /move");
        let response = self
            .agent
            .post(&self.url("move"))
            .send_json(MovePayload { x, y })?;
        Self::decode(response)
    }

    fn reset(&self) -> Result<GameState, NetError> {
        tracing::trace!("POST /reset");
        Self::decode(self.agent.post(&self.url("reset")).call()?)
    }
}
