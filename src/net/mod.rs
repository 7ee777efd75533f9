//! Requests to the game server.
//!
//! [`GameClient`](crate::client::GameClient) never performs I/O itself: it
//! hands a [`Command`] plus a [`Ticket`] to a [`Dispatcher`] and later receives
//! the outcome through `on_response`. Tickets grow monotonically, which lets
//! the client drop a response that was overtaken by a newer one.

pub mod http;

pub use http::HttpServer;

use crate::error::NetError;
use crate::state::GameState;

/// The three endpoints the server exposes. Every call answers with the full,
/// updated game state.
pub trait GameServer {
    /// `GET /game_state`
    fn fetch_state(&self) -> Result<GameState, NetError>;
    /// `POST /move` with `{"x": x, "y": y}`
    fn submit_move(&self, x: i32, y: i32) -> Result<GameState, NetError>;
    /// `POST /reset`
    fn reset(&self) -> Result<GameState, NetError>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    FetchState,
    Move { x: i32, y: i32 },
    Reset,
}

impl Command {
    /// Run the command against `server`, blocking until it answers.
    pub fn execute<S: GameServer + ?Sized>(self, server: &S) -> Result<GameState, NetError> {
        match self {
            Command::FetchState => server.fetch_state(),
            Command::Move { x, y } => server.submit_move(x, y),
            Command::Reset => server.reset(),
        }
    }
}

/// Sequence number of a dispatched command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

impl Ticket {
    pub fn next(self) -> Ticket {
        Ticket(self.0 + 1)
    }
}

/// Carries commands to wherever they are executed. The outcome must come back
/// to the client tagged with the same ticket.
pub trait Dispatcher {
    fn dispatch(&mut self, ticket: Ticket, command: Command);
}
