//! Client-side chat state, independent of any rendering front end.

pub mod chat_state;
pub mod relay_client;
pub mod turn;

pub use chat_state::{ChatState, Row, Submission};
pub use relay_client::{HttpRelayClient, RelayClient, RelayError};
pub use turn::{Sender, Turn};
