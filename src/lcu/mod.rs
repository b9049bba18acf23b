pub mod api;
pub mod client;
pub mod models;
pub mod socket;

mod error;

pub use api::LcuApi;
pub use client::RestClient;
pub use error::LcuError;
pub use models::*;
pub use socket::{EventSocket, PushEvent, CHAMP_SELECT_SESSION_URI, GAMEFLOW_PHASE_URI};
