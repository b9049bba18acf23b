use strum_macros::Display;

/// The client's current session phase, reduced to the states the scout
/// reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GamePhase {
    None,
    Matchmaking,
    ReadyCheck,
    ChampSelect,
    InGame,
    Other,
}

impl GamePhase {
    /// Maps the raw phase string from a gameflow push event. Anything
    /// unrecognized (lobby screens, end-of-game, reconnect states) is
    /// `Other`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "None" => GamePhase::None,
            "Matchmaking" => GamePhase::Matchmaking,
            "ReadyCheck" => GamePhase::ReadyCheck,
            "ChampSelect" => GamePhase::ChampSelect,
            "InProgress" => GamePhase::InGame,
            _ => GamePhase::Other,
        }
    }
}
