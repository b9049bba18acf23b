use tracing::warn;

use crate::lcu::{is_scorable_queue, GameInfo, LcuApi, LcuError};

/// Most matches ever considered per player.
pub const HISTORY_WINDOW: usize = 20;

/// Matches shorter than this (remakes, early surrenders) say nothing.
pub const MIN_GAME_DURATION_SECS: i64 = 15 * 60;

/// Fetches one player's recent scorable matches, oldest first.
pub async fn fetch_history(api: &dyn LcuApi, puuid: &str) -> Result<Vec<GameInfo>, LcuError> {
    let resp = api.list_games(puuid, 0, HISTORY_WINDOW).await.map_err(|e| {
        warn!(puuid, error = %e, "match history query failed");
        e
    })?;
    Ok(filter_history(resp.games.games))
}

/// Keeps scorable-queue matches of at least the duration floor, capped to
/// the history window, then reversed so the result reads oldest to newest.
/// Filtering happens before the cap so short games never eat window slots.
pub fn filter_history(games: Vec<GameInfo>) -> Vec<GameInfo> {
    let mut kept: Vec<GameInfo> = games
        .into_iter()
        .filter(|g| is_scorable_queue(g.queue_id) && g.game_duration >= MIN_GAME_DURATION_SECS)
        .collect();
    kept.truncate(HISTORY_WINDOW);
    kept.reverse();
    kept
}
