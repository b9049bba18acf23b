use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::lcu::{GameInfo, LcuApi, Summoner, QUEUE_ARAM};
use crate::score::{ScoreEngine, DEFAULT_SCORE};

use super::{history::fetch_history, retry::retry_fixed};

/// How many per-match KDA triples a composite carries for display.
pub const KDA_TRAIL_LEN: usize = 5;

const SUMMARY_RETRY_ATTEMPTS: u32 = 5;
const SUMMARY_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Matches created within this window of now count as "recent" form.
const RECENT_WINDOW_HOURS: i64 = 5;
const RECENT_WEIGHT: f64 = 0.8;
const OTHER_WEIGHT: f64 = 0.2;

/// One player's composite assessment across their recent history.
#[derive(Debug, Clone)]
pub struct PlayerScore {
    pub summoner_id: i64,
    /// Full riot id, `name#tag`.
    pub name: String,
    pub score: f64,
    /// Per-match (kills, deaths, assists), most recent first, bounded to
    /// [`KDA_TRAIL_LEN`].
    pub recent_kda: Vec<(i32, i32, i32)>,
    /// The player's newest retained match is an unranked-skill queue
    /// (ARAM); the KDA trail is not representative and is hidden.
    pub latest_unranked: bool,
}

impl PlayerScore {
    fn baseline(summoner: &Summoner) -> Self {
        Self {
            summoner_id: summoner.summoner_id,
            name: summoner.riot_id(),
            score: DEFAULT_SCORE,
            recent_kda: Vec::new(),
            latest_unranked: false,
        }
    }
}

/// Fans match fetching and scoring out across a roster and reduces the
/// results into one ranked list. Every per-player and per-match failure is
/// absorbed into a documented default; nothing here ever aborts siblings.
pub struct Aggregator {
    api: Arc<dyn LcuApi>,
    engine: Arc<ScoreEngine>,
}

impl Aggregator {
    pub fn new(api: Arc<dyn LcuApi>, engine: Arc<ScoreEngine>) -> Self {
        Self { api, engine }
    }

    /// Scores every roster member concurrently, waits for all of them, and
    /// returns the list sorted by score descending (stable, so ties keep
    /// roster order).
    pub async fn aggregate(self: &Arc<Self>, roster: Vec<Summoner>) -> Vec<PlayerScore> {
        let results: Arc<Mutex<Vec<(usize, PlayerScore)>>> =
            Arc::new(Mutex::new(Vec::with_capacity(roster.len())));
        let mut tasks = Vec::with_capacity(roster.len());
        for (position, summoner) in roster.into_iter().enumerate() {
            let this = Arc::clone(self);
            let results = Arc::clone(&results);
            tasks.push(tokio::spawn(async move {
                let score = this.score_player(summoner).await;
                results.lock().await.push((position, score));
            }));
        }
        // Join everything; one member failing never cancels the rest.
        for task in tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "member scoring task panicked");
            }
        }

        let mut collected = {
            let mut guard = results.lock().await;
            std::mem::take(&mut *guard)
        };
        // Completion order is unspecified; restore roster order before the
        // stable sort so ties keep encounter order.
        collected.sort_by_key(|(position, _)| *position);
        let mut scores: Vec<PlayerScore> = collected.into_iter().map(|(_, s)| s).collect();
        rank(&mut scores);
        scores
    }

    /// One player's composite score.
    ///
    /// History unavailable: baseline with an empty trail. A match summary
    /// that never arrives: dropped, its trail slot stays (the lighter
    /// history record already holds the KDA). Any match that fails to
    /// score: the whole aggregation degrades to the baseline, since a
    /// partially scored set is unsafe to average.
    pub async fn score_player(&self, summoner: Summoner) -> PlayerScore {
        let mut player = PlayerScore::baseline(&summoner);
        let history = match fetch_history(self.api.as_ref(), &summoner.puuid).await {
            Ok(history) => history,
            Err(_) => return player,
        };
        player.recent_kda = kda_trail(&history);
        player.latest_unranked = history
            .last()
            .is_some_and(|g| g.queue_id == QUEUE_ARAM);

        let fetches = history.iter().map(|game| {
            let api = Arc::clone(&self.api);
            let game_id = game.game_id;
            async move {
                retry_fixed(SUMMARY_RETRY_ATTEMPTS, SUMMARY_RETRY_DELAY, || {
                    let api = Arc::clone(&api);
                    async move { api.game_summary(game_id).await }
                })
                .await
            }
        });

        let now = Utc::now();
        let mut recent = Vec::new();
        let mut other = Vec::new();
        for (game, result) in history.iter().zip(join_all(fetches).await) {
            let summary = match result {
                Ok(summary) => summary,
                Err(e) => {
                    debug!(game_id = game.game_id, error = %e, "summary unavailable, match dropped");
                    continue;
                }
            };
            match self.engine.score(summoner.summoner_id, &summary) {
                Ok(breakdown) => {
                    if is_recent(now, summary.game_creation_date) {
                        recent.push(breakdown.value());
                    } else {
                        other.push(breakdown.value());
                    }
                }
                Err(e) => {
                    warn!(
                        summoner_id = summoner.summoner_id,
                        game_id = summary.game_id,
                        error = %e,
                        "match failed to score, falling back to baseline"
                    );
                    player.score = DEFAULT_SCORE;
                    return player;
                }
            }
        }
        player.score = weighted_composite(&recent, &other);
        player
    }
}

/// Sorts descending by score. `sort_by` is stable, so equal scores keep
/// their relative order.
pub fn rank(scores: &mut [PlayerScore]) {
    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Recency-weighted composite of per-match scores already split into the
/// recent and other buckets. An empty bucket borrows the all-matches mean;
/// no matches at all means the baseline.
pub fn weighted_composite(recent: &[f64], other: &[f64]) -> f64 {
    if recent.is_empty() && other.is_empty() {
        return DEFAULT_SCORE;
    }
    let total: f64 = recent.iter().chain(other.iter()).sum();
    let all_mean = total / (recent.len() + other.len()) as f64;
    let recent_mean = if recent.is_empty() { all_mean } else { mean(recent) };
    let other_mean = if other.is_empty() { all_mean } else { mean(other) };
    RECENT_WEIGHT * recent_mean + OTHER_WEIGHT * other_mean
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn is_recent(now: DateTime<Utc>, created: DateTime<Utc>) -> bool {
    now < created + ChronoDuration::hours(RECENT_WINDOW_HOURS)
}

/// Display trail from the lightweight history records (participant 0 is the
/// queried player there), most recent first.
fn kda_trail(history: &[GameInfo]) -> Vec<(i32, i32, i32)> {
    history
        .iter()
        .rev()
        .take(KDA_TRAIL_LEN)
        .filter_map(|g| g.participants.first())
        .map(|p| (p.stats.kills, p.stats.deaths, p.stats.assists))
        .collect()
}
