use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::lcu::{
    EventSocket, LcuApi, LcuError, Summoner, CHAMP_SELECT_SESSION_URI, GAMEFLOW_IN_PROGRESS,
    GAMEFLOW_PHASE_URI,
};

use super::{
    aggregate::{Aggregator, PlayerScore},
    report::{format_report, Delivery, ENEMY_KDA_WINDOW, FRIENDLY_KDA_WINDOW},
    retry::retry_fixed,
    roster::{split_session_teams, RosterResolver},
    state::GamePhase,
};

const RECONNECT_DELAY: Duration = Duration::from_secs(5);
const SUMMONER_LOOKUP_ATTEMPTS: u32 = 5;
const SUMMONER_LOOKUP_DELAY: Duration = Duration::from_secs(1);

/// The controller: consumes phase events from the push socket, tracks the
/// single current phase, and dispatches scoring work without ever blocking
/// the read loop.
pub struct Monitor {
    api: Arc<dyn LcuApi>,
    aggregator: Arc<Aggregator>,
    resolver: RosterResolver,
    delivery: Arc<dyn Delivery>,
    phase: Mutex<GamePhase>,
    self_summoner: Mutex<Option<Summoner>>,
    auto_accept: bool,
    scoring_enabled: bool,
}

impl Monitor {
    pub fn new(
        api: Arc<dyn LcuApi>,
        aggregator: Arc<Aggregator>,
        delivery: Arc<dyn Delivery>,
        auto_accept: bool,
        scoring_enabled: bool,
    ) -> Self {
        Self {
            resolver: RosterResolver::new(Arc::clone(&api)),
            api,
            aggregator,
            delivery,
            phase: Mutex::new(GamePhase::None),
            self_summoner: Mutex::new(None),
            auto_accept,
            scoring_enabled,
        }
    }

    pub fn phase(&self) -> GamePhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_phase(&self, phase: GamePhase) {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = phase;
    }

    fn self_summoner_id(&self) -> Option<i64> {
        self.self_summoner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|s| s.summoner_id)
    }

    /// Handles one raw phase string: updates the current phase under the
    /// lock, then fires the matching task and returns immediately. The
    /// same phase arriving twice just re-runs the dispatch; every task is
    /// safe to run again.
    pub fn handle_phase_change(self: &Arc<Self>, raw: &str) {
        let phase = GamePhase::from_raw(raw);
        info!(%phase, raw, "phase change");
        self.set_phase(phase);
        match phase {
            GamePhase::ChampSelect if self.scoring_enabled => {
                info!("champ select entered, scoring friendly roster");
                let this = Arc::clone(self);
                tokio::spawn(async move { this.score_friendly().await });
            }
            GamePhase::InGame if self.scoring_enabled => {
                info!("game started, scoring enemy roster");
                let this = Arc::clone(self);
                tokio::spawn(async move { this.score_enemies().await });
            }
            GamePhase::ReadyCheck if self.auto_accept => {
                let this = Arc::clone(self);
                tokio::spawn(async move { this.accept_match().await });
            }
            _ => {}
        }
    }

    async fn score_friendly(self: Arc<Self>) {
        let Some((conversation_id, members)) = self.resolver.friendly_roster().await else {
            warn!("champ-select chat never resolved, skipping friendly scoring");
            return;
        };
        if members.is_empty() {
            warn!("no members observed in champ-select chat");
            return;
        }
        info!(?members, "friendly roster resolved");
        let Some(scores) = self.score_roster(&members).await else {
            return;
        };
        let lines = format_report(&scores, FRIENDLY_KDA_WINDOW);
        self.delivery.deliver(lines, Some(&conversation_id)).await;
    }

    async fn score_enemies(self: Arc<Self>) {
        let session = match self.api.gameflow_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "session query failed, skipping enemy scoring");
                return;
            }
        };
        if session.phase != GAMEFLOW_IN_PROGRESS {
            return;
        }
        let Some(self_id) = self.self_summoner_id() else {
            warn!("self summoner unknown, skipping enemy scoring");
            return;
        };
        let (_, enemies) = split_session_teams(self_id, &session);
        if enemies.is_empty() {
            warn!("session rosters unavailable");
            return;
        }
        info!(?enemies, "enemy roster resolved");
        let Some(scores) = self.score_roster(&enemies).await else {
            return;
        };
        let lines = format_report(&scores, ENEMY_KDA_WINDOW);
        self.delivery.deliver(lines, None).await;
    }

    async fn score_roster(&self, members: &[i64]) -> Option<Vec<PlayerScore>> {
        let summoners = match self.api.list_summoners(members).await {
            Ok(summoners) => summoners,
            Err(e) => {
                warn!(error = %e, ?members, "summoner lookup failed");
                return None;
            }
        };
        Some(self.aggregator.aggregate(summoners).await)
    }

    async fn accept_match(self: Arc<Self>) {
        match self.api.accept_ready_check().await {
            Ok(()) => info!("match accepted"),
            Err(e) => warn!(error = %e, "failed to accept match"),
        }
    }

    /// One connected session: opens the push socket, resolves the
    /// logged-in summoner, then pumps events until the connection drops.
    async fn run_session(self: &Arc<Self>, port: u16, token: &str) -> Result<(), LcuError> {
        let mut socket = EventSocket::connect(port, token).await?;
        let summoner = retry_fixed(SUMMONER_LOOKUP_ATTEMPTS, SUMMONER_LOOKUP_DELAY, || {
            let api = Arc::clone(&self.api);
            async move { api.current_summoner().await }
        })
        .await?;
        info!(
            summoner_id = summoner.summoner_id,
            name = %summoner.riot_id(),
            "logged-in summoner resolved"
        );
        *self
            .self_summoner
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(summoner);

        loop {
            let Some(event) = socket.next_event().await? else {
                continue;
            };
            match event.uri.as_str() {
                GAMEFLOW_PHASE_URI => {
                    if let Some(raw) = event.data.as_str() {
                        self.handle_phase_change(raw);
                    }
                }
                // Reserved for pick/ban automation.
                CHAMP_SELECT_SESSION_URI => {}
                _ => {}
            }
        }
    }

    /// Runs forever, reconnecting whenever the client connection drops.
    /// In-flight scoring tasks are left to finish on their own; only the
    /// phase state is reset.
    pub async fn run(self: Arc<Self>, port: u16, token: String) {
        let mut attempt = 1u32;
        loop {
            if let Err(e) = self.run_session(port, &token).await {
                warn!(error = %e, attempt, "client connection lost, reconnecting");
            }
            self.set_phase(GamePhase::None);
            attempt += 1;
            sleep(RECONNECT_DELAY).await;
        }
    }
}
