use serde::{Deserialize, Serialize};

/// One share tier: the player's share of a team total (as a percentage)
/// must exceed `limit`, then the bonus for the highest raw-count floor they
/// clear in `score_conf` applies. At most one bonus per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTier {
    pub limit: f64,
    pub score_conf: Vec<(f64, f64)>,
}

/// Full scoring weight table. Every field is required in a configuration
/// document except `enabled`; a missing field fails startup.
///
/// Handed to [`ScoreEngine::new`](super::ScoreEngine::new) as an immutable
/// value, so one table applies for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoringConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// `[kill bonus, assist bonus]`, mutually exclusive, kill wins.
    pub first_blood: [f64; 2],
    pub penta_kills: f64,
    pub quadra_kills: f64,
    pub triple_kills: f64,
    /// `[rank1 bonus, rank2 bonus, rank4 penalty, rank5 penalty]`.
    pub join_team_rate_rank: [f64; 4],
    /// Same layout as `join_team_rate_rank`.
    pub gold_earned_rank: [f64; 4],
    /// `[rank1 bonus, rank2 bonus]`, no penalty tier.
    pub damage_rank: [f64; 2],
    pub damage_per_gold_rank: [f64; 2],
    pub vision_score_rank: [f64; 2],
    /// `(minions per minute floor, bonus)`, descending; first floor met wins.
    pub minions_killed: Vec<(f64, f64)>,
    pub kill_rate: Vec<RateTier>,
    pub damage_rate: Vec<RateTier>,
    pub assist_rate: Vec<RateTier>,
    /// `[k1, k2]` for the continuous KDA term.
    pub adjust_kda: [f64; 2],
}

fn default_enabled() -> bool {
    true
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            first_blood: [10.0, 5.0],
            penta_kills: 20.0,
            quadra_kills: 10.0,
            triple_kills: 5.0,
            join_team_rate_rank: [10.0, 5.0, 5.0, 10.0],
            gold_earned_rank: [10.0, 5.0, 5.0, 10.0],
            damage_rank: [10.0, 5.0],
            damage_per_gold_rank: [10.0, 5.0],
            vision_score_rank: [10.0, 5.0],
            minions_killed: vec![(10.0, 20.0), (9.0, 10.0), (8.0, 5.0)],
            kill_rate: vec![
                RateTier {
                    limit: 50.0,
                    score_conf: vec![(15.0, 40.0), (10.0, 20.0), (5.0, 10.0)],
                },
                RateTier {
                    limit: 40.0,
                    score_conf: vec![(15.0, 20.0), (10.0, 10.0), (5.0, 5.0)],
                },
            ],
            damage_rate: vec![
                RateTier {
                    limit: 40.0,
                    score_conf: vec![(15.0, 40.0), (10.0, 20.0), (5.0, 10.0)],
                },
                RateTier {
                    limit: 30.0,
                    score_conf: vec![(15.0, 20.0), (10.0, 10.0), (5.0, 5.0)],
                },
            ],
            assist_rate: vec![
                RateTier {
                    limit: 50.0,
                    score_conf: vec![
                        (20.0, 30.0),
                        (18.0, 25.0),
                        (15.0, 20.0),
                        (10.0, 10.0),
                        (5.0, 5.0),
                    ],
                },
                RateTier {
                    limit: 40.0,
                    score_conf: vec![(20.0, 15.0), (15.0, 10.0), (10.0, 5.0), (5.0, 3.0)],
                },
            ],
            adjust_kda: [2.0, 5.0],
        }
    }
}
