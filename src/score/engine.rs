use std::cmp::Ordering;

use tracing::debug;

use crate::lcu::{GameSummary, Participant};

use super::{
    breakdown::{ScoreBreakdown, ScoreReason, DEFAULT_SCORE},
    config::{RateTier, ScoringConfig},
    errors::ScoreError,
};

/// Computes one player's point-adjusted score for a single match.
///
/// The weight table is fixed at construction; there is no shared mutable
/// configuration.
pub struct ScoreEngine {
    conf: ScoringConfig,
}

impl ScoreEngine {
    pub fn new(conf: ScoringConfig) -> Self {
        Self { conf }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.conf
    }

    /// Scores `summoner_id`'s performance in `summary`.
    ///
    /// Fails if the summoner is not among the match participants or their
    /// team cannot be determined; both are per-match conditions the caller
    /// absorbs.
    pub fn score(
        &self,
        summoner_id: i64,
        summary: &GameSummary,
    ) -> Result<ScoreBreakdown, ScoreError> {
        let conf = &self.conf;
        let participant_id = summary
            .participant_identities
            .iter()
            .find(|identity| identity.player.summoner_id == summoner_id)
            .map(|identity| identity.participant_id)
            .ok_or(ScoreError::ParticipantNotFound(summoner_id))?;
        let player = summary
            .participants
            .iter()
            .find(|p| p.participant_id == participant_id)
            .ok_or(ScoreError::TeamNotFound(summoner_id))?;
        let team: Vec<&Participant> = summary
            .participants
            .iter()
            .filter(|p| p.team_id == player.team_id)
            .collect();

        let team_kills: f64 = team.iter().map(|p| f64::from(p.stats.kills)).sum();
        let team_assists: f64 = team.iter().map(|p| f64::from(p.stats.assists)).sum();
        let team_damage: f64 = team
            .iter()
            .map(|p| p.stats.total_damage_dealt_to_champions as f64)
            .sum();
        let team_gold: f64 = team.iter().map(|p| p.stats.gold_earned as f64).sum();

        let stats = &player.stats;
        let mut breakdown = ScoreBreakdown::new(DEFAULT_SCORE);

        // First blood: the kill outranks the assist.
        if stats.first_blood_kill {
            breakdown.add(conf.first_blood[0], ScoreReason::FirstBloodKill);
        } else if stats.first_blood_assist {
            breakdown.add(conf.first_blood[1], ScoreReason::FirstBloodAssist);
        }

        // Highest multi-kill tier only.
        if stats.penta_kills > 0 {
            breakdown.add(conf.penta_kills, ScoreReason::PentaKills);
        } else if stats.quadra_kills > 0 {
            breakdown.add(conf.quadra_kills, ScoreReason::QuadraKills);
        } else if stats.triple_kills > 0 {
            breakdown.add(conf.triple_kills, ScoreReason::TripleKills);
        }

        // Team participation-rate rank.
        if team_kills > 0.0 {
            let rank = rank_of(&team, participant_id, |p| {
                f64::from(p.stats.kills + p.stats.assists)
            });
            match rank {
                1 => breakdown.add(conf.join_team_rate_rank[0], ScoreReason::JoinTeamRateRank),
                2 => breakdown.add(conf.join_team_rate_rank[1], ScoreReason::JoinTeamRateRank),
                4 => breakdown.add(-conf.join_team_rate_rank[2], ScoreReason::JoinTeamRateRank),
                5 => breakdown.add(-conf.join_team_rate_rank[3], ScoreReason::JoinTeamRateRank),
                _ => {}
            }
        }

        // Gold-earned rank. Supports run a structurally poorer economy, so
        // the penalty tiers do not apply to them.
        if team_gold > 0.0 {
            let rank = rank_of(&team, participant_id, |p| p.stats.gold_earned as f64);
            let support = player.is_support_role();
            match rank {
                1 => breakdown.add(conf.gold_earned_rank[0], ScoreReason::GoldEarnedRank),
                2 => breakdown.add(conf.gold_earned_rank[1], ScoreReason::GoldEarnedRank),
                4 if !support => {
                    breakdown.add(-conf.gold_earned_rank[2], ScoreReason::GoldEarnedRank)
                }
                5 if !support => {
                    breakdown.add(-conf.gold_earned_rank[3], ScoreReason::GoldEarnedRank)
                }
                _ => {}
            }
        }

        // Damage-to-champions rank, bonus tiers only.
        if team_damage > 0.0 {
            let rank = rank_of(&team, participant_id, |p| {
                p.stats.total_damage_dealt_to_champions as f64
            });
            match rank {
                1 => breakdown.add(conf.damage_rank[0], ScoreReason::DamageRank),
                2 => breakdown.add(conf.damage_rank[1], ScoreReason::DamageRank),
                _ => {}
            }
        }

        // Damage-per-gold efficiency rank.
        if team_gold > 0.0 && team_damage > 0.0 {
            let rank = rank_of(&team, participant_id, |p| {
                p.stats.total_damage_dealt_to_champions as f64
                    / (p.stats.gold_earned as f64).max(1.0)
            });
            match rank {
                1 => breakdown.add(conf.damage_per_gold_rank[0], ScoreReason::DamagePerGoldRank),
                2 => breakdown.add(conf.damage_per_gold_rank[1], ScoreReason::DamagePerGoldRank),
                _ => {}
            }
        }

        // Vision-score rank, always computed.
        {
            let rank = rank_of(&team, participant_id, |p| p.stats.vision_score as f64);
            match rank {
                1 => breakdown.add(conf.vision_score_rank[0], ScoreReason::VisionScoreRank),
                2 => breakdown.add(conf.vision_score_rank[1], ScoreReason::VisionScoreRank),
                _ => {}
            }
        }

        // Minions per minute: first (highest) floor met wins.
        let minutes = summary.game_duration as f64 / 60.0;
        if minutes > 0.0 {
            let per_minute = f64::from(stats.total_minions_killed) / minutes;
            for (floor, bonus) in &conf.minions_killed {
                if per_minute >= *floor {
                    breakdown.add(*bonus, ScoreReason::MinionsKilled);
                    break;
                }
            }
        }

        // Share bonuses. The damage share is backed by the kill count since
        // raw damage is not a countable threshold.
        if team_kills > 0.0 {
            let share = 100.0 * f64::from(stats.kills) / team_kills;
            share_bonus(
                &mut breakdown,
                &conf.kill_rate,
                share,
                f64::from(stats.kills),
                ScoreReason::KillRate,
            );
        }
        if team_damage > 0.0 {
            let share = 100.0 * stats.total_damage_dealt_to_champions as f64 / team_damage;
            share_bonus(
                &mut breakdown,
                &conf.damage_rate,
                share,
                f64::from(stats.kills),
                ScoreReason::DamageRate,
            );
        }
        if team_assists > 0.0 {
            let share = 100.0 * f64::from(stats.assists) / team_assists;
            share_bonus(
                &mut breakdown,
                &conf.assist_rate,
                share,
                f64::from(stats.assists),
                ScoreReason::AssistRate,
            );
        }

        // Continuous KDA term, weighted by team-fight participation.
        let participation = if team_kills > 0.0 {
            f64::from(stats.kills + stats.assists) / team_kills
        } else {
            1.0
        };
        let deaths = f64::from(stats.deaths.max(1));
        let adjust = (f64::from(stats.kills + stats.assists) / deaths - conf.adjust_kda[0]
            + f64::from(stats.kills - stats.deaths) / conf.adjust_kda[1])
            * participation;
        breakdown.add(adjust, ScoreReason::KdaAdjust);

        debug!(
            game_id = summary.game_id,
            summoner_id,
            score = breakdown.value(),
            reasons = %breakdown.reasons_display(),
            "match scored"
        );
        Ok(breakdown)
    }
}

/// 1-based rank of `target_id` within `team`, highest `value` first.
/// Ties break by participant id ascending, so the result never depends on
/// iteration order.
fn rank_of(
    team: &[&Participant],
    target_id: i32,
    value: impl Fn(&Participant) -> f64,
) -> usize {
    let mut ordered: Vec<(i32, f64)> = team
        .iter()
        .map(|p| (p.participant_id, value(p)))
        .collect();
    ordered.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    ordered
        .iter()
        .position(|(id, _)| *id == target_id)
        .map_or(usize::MAX, |i| i + 1)
}

/// Applies at most one share bonus: the first tier whose percentage limit
/// the share exceeds and whose count floor the raw count clears.
fn share_bonus(
    breakdown: &mut ScoreBreakdown,
    tiers: &[RateTier],
    share_pct: f64,
    raw_count: f64,
    reason: ScoreReason,
) {
    for tier in tiers {
        if share_pct > tier.limit {
            for (floor, bonus) in &tier.score_conf {
                if raw_count > *floor {
                    breakdown.add(*bonus, reason);
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use crate::lcu::{
        GameSummary, IdentityPlayer, Participant, ParticipantIdentity, ParticipantStats, Timeline,
    };

    use super::*;

    fn participant(id: i32, team_id: i32, kills: i32, deaths: i32, assists: i32) -> Participant {
        Participant {
            participant_id: id,
            team_id,
            stats: ParticipantStats {
                kills,
                deaths,
                assists,
                ..Default::default()
            },
            timeline: Timeline::default(),
        }
    }

    /// Summoner ids are participant ids times 100.
    fn summary(participants: Vec<Participant>) -> GameSummary {
        let participant_identities = participants
            .iter()
            .map(|p| ParticipantIdentity {
                participant_id: p.participant_id,
                player: IdentityPlayer {
                    summoner_id: i64::from(p.participant_id) * 100,
                },
            })
            .collect();
        GameSummary {
            game_id: 1,
            queue_id: 420,
            game_duration: 30 * 60,
            game_creation_date: Utc::now(),
            participants,
            participant_identities,
        }
    }

    fn engine() -> ScoreEngine {
        ScoreEngine::new(ScoringConfig::default())
    }

    fn reason_delta(breakdown: &ScoreBreakdown, reason: ScoreReason) -> Option<f64> {
        breakdown
            .reasons()
            .iter()
            .find(|(_, r)| *r == reason)
            .map(|(delta, _)| *delta)
    }

    #[test]
    fn unknown_summoner_is_participant_not_found() {
        let summary = summary(vec![participant(1, 100, 0, 0, 0)]);
        assert_eq!(
            engine().score(999, &summary).unwrap_err(),
            ScoreError::ParticipantNotFound(999)
        );
    }

    #[test]
    fn identity_without_participant_is_team_not_found() {
        let mut summary = summary(vec![participant(1, 100, 0, 0, 0)]);
        summary.participants.clear();
        assert_eq!(
            engine().score(100, &summary).unwrap_err(),
            ScoreError::TeamNotFound(100)
        );
    }

    #[rstest]
    #[case(true, true, Some(10.0), None)]
    #[case(true, false, Some(10.0), None)]
    #[case(false, true, None, Some(5.0))]
    #[case(false, false, None, None)]
    fn first_blood_kill_and_assist_are_mutually_exclusive(
        #[case] kill: bool,
        #[case] assist: bool,
        #[case] kill_bonus: Option<f64>,
        #[case] assist_bonus: Option<f64>,
    ) {
        let mut p = participant(1, 100, 0, 0, 0);
        p.stats.first_blood_kill = kill;
        p.stats.first_blood_assist = assist;
        let breakdown = engine().score(100, &summary(vec![p])).unwrap();
        assert_eq!(
            reason_delta(&breakdown, ScoreReason::FirstBloodKill),
            kill_bonus
        );
        assert_eq!(
            reason_delta(&breakdown, ScoreReason::FirstBloodAssist),
            assist_bonus
        );
    }

    #[test]
    fn only_the_highest_multi_kill_tier_applies() {
        let mut p = participant(1, 100, 0, 0, 0);
        p.stats.penta_kills = 1;
        p.stats.quadra_kills = 2;
        p.stats.triple_kills = 3;
        let breakdown = engine().score(100, &summary(vec![p])).unwrap();
        assert_eq!(reason_delta(&breakdown, ScoreReason::PentaKills), Some(20.0));
        assert_eq!(reason_delta(&breakdown, ScoreReason::QuadraKills), None);
        assert_eq!(reason_delta(&breakdown, ScoreReason::TripleKills), None);
    }

    #[test]
    fn participation_rank_rewards_leaders_and_penalizes_passengers() {
        let team: Vec<Participant> = (1..=5)
            .map(|id| participant(id, 100, 6 - id, 2, 0))
            .collect();
        let summary = summary(team);

        let top = engine().score(100, &summary).unwrap();
        assert_eq!(reason_delta(&top, ScoreReason::JoinTeamRateRank), Some(10.0));

        let third = engine().score(300, &summary).unwrap();
        assert_eq!(reason_delta(&third, ScoreReason::JoinTeamRateRank), None);

        let last = engine().score(500, &summary).unwrap();
        assert_eq!(
            reason_delta(&last, ScoreReason::JoinTeamRateRank),
            Some(-10.0)
        );
    }

    #[test]
    fn no_participation_rank_when_team_has_no_kills() {
        let team: Vec<Participant> = (1..=5).map(|id| participant(id, 100, 0, 1, 0)).collect();
        let breakdown = engine().score(100, &summary(team)).unwrap();
        assert_eq!(reason_delta(&breakdown, ScoreReason::JoinTeamRateRank), None);
        // Participation defaults to 1 in the continuous term.
        let expected = (0.0 - 2.0 + (0.0 - 1.0) / 5.0) * 1.0;
        let kda = reason_delta(&breakdown, ScoreReason::KdaAdjust).unwrap();
        assert!((kda - expected).abs() < 1e-9);
    }

    #[test]
    fn gold_penalty_is_suppressed_for_supports() {
        let mut team: Vec<Participant> = (1..=5)
            .map(|id| {
                let mut p = participant(id, 100, 1, 1, 1);
                p.stats.gold_earned = i64::from(6 - id) * 1000;
                p
            })
            .collect();
        team[4].timeline = Timeline {
            lane: "BOTTOM".to_string(),
            role: "DUO_SUPPORT".to_string(),
        };
        let summary = summary(team);

        let support = engine().score(500, &summary).unwrap();
        assert_eq!(reason_delta(&support, ScoreReason::GoldEarnedRank), None);

        let fourth = engine().score(400, &summary).unwrap();
        assert_eq!(
            reason_delta(&fourth, ScoreReason::GoldEarnedRank),
            Some(-5.0)
        );
    }

    #[test]
    fn rank_ties_break_by_participant_id() {
        let team: Vec<&Participant> = vec![];
        assert_eq!(rank_of(&team, 1, |_| 0.0), usize::MAX);

        let a = participant(3, 100, 5, 0, 0);
        let b = participant(1, 100, 5, 0, 0);
        let c = participant(2, 100, 9, 0, 0);
        let team = vec![&a, &b, &c];
        // c leads; a and b tie on value, lower id first.
        assert_eq!(rank_of(&team, 2, |p| f64::from(p.stats.kills)), 1);
        assert_eq!(rank_of(&team, 1, |p| f64::from(p.stats.kills)), 2);
        assert_eq!(rank_of(&team, 3, |p| f64::from(p.stats.kills)), 3);
    }

    #[test]
    fn minions_bonus_takes_highest_floor_met() {
        let mut p = participant(1, 100, 0, 0, 0);
        // 9.5 cs/min over 30 minutes
        p.stats.total_minions_killed = 285;
        let breakdown = engine().score(100, &summary(vec![p])).unwrap();
        assert_eq!(
            reason_delta(&breakdown, ScoreReason::MinionsKilled),
            Some(10.0)
        );
    }

    #[test]
    fn kill_share_bonus_requires_limit_and_count_floor() {
        // 16 of 20 team kills = 80% share, 16 kills clears the 15 floor.
        let mut team: Vec<Participant> = (1..=5).map(|id| participant(id, 100, 1, 1, 1)).collect();
        team[0].stats.kills = 16;
        let breakdown = engine().score(100, &summary(team)).unwrap();
        assert_eq!(reason_delta(&breakdown, ScoreReason::KillRate), Some(40.0));
    }

    #[test]
    fn kda_adjust_matches_formula() {
        let mut team: Vec<Participant> = (1..=5).map(|id| participant(id, 100, 1, 1, 1)).collect();
        team[0].stats.kills = 10;
        team[0].stats.deaths = 2;
        team[0].stats.assists = 6;
        // team kills = 10 + 4 = 14
        let breakdown = engine().score(100, &summary(team)).unwrap();
        let participation = 16.0 / 14.0;
        let expected = (16.0 / 2.0 - 2.0 + 8.0 / 5.0) * participation;
        let kda = reason_delta(&breakdown, ScoreReason::KdaAdjust).unwrap();
        assert!((kda - expected).abs() < 1e-9);
    }

    #[test]
    fn value_is_baseline_plus_all_applied_terms() {
        let team: Vec<Participant> = (1..=5).map(|id| participant(id, 100, 2, 2, 2)).collect();
        let breakdown = engine().score(100, &summary(team)).unwrap();
        let sum: f64 = breakdown.reasons().iter().map(|(delta, _)| delta).sum();
        assert!((breakdown.value() - (DEFAULT_SCORE + sum)).abs() < 1e-9);
    }
}
