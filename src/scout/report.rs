use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::lcu::LcuApi;
use crate::score::Tier;

use super::aggregate::PlayerScore;

/// KDA entries shown in the champ-select report.
pub const FRIENDLY_KDA_WINDOW: usize = 3;
/// KDA entries shown in the in-game enemy report.
pub const ENEMY_KDA_WINDOW: usize = 5;

/// Consecutive chat messages trip the client's rate limit, so lines are
/// spaced out.
const MESSAGE_PACING: Duration = Duration::from_secs(4);

const REPORT_HEADER: &str = "scouting report incoming...";

/// One line per ranked player:
/// `name [tier] score N, recent: k/d/a k/d/a`. The trail is dropped when
/// the player's latest activity is an unranked-skill queue.
pub fn format_report(scores: &[PlayerScore], kda_window: usize) -> Vec<String> {
    scores
        .iter()
        .map(|score| format_line(score, kda_window))
        .collect()
}

fn format_line(score: &PlayerScore, kda_window: usize) -> String {
    let display_name = score.name.split('#').next().unwrap_or(&score.name);
    let tier = Tier::from_score(score.score);
    let mut line = format!("{display_name} [{tier}] score {:.0}", score.score);
    if !score.latest_unranked && !score.recent_kda.is_empty() {
        line.push_str(", recent:");
        for (kills, deaths, assists) in score.recent_kda.iter().take(kda_window) {
            let _ = write!(line, " {kills}/{deaths}/{assists}");
        }
    }
    line
}

/// Where a finished report goes. The aggregation core only asks that lines
/// arrive as discrete, paced messages.
#[async_trait]
pub trait Delivery: Send + Sync {
    async fn deliver(&self, lines: Vec<String>, conversation_id: Option<&str>);
}

/// Posts the report into the champ-select chat, one paced message at a
/// time. Without a conversation id the report only goes to the log.
pub struct ConversationDelivery {
    api: Arc<dyn LcuApi>,
}

impl ConversationDelivery {
    pub fn new(api: Arc<dyn LcuApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Delivery for ConversationDelivery {
    async fn deliver(&self, lines: Vec<String>, conversation_id: Option<&str>) {
        let Some(conversation_id) = conversation_id else {
            LogDelivery.deliver(lines, None).await;
            return;
        };
        if let Err(e) = self
            .api
            .send_conversation_message(conversation_id, REPORT_HEADER)
            .await
        {
            warn!(error = %e, "failed to announce report");
        }
        for line in lines {
            sleep(MESSAGE_PACING).await;
            if let Err(e) = self
                .api
                .send_conversation_message(conversation_id, &line)
                .await
            {
                warn!(error = %e, line, "failed to deliver report line");
            }
        }
    }
}

/// Writes the report to the service log. Used for the enemy report, which
/// has no chat room to land in.
pub struct LogDelivery;

#[async_trait]
impl Delivery for LogDelivery {
    async fn deliver(&self, lines: Vec<String>, _conversation_id: Option<&str>) {
        for line in lines {
            info!(report = %line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, score: f64, kda: Vec<(i32, i32, i32)>, unranked: bool) -> PlayerScore {
        PlayerScore {
            summoner_id: 1,
            name: name.to_string(),
            score,
            recent_kda: kda,
            latest_unranked: unranked,
        }
    }

    #[test]
    fn line_shows_name_tier_score_and_windowed_trail() {
        let p = player(
            "Faker#KR1",
            151.4,
            vec![(10, 2, 8), (3, 3, 3), (1, 9, 2), (5, 5, 5)],
            false,
        );
        assert_eq!(
            format_line(&p, FRIENDLY_KDA_WINDOW),
            "Faker [very strong] score 151, recent: 10/2/8 3/3/3 1/9/2"
        );
    }

    #[test]
    fn unranked_latest_activity_hides_the_trail() {
        let p = player("Someone#EUW", 120.0, vec![(30, 10, 40)], true);
        assert_eq!(
            format_line(&p, ENEMY_KDA_WINDOW),
            "Someone [average] score 120"
        );
    }

    #[test]
    fn empty_trail_is_omitted() {
        let p = player("NewAccount#NA1", 100.0, vec![], false);
        assert_eq!(
            format_line(&p, FRIENDLY_KDA_WINDOW),
            "NewAccount [below average] score 100"
        );
    }
}
