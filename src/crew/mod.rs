pub mod lineup;
pub mod recommend;
pub mod session;

pub use lineup::{lineup_report, rank_lineup, rank_lineup_with, LineupEntry, LineupReport, SkillSummary};
pub use recommend::{ordinal, recommend, recommendation_text, skill_ranking, Recommendation};
pub use session::RankingSession;
