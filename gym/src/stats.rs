use lib::{Cause, Termination};
use serde::{Deserialize, Serialize};

/// Result of a single game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameResult {
    /// Name of the agent that played
    pub agent: String,
    pub score: u32,
    /// Number of ticks the game lasted
    pub ticks: u64,
    /// Final snake length
    pub length: usize,
    /// How the game ended, or None if it hit the tick limit
    pub cause: Option<Cause>,
}

impl GameResult {
    pub fn ended(agent: &str, termination: Termination) -> Self {
        Self {
            agent: agent.to_string(),
            score: termination.score,
            ticks: termination.ticks,
            length: termination.length,
            cause: Some(termination.cause),
        }
    }

    pub fn cut_off(agent: &str, score: u32, ticks: u64, length: usize) -> Self {
        Self {
            agent: agent.to_string(),
            score,
            ticks,
            length,
            cause: None,
        }
    }
}

/// Aggregated statistics for an agent
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AgentStats {
    pub name: String,
    pub games: u32,
    pub total_score: u64,
    pub min_score: u32,
    pub max_score: u32,
    pub total_ticks: u64,
    pub wall_deaths: u32,
    pub self_collisions: u32,
    pub grids_filled: u32,
    pub cut_off: u32,
}

impl AgentStats {
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Compute statistics from game results
    pub fn from_results(name: &str, results: &[GameResult]) -> Self {
        let mut stats = Self::new(name.to_string());
        stats.min_score = u32::MAX;

        for result in results {
            stats.games += 1;
            stats.total_score += result.score as u64;
            stats.total_ticks += result.ticks;
            stats.min_score = stats.min_score.min(result.score);
            stats.max_score = stats.max_score.max(result.score);
            match result.cause {
                Some(Cause::Wall) => stats.wall_deaths += 1,
                Some(Cause::SelfCollision) => stats.self_collisions += 1,
                Some(Cause::GridFilled) => stats.grids_filled += 1,
                None => stats.cut_off += 1,
            }
        }

        if stats.games == 0 {
            stats.min_score = 0;
        }
        stats
    }

    pub fn avg_score(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games as f64
        }
    }

    pub fn avg_game_length(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_ticks as f64 / self.games as f64
        }
    }
}

/// Side by side statistics for several agents on the same games
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComparisonStats {
    pub title: String,
    pub agent_stats: Vec<AgentStats>,
}

impl ComparisonStats {
    pub fn new(title: impl Into<String>, agent_stats: Vec<AgentStats>) -> Self {
        Self {
            title: title.into(),
            agent_stats,
        }
    }

    /// Print a formatted summary table
    pub fn print_summary(&self) {
        use colored::Colorize;
        use tabled::{Table, Tabled};

        #[derive(Tabled)]
        struct Row {
            #[tabled(rename = "Agent")]
            name: String,
            #[tabled(rename = "Games")]
            games: u32,
            #[tabled(rename = "Avg Score")]
            avg_score: String,
            #[tabled(rename = "Min")]
            min_score: u32,
            #[tabled(rename = "Max")]
            max_score: u32,
            #[tabled(rename = "Avg Ticks")]
            avg_ticks: String,
            #[tabled(rename = "Wall")]
            wall: u32,
            #[tabled(rename = "Self")]
            self_collisions: u32,
            #[tabled(rename = "Filled")]
            filled: u32,
            #[tabled(rename = "Cut Off")]
            cut_off: u32,
        }

        let rows: Vec<Row> = self
            .agent_stats
            .iter()
            .map(|s| Row {
                name: s.name.clone(),
                games: s.games,
                avg_score: format!("{:.1}", s.avg_score()),
                min_score: s.min_score,
                max_score: s.max_score,
                avg_ticks: format!("{:.1}", s.avg_game_length()),
                wall: s.wall_deaths,
                self_collisions: s.self_collisions,
                filled: s.grids_filled,
                cut_off: s.cut_off,
            })
            .collect();

        let table = Table::new(rows).to_string();

        println!("\n{}", format!("=== {} ===", self.title).green().bold());
        println!("{}", table);

        if let Some(best) = self
            .agent_stats
            .iter()
            .max_by(|a, b| a.avg_score().total_cmp(&b.avg_score()))
        {
            println!(
                "Best average score: {} ({:.1})",
                best.name.cyan(),
                best.avg_score()
            );
        }
        println!();
    }

    /// Export stats to JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u32, ticks: u64, cause: Option<Cause>) -> GameResult {
        GameResult {
            agent: "Test".to_string(),
            score,
            ticks,
            length: score as usize + 1,
            cause,
        }
    }

    #[test]
    fn test_agent_stats_aggregate() {
        let results = [
            result(4, 100, Some(Cause::Wall)),
            result(10, 300, Some(Cause::SelfCollision)),
            result(7, 200, None),
        ];
        let stats = AgentStats::from_results("Test", &results);
        assert_eq!(stats.games, 3);
        assert_eq!(stats.min_score, 4);
        assert_eq!(stats.max_score, 10);
        assert_eq!(stats.avg_score(), 7.0);
        assert_eq!(stats.avg_game_length(), 200.0);
        assert_eq!(stats.wall_deaths, 1);
        assert_eq!(stats.self_collisions, 1);
        assert_eq!(stats.cut_off, 1);
    }

    #[test]
    fn test_empty_stats() {
        let stats = AgentStats::from_results("Nobody", &[]);
        assert_eq!(stats.min_score, 0);
        assert_eq!(stats.avg_score(), 0.0);
    }

    #[test]
    fn test_json_export() {
        let stats = ComparisonStats::new(
            "Run",
            vec![AgentStats::from_results("Test", &[result(2, 40, Some(Cause::GridFilled))])],
        );
        let value: serde_json::Value = serde_json::from_str(&stats.to_json()).unwrap();
        assert_eq!(value["agent_stats"][0]["grids_filled"], 1);
        assert_eq!(value["title"], "Run");
    }
}
