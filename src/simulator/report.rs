//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Score band width for the distribution chart.
const SCORE_BUCKET: u64 = 250;

/// Violations listed verbatim in the text report.
const MAX_LISTED_VIOLATIONS: usize = 10;

/// One game, from first frame to crash.
#[derive(Debug, Clone, Serialize)]
pub struct GameStats {
    pub score: u64,
    /// Frames spent running.
    pub frames: u64,
    pub top_speed: f64,
    pub jumps: u32,
    /// Obstacle type crashed into; `None` when the run timed out.
    pub cause: Option<&'static str>,
    pub night: bool,
    pub alt_mode: bool,
}

/// One simulated session.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub seed: u64,
    pub best_score: u64,
    pub games: Vec<GameStats>,
    pub frames: u64,
    pub timed_out: bool,
    pub violations: Vec<String>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,
    pub max_frames_per_run: u64,
    pub total_games: u32,

    pub avg_score: f64,
    pub median_score: u64,
    pub max_score: u64,
    pub avg_frames_per_game: f64,
    pub avg_top_speed: f64,
    pub avg_jumps: f64,
    pub night_games: u32,
    pub alt_mode_games: u32,

    /// Crashes per obstacle type.
    pub crash_causes: BTreeMap<String, u32>,
    /// Games per score band, keyed by the band's lower bound.
    pub score_distribution: BTreeMap<u64, u32>,

    pub total_violations: u32,

    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, max_frames: u64) -> Self {
        let num_runs = runs.len() as u32;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;
        let games: Vec<&GameStats> = runs.iter().flat_map(|r| &r.games).collect();
        let total_games = games.len() as u32;
        let divisor = total_games.max(1) as f64;

        let avg_score = games.iter().map(|g| g.score as f64).sum::<f64>() / divisor;
        let avg_frames_per_game = games.iter().map(|g| g.frames as f64).sum::<f64>() / divisor;
        let avg_top_speed = games.iter().map(|g| g.top_speed).sum::<f64>() / divisor;
        let avg_jumps = games.iter().map(|g| g.jumps as f64).sum::<f64>() / divisor;

        let mut scores: Vec<u64> = games.iter().map(|g| g.score).collect();
        scores.sort_unstable();
        let median_score = scores.get(scores.len() / 2).copied().unwrap_or(0);
        let max_score = scores.last().copied().unwrap_or(0);

        let night_games = games.iter().filter(|g| g.night).count() as u32;
        let alt_mode_games = games.iter().filter(|g| g.alt_mode).count() as u32;

        let mut crash_causes = BTreeMap::new();
        for cause in games.iter().filter_map(|g| g.cause) {
            *crash_causes.entry(cause.to_string()).or_insert(0) += 1;
        }

        let mut score_distribution = BTreeMap::new();
        for score in &scores {
            *score_distribution
                .entry(score / SCORE_BUCKET * SCORE_BUCKET)
                .or_insert(0) += 1;
        }

        let total_violations = runs.iter().map(|r| r.violations.len() as u32).sum();

        Self {
            num_runs,
            runs_timed_out,
            max_frames_per_run: max_frames,
            total_games,
            avg_score,
            median_score,
            max_score,
            avg_frames_per_game,
            avg_top_speed,
            avg_jumps,
            night_games,
            alt_mode_games,
            crash_causes,
            score_distribution,
            total_violations,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("                 (Autopilot, Real Sessions)\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} games, {} timed out ({} frame budget)\n\n",
            self.num_runs, self.total_games, self.runs_timed_out, self.max_frames_per_run
        ));

        report.push_str("── SCORES ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Score:           {:.1}\n", self.avg_score));
        report.push_str(&format!("  Median Score:        {}\n", self.median_score));
        report.push_str(&format!("  Best Score:          {}\n", self.max_score));
        report.push_str(&format!(
            "  Avg Frames/Game:     {:.0}\n",
            self.avg_frames_per_game
        ));
        report.push_str(&format!("  Avg Top Speed:       {:.2}\n", self.avg_top_speed));
        report.push_str(&format!("  Avg Jumps:           {:.1}\n\n", self.avg_jumps));

        report.push_str("── WORLD ────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Reached Night:       {:>5.1}%\n",
            self.pct(self.night_games)
        ));
        report.push_str(&format!(
            "  Alternate Skin:      {:>5.1}%\n\n",
            self.pct(self.alt_mode_games)
        ));

        report.push_str("── CRASHES ──────────────────────────────────────────────────────\n");
        if self.crash_causes.is_empty() {
            report.push_str("  (none)\n");
        }
        for (cause, count) in &self.crash_causes {
            let pct = self.pct(*count);
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<20} {:>5.1}% {}\n", cause, pct, bar));
        }
        report.push('\n');

        report.push_str("── SCORE DISTRIBUTION ───────────────────────────────────────────\n");
        for (start, count) in &self.score_distribution {
            let pct = self.pct(*count);
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  {:>5}-{:<5} {:>5.1}% {}\n",
                start,
                start + SCORE_BUCKET - 1,
                pct,
                bar
            ));
        }
        report.push('\n');

        report.push_str("── INVARIANTS ───────────────────────────────────────────────────\n");
        if self.total_violations == 0 {
            report.push_str("  All checks passed\n");
        } else {
            report.push_str(&format!("  {} violations\n", self.total_violations));
            for (run, violation) in self
                .run_stats
                .iter()
                .flat_map(|r| r.violations.iter().map(move |v| (r.seed, v)))
                .take(MAX_LISTED_VIOLATIONS)
            {
                report.push_str(&format!("  seed {}: {}\n", run, violation));
            }
        }

        report
    }

    /// Serialize the full report, per-run stats included.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn pct(&self, count: u32) -> f64 {
        count as f64 / self.total_games.max(1) as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(score: u64, cause: Option<&'static str>) -> GameStats {
        GameStats {
            score,
            frames: score * 2,
            top_speed: 8.0,
            jumps: 3,
            cause,
            night: score >= 700,
            alt_mode: false,
        }
    }

    fn run(games: Vec<GameStats>, violations: Vec<String>) -> RunStats {
        RunStats {
            seed: 1,
            best_score: games.iter().map(|g| g.score).max().unwrap_or(0),
            games,
            frames: 1000,
            timed_out: false,
            violations,
        }
    }

    #[test]
    fn test_aggregates() {
        let report = SimReport::from_runs(
            vec![
                run(vec![game(100, Some("CACTUS_SMALL")), game(300, Some("PTERODACTYL"))], vec![]),
                run(vec![game(800, Some("CACTUS_SMALL"))], vec!["frame 3: bad".into()]),
            ],
            5000,
        );
        assert_eq!(report.total_games, 3);
        assert!((report.avg_score - 400.0).abs() < f64::EPSILON);
        assert_eq!(report.median_score, 300);
        assert_eq!(report.max_score, 800);
        assert_eq!(report.crash_causes.get("CACTUS_SMALL"), Some(&2));
        assert_eq!(report.score_distribution.get(&0), Some(&1));
        assert_eq!(report.score_distribution.get(&250), Some(&1));
        assert_eq!(report.night_games, 1);
        assert_eq!(report.total_violations, 1);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new(), 100);
        assert_eq!(report.total_games, 0);
        assert_eq!(report.median_score, 0);
        assert!(report.to_text().contains("All checks passed"));
    }

    #[test]
    fn test_text_lists_violations() {
        let report = SimReport::from_runs(
            vec![run(vec![game(50, None)], vec!["frame 9: high score decreased".into()])],
            100,
        );
        let text = report.to_text();
        assert!(text.contains("1 violations"));
        assert!(text.contains("seed 1: frame 9: high score decreased"));
    }

    #[test]
    fn test_json_round_trips_through_value() {
        let report = SimReport::from_runs(vec![run(vec![game(120, Some("CACTUS_LARGE"))], vec![])], 100);
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["total_games"], 1);
        assert_eq!(value["run_stats"][0]["games"][0]["cause"], "CACTUS_LARGE");
    }
}
