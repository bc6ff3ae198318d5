//! Final report printed once a run finishes.

use anyhow::{Context, Result};
use serde::Serialize;
use skirmish_core::{CombatRules, Outcome};
use skirmish_rendering::render_outcome;
use skirmish_system_combat::{elf_power_ceiling, FlawlessVictory};

/// What a run produced, in a form that prints as text or JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub(crate) enum Report {
    Combat {
        rules: CombatRules,
        outcome: Outcome,
        score: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        final_layout: Option<String>,
    },
    FlawlessSearch {
        rules: CombatRules,
        elf_attack: Option<u32>,
        outcome: Option<Outcome>,
        score: Option<u64>,
    },
}

impl Report {
    pub(crate) fn combat(
        rules: CombatRules,
        outcome: Outcome,
        final_layout: Option<String>,
    ) -> Self {
        Self::Combat {
            rules,
            outcome,
            score: outcome.score(),
            final_layout,
        }
    }

    pub(crate) fn search(rules: CombatRules, victory: Option<FlawlessVictory>) -> Self {
        Self::FlawlessSearch {
            rules,
            elf_attack: victory.map(|victory| victory.elf_attack.get()),
            outcome: victory.map(|victory| victory.outcome),
            score: victory.map(|victory| victory.outcome.score()),
        }
    }

    pub(crate) fn to_text(&self) -> String {
        match self {
            Self::Combat {
                outcome,
                final_layout,
                ..
            } => {
                let mut text = final_layout.clone().unwrap_or_default();
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&render_outcome(outcome));
                text
            }
            Self::FlawlessSearch {
                elf_attack: Some(power),
                outcome: Some(outcome),
                ..
            } => format!(
                "Elves need attack power {power} to win without losses\n{}",
                render_outcome(outcome)
            ),
            Self::FlawlessSearch { rules, .. } => format!(
                "No elf attack power up to {} wins without losses\n",
                elf_power_ceiling(rules).get()
            ),
        }
    }

    pub(crate) fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).context("failed to encode report")?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{AttackPower, Faction};

    fn goblin_win() -> Outcome {
        Outcome {
            completed_rounds: 47,
            remaining_health: 590,
            winner: Faction::Goblin,
        }
    }

    #[test]
    fn combat_text_places_layout_above_summary() {
        let report = Report::combat(
            CombatRules::new(),
            goblin_win(),
            Some("###\n#G#   G(200)\n###\n".to_owned()),
        );

        let text = report.to_text();
        assert!(text.starts_with("###\n#G#   G(200)\n###\n\nCombat ends after 47 full rounds\n"));
        assert!(text.ends_with("Outcome: 47 * 590 = 27730\n"));
    }

    #[test]
    fn combat_json_carries_score_and_rules() {
        let report = Report::combat(CombatRules::new(), goblin_win(), None);
        let value: serde_json::Value =
            serde_json::from_str(&report.to_json().expect("encodes")).expect("valid json");

        assert_eq!(value["mode"], "combat");
        assert_eq!(value["score"], 27_730);
        assert_eq!(value["outcome"]["winner"], "goblin");
        assert_eq!(value["rules"]["elf_attack"], 3);
        assert_eq!(value["rules"]["corpses"], "block_until_round_end");
        assert!(value.get("final_layout").is_none());
    }

    #[test]
    fn search_text_names_the_power() {
        let victory = FlawlessVictory {
            elf_attack: AttackPower::new(15),
            outcome: Outcome {
                completed_rounds: 29,
                remaining_health: 172,
                winner: Faction::Elf,
            },
        };
        let text = Report::search(CombatRules::new(), Some(victory)).to_text();

        assert!(text.starts_with("Elves need attack power 15 to win without losses\n"));
        assert!(text.contains("Elves win with 172 total hit points left"));
    }

    #[test]
    fn failed_search_reports_the_ceiling() {
        let text = Report::search(CombatRules::new(), None).to_text();
        assert_eq!(text, "No elf attack power up to 200 wins without losses\n");
    }
}
