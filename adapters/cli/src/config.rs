//! Combat rules loaded from an optional TOML file, then overridden by flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use skirmish_core::{AttackPower, CombatRules, CorpsePolicy, Faction, Health};
use tracing::debug;

/// Rule overrides supplied on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RuleOverrides {
    pub(crate) initial_health: Option<u32>,
    pub(crate) elf_attack: Option<u32>,
    pub(crate) goblin_attack: Option<u32>,
    pub(crate) clear_corpses: bool,
}

impl RuleOverrides {
    pub(crate) fn apply(self, mut rules: CombatRules) -> CombatRules {
        if let Some(health) = self.initial_health {
            rules = rules.with_initial_health(Health::new(health));
        }
        if let Some(power) = self.elf_attack {
            rules = rules.with_attack(Faction::Elf, AttackPower::new(power));
        }
        if let Some(power) = self.goblin_attack {
            rules = rules.with_attack(Faction::Goblin, AttackPower::new(power));
        }
        if self.clear_corpses {
            rules = rules.with_corpses(CorpsePolicy::ClearImmediately);
        }
        rules
    }
}

/// Loads the rules file if one was given, otherwise the standard rules.
pub(crate) fn load(path: Option<&Path>) -> Result<CombatRules> {
    let Some(path) = path else {
        return Ok(CombatRules::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file at {}", path.display()))?;
    let rules = parse(&contents)
        .with_context(|| format!("failed to parse rules file at {}", path.display()))?;
    debug!(?rules, path = %path.display(), "loaded combat rules");
    Ok(rules)
}

fn parse(contents: &str) -> Result<CombatRules> {
    toml::from_str(contents).context("invalid combat rules toml")
}
