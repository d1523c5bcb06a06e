//! The goblin walkthrough: the command chain once, then the query chain step
//! by step.
use std::io::Write;

use anyhow::Result;
use broker::Disposable;
use game_core::{
    CreatureModifier, CreatureStats, DoubleAttack, DoubleAttackLink, Game, IncreaseDefense,
    IncreaseDefenseLink, ModifierChain, NoBonusesLink,
};
use serde::Serialize;

use crate::config::{CliConfig, OutputFormat};

/// One printed line of the walkthrough.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    pub step: &'static str,
    pub creature: CreatureStats,
}

impl Step {
    fn new(step: &'static str, creature: CreatureStats) -> Self {
        Self { step, creature }
    }
}

/// Runs the walkthrough and returns every recorded step.
pub fn run(config: &CliConfig) -> Result<Vec<Step>> {
    let mut steps = command_chain(config);
    steps.extend(query_chain(config)?);
    Ok(steps)
}

/// Writes `steps` to `out` in the configured format.
pub fn render(steps: &[Step], format: OutputFormat, out: &mut impl Write) -> Result<()> {
    for step in steps {
        match format {
            OutputFormat::Text => writeln!(out, "{:<28} {}", step.step, step.creature)?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(step)?)?,
        }
    }
    Ok(())
}

fn base_stats(config: &CliConfig) -> CreatureStats {
    let creature = &config.creature;
    CreatureStats::new(creature.name.clone(), creature.attack, creature.defense)
}

fn command_chain(config: &CliConfig) -> Vec<Step> {
    let mut chain = ModifierChain::new();
    chain
        .add(DoubleAttackLink)
        .add(IncreaseDefenseLink::new(config.game.defense_bonus));

    let mut blessed = base_stats(config);
    chain.handle(&mut blessed);

    let mut cursed_chain = ModifierChain::new();
    cursed_chain
        .add(NoBonusesLink)
        .add(DoubleAttackLink)
        .add(IncreaseDefenseLink::new(config.game.defense_bonus));

    let mut cursed = base_stats(config);
    cursed_chain.handle(&mut cursed);

    vec![
        Step::new("command: bonuses", blessed),
        Step::new("command: cursed", cursed),
    ]
}

fn query_chain(config: &CliConfig) -> Result<Vec<Step>> {
    let game = Game::with_config(config.game.clone());
    let creature = &config.creature;
    let goblin = game.spawn(creature.name.clone(), creature.attack, creature.defense);

    let mut steps = vec![Step::new("query: base", goblin.snapshot()?)];

    tracing::info!("Doubling {}'s attack", goblin.name());
    let double = CreatureModifier::attach(&goblin, DoubleAttack);
    steps.push(Step::new("query: double attack", goblin.snapshot()?));

    tracing::info!("Increasing {}'s defense", goblin.name());
    let shield = CreatureModifier::attach(&goblin, IncreaseDefense::from_config(game.config()));
    steps.push(Step::new("query: increase defense", goblin.snapshot()?));

    shield.dispose();
    steps.push(Step::new("query: defense removed", goblin.snapshot()?));

    double.dispose();
    steps.push(Step::new("query: attack removed", goblin.snapshot()?));

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(attack: i32, defense: i32) -> CreatureStats {
        CreatureStats::new("Goblin", attack, defense)
    }

    #[test]
    fn default_walkthrough_matches_expected_values() {
        let steps = run(&CliConfig::default()).unwrap();
        let values: Vec<_> = steps.iter().map(|s| (s.step, s.creature.clone())).collect();

        assert_eq!(
            values,
            vec![
                ("command: bonuses", stats(4, 5)),
                ("command: cursed", stats(2, 2)),
                ("query: base", stats(2, 2)),
                ("query: double attack", stats(4, 2)),
                ("query: increase defense", stats(4, 5)),
                ("query: defense removed", stats(4, 2)),
                ("query: attack removed", stats(2, 2)),
            ]
        );
    }

    #[test]
    fn defense_bonus_comes_from_config() {
        let mut config = CliConfig::default();
        config.game.defense_bonus = 1;

        let steps = run(&config).unwrap();
        let shielded = steps
            .iter()
            .find(|s| s.step == "query: increase defense")
            .unwrap();
        assert_eq!(shielded.creature.defense, 3);
    }

    #[test]
    fn renders_text_and_json() {
        let steps = vec![Step::new("query: base", stats(2, 2))];

        let mut text = Vec::new();
        render(&steps, OutputFormat::Text, &mut text).unwrap();
        let text = String::from_utf8(text).unwrap();
        assert!(text.ends_with("Name: Goblin, Attack: 2, Defense: 2\n"));

        let mut json = Vec::new();
        render(&steps, OutputFormat::Json, &mut json).unwrap();
        let line: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(line["step"], "query: base");
        assert_eq!(line["creature"]["attack"], 2);
    }
}
