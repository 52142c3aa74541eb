//! Encounter engine.
//!
//! An encounter is a sequence of one or more enemies fought one after the
//! other. It ends when every enemy is down, the player escapes, or the player
//! dies; whichever way it ends, the tile never hosts combat again.

use crate::constants::{
    ACCURACY_PER_RANGE, COUNTER_DIE_SIDES, COUNTER_MISS_FACE, ENCOUNTER_BASE_CHANCE,
    ENCOUNTER_WEIGHT_FACTOR, ENEMY_VARIANCE_MAX, ENEMY_VARIANCE_MIN, FLEE_BASE_CHANCE,
    FLEE_BONUS_CAP, FLEE_BONUS_STEP, HIT_BASE_CHANCE, PLAYER_VARIANCE_MAX, PLAYER_VARIANCE_MIN,
};
use crate::data::{Attack, EnemyTemplate};
use crate::dice::Dice;
use crate::error::GameError;
use crate::frontend::{Frontend, Tone, first_char};
use crate::inventory;
use crate::locations::{GridPos, LocationRegistry};
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterOutcome {
    /// Nothing showed up.
    Quiet,
    Survived,
    Fled,
    PlayerDied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    Flee,
    UseItem,
}

impl CombatAction {
    /// Parse the first character of a combat answer.
    #[must_use]
    pub fn parse(answer: &str) -> Option<Self> {
        match first_char(answer)? {
            '1' | 'A' => Some(Self::Attack),
            '2' | 'F' | 'R' => Some(Self::Flee),
            '3' | 'U' | 'I' => Some(Self::UseItem),
            _ => None,
        }
    }
}

/// Bonus that makes each successful escape harder than the last.
///
/// It lasts for the whole process run, across "play again".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FleeBudget {
    bonus: i32,
}

impl FleeBudget {
    #[must_use]
    pub const fn bonus(self) -> i32 {
        self.bonus
    }

    /// Percent chance the next flee attempt succeeds.
    #[must_use]
    pub const fn success_chance(self) -> i32 {
        FLEE_BASE_CHANCE - self.bonus
    }

    pub fn record_escape(&mut self) {
        self.bonus = (self.bonus + FLEE_BONUS_STEP).min(FLEE_BONUS_CAP);
    }
}

/// An enemy mid-fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub health: i32,
    /// Move chosen for the current round.
    pub attack: Option<Attack>,
}

impl Enemy {
    #[must_use]
    pub fn spawn(template: &EnemyTemplate) -> Self {
        Self {
            name: template.name.clone(),
            health: template.health,
            attack: None,
        }
    }

    fn attack_name(&self) -> &str {
        self.attack.as_ref().map_or("attack", |attack| attack.name.as_str())
    }
}

/// Everything an encounter reads and mutates.
pub struct CombatContext<'a> {
    pub player: &'a mut Player,
    pub registry: &'a mut LocationRegistry,
    pub pos: GridPos,
    pub flee: &'a mut FleeBudget,
    pub dice: &'a mut dyn Dice,
    pub frontend: &'a mut dyn Frontend,
}

/// Damage figures rolled at the start of each round.
#[derive(Debug, Clone, Copy)]
struct Round {
    player_damage: i32,
    enemy_damage: i32,
    accuracy: i32,
}

enum FightEnd {
    Defeated,
    Fled,
    PlayerDied,
}

enum Strike {
    Continue,
    PlayerDied,
}

#[derive(Debug, Clone)]
pub struct EncounterEngine {
    roster: Vec<EnemyTemplate>,
}

impl EncounterEngine {
    /// # Errors
    ///
    /// Returns an error if the roster is empty or an enemy has no attacks.
    pub fn new(roster: Vec<EnemyTemplate>) -> Result<Self, GameError> {
        if roster.is_empty() {
            return Err(GameError::invalid("encounter roster is empty"));
        }
        if let Some(enemy) = roster.iter().find(|enemy| enemy.attacks.is_empty()) {
            return Err(GameError::invalid(format!(
                "enemy '{}' has no attacks",
                enemy.name
            )));
        }
        Ok(Self { roster })
    }

    /// Run the encounter for the tile at `ctx.pos` to completion.
    ///
    /// The tile's combat flag and the player's fighting flag are cleared on
    /// every exit path, including input errors.
    ///
    /// # Errors
    ///
    /// Propagates input failures from the frontend.
    pub fn run(&self, mut ctx: CombatContext<'_>) -> Result<EncounterOutcome, GameError> {
        let result = self.resolve(&mut ctx);
        ctx.registry.clear_combat(ctx.pos);
        ctx.player.fighting = false;
        if let Ok(outcome) = &result {
            log::debug!("encounter at tile {} ended: {outcome:?}", ctx.pos.index());
        }
        result
    }

    fn resolve(&self, ctx: &mut CombatContext<'_>) -> Result<EncounterOutcome, GameError> {
        let pool = ctx.registry.tile(ctx.pos).encounter_pool;
        if pool == 0 {
            return Ok(EncounterOutcome::Quiet);
        }

        let weight = i32::try_from(ctx.player.weight()).unwrap_or(i32::MAX);
        let threshold =
            ENCOUNTER_BASE_CHANCE.saturating_add(ENCOUNTER_WEIGHT_FACTOR.saturating_mul(weight));
        let trigger = ctx.dice.percent();
        if trigger >= threshold {
            ctx.frontend.say("You did not encounter anything dangerous.");
            return Ok(EncounterOutcome::Quiet);
        }

        let enemy_count = ctx.dice.roll(1, i32::try_from(pool).unwrap_or(i32::MAX));
        log::debug!(
            "encounter at tile {}: roll {trigger} < {threshold}, {enemy_count} enemies",
            ctx.pos.index()
        );
        ctx.frontend.line(&[("<=-- Combat --=>", Tone::Highlight)]);
        if enemy_count == 1 {
            ctx.frontend.say("You have encountered an enemy!");
        } else {
            ctx.frontend.say(&format!("You have encountered {enemy_count} enemies!"));
        }
        ctx.frontend.blank();

        ctx.player.fighting = true;
        for number in 1..=enemy_count {
            let template = &self.roster[ctx.dice.pick(self.roster.len())];
            let mut enemy = Enemy::spawn(template);
            log::debug!("enemy {number}/{enemy_count}: {}", enemy.name);

            match fight(ctx, &mut enemy, template, enemy_count)? {
                FightEnd::Defeated if number == enemy_count => {
                    ctx.frontend.say("You survived this encounter, continue your mission.");
                }
                FightEnd::Defeated => {
                    ctx.frontend.say("You survived this enemy, watch out for the next one.");
                    ctx.frontend.blank();
                }
                FightEnd::Fled => return Ok(EncounterOutcome::Fled),
                FightEnd::PlayerDied => return Ok(EncounterOutcome::PlayerDied),
            }
        }
        Ok(EncounterOutcome::Survived)
    }
}

fn fight(
    ctx: &mut CombatContext<'_>,
    enemy: &mut Enemy,
    template: &EnemyTemplate,
    enemy_count: i32,
) -> Result<FightEnd, GameError> {
    ctx.frontend.line(&[
        ("You're fighting a ", Tone::Plain),
        (&enemy.name, Tone::Info),
        (".", Tone::Plain),
    ]);
    let mut tried_to_flee = false;

    loop {
        let attack = template.attacks[ctx.dice.pick(template.attacks.len())].clone();
        let round = Round {
            player_damage: ctx.player.weapon.damage
                + ctx.dice.roll(PLAYER_VARIANCE_MIN, PLAYER_VARIANCE_MAX),
            enemy_damage: attack.damage + ctx.dice.roll(ENEMY_VARIANCE_MIN, ENEMY_VARIANCE_MAX),
            accuracy: ctx.player.weapon.range * ACCURACY_PER_RANGE,
        };
        enemy.attack = Some(attack);

        match read_action(ctx)? {
            CombatAction::Attack => {
                if let Strike::PlayerDied = player_attacks(ctx, enemy, round) {
                    return Ok(FightEnd::PlayerDied);
                }
            }
            CombatAction::Flee => {
                if tried_to_flee {
                    ctx.frontend.say("You've already tried to flee and failed, keep fighting.");
                } else if enemy_count > 1 {
                    ctx.frontend.say("You cannot flee during an encounter with multiple enemies.");
                } else {
                    tried_to_flee = true;
                    let chance = ctx.flee.success_chance();
                    if ctx.dice.percent() < chance {
                        ctx.flee.record_escape();
                        ctx.frontend.say("You managed to escape. Continue your mission.");
                        log::debug!("fled at {chance}%, bonus now {}", ctx.flee.bonus());
                        return Ok(FightEnd::Fled);
                    }
                    ctx.frontend.say("You failed to escape, the battle continues.");
                    enemy_strikes(ctx, enemy, round.enemy_damage);
                }
            }
            CombatAction::UseItem => {
                inventory::use_item(ctx.player, ctx.frontend)?;
            }
        }
        ctx.frontend.blank();

        if ctx.player.health <= 0 || !ctx.player.alive {
            ctx.player.alive = false;
            ctx.frontend.line(&[
                ("You were defeated by the ", Tone::Danger),
                (&enemy.name, Tone::Info),
                (".", Tone::Danger),
            ]);
            return Ok(FightEnd::PlayerDied);
        }
        if enemy.health <= 0 {
            return Ok(FightEnd::Defeated);
        }
    }
}

fn read_action(ctx: &mut CombatContext<'_>) -> Result<CombatAction, GameError> {
    ctx.frontend.line(&[
        ("You have ", Tone::Plain),
        (&format!("{} health", ctx.player.health), Tone::Highlight),
        (".", Tone::Plain),
    ]);
    ctx.frontend.line(&[
        ("What would you like to do? ", Tone::Plain),
        ("(1) Fight, (2) Run, (3) Use Item", Tone::Info),
    ]);
    loop {
        let answer = ctx.frontend.prompt()?;
        if let Some(action) = CombatAction::parse(&answer) {
            return Ok(action);
        }
        ctx.frontend.clear_last_lines(1);
    }
}

fn player_attacks(ctx: &mut CombatContext<'_>, enemy: &mut Enemy, round: Round) -> Strike {
    ctx.frontend.line(&[
        ("You attempt to attack the ", Tone::Plain),
        (&enemy.name, Tone::Info),
        (".", Tone::Plain),
    ]);

    if ctx.player.weapon.ammo == 0 {
        if let Some(ammo) = ctx.player.first_ammo().cloned() {
            ctx.player.weapon.reload(ammo.value);
            ctx.player.remove_item(&ammo);
            let weapon = ctx.player.weapon.name.clone();
            ctx.frontend.line(&[
                ("You were out of ammo. You quickly used the ", Tone::Plain),
                (&ammo.name, Tone::Highlight),
                (" and added ", Tone::Plain),
                (&format!("{} ammo", ammo.value), Tone::Highlight),
                (" to your ", Tone::Plain),
                (&weapon, Tone::Highlight),
                (".", Tone::Plain),
            ]);
        } else {
            let weapon = ctx.player.weapon.name.clone();
            ctx.frontend.line(&[
                ("You ran out of ammo for your ", Tone::Plain),
                (&weapon, Tone::Highlight),
                ("...", Tone::Plain),
            ]);
            if ctx.dice.coin() {
                ctx.frontend.say("You escaped the enemy's reach for now. Keep your head down.");
                return Strike::Continue;
            }
            ctx.frontend.say("You failed to get away and the enemy overpowered you.");
            ctx.player.alive = false;
            log::debug!("player died out of ammo");
            return Strike::PlayerDied;
        }
    }

    let hit_roll = ctx.dice.percent();
    if hit_roll <= HIT_BASE_CHANCE + round.accuracy {
        enemy.health -= round.player_damage;
        ctx.frontend.line(&[
            ("You hit the ", Tone::Plain),
            (&enemy.name, Tone::Info),
            (" for ", Tone::Plain),
            (&format!("{} damage", round.player_damage), Tone::Highlight),
            (".", Tone::Plain),
        ]);
    } else {
        ctx.frontend.line(&[
            ("Your attack ", Tone::Plain),
            ("missed", Tone::Danger),
            (" the ", Tone::Plain),
            (&enemy.name, Tone::Info),
            (".", Tone::Plain),
        ]);
    }
    ctx.player.weapon.spend_round();

    if enemy.health > 0 {
        enemy_strikes(ctx, enemy, round.enemy_damage);
    }
    Strike::Continue
}

fn enemy_strikes(ctx: &mut CombatContext<'_>, enemy: &Enemy, damage: i32) {
    ctx.frontend.line(&[
        ("The ", Tone::Plain),
        (&enemy.name, Tone::Info),
        (" has ", Tone::Plain),
        (&format!("{} health", enemy.health), Tone::Highlight),
        (".", Tone::Plain),
    ]);
    ctx.frontend.line(&[
        ("The ", Tone::Plain),
        (&enemy.name, Tone::Info),
        (" attempts to attack you with its ", Tone::Plain),
        (enemy.attack_name(), Tone::Highlight),
        (".", Tone::Plain),
    ]);
    if ctx.dice.roll(1, COUNTER_DIE_SIDES) <= COUNTER_MISS_FACE {
        ctx.frontend.line(&[
            ("The ", Tone::Plain),
            (&enemy.name, Tone::Info),
            (" couldn't hit you.", Tone::Plain),
        ]);
    } else {
        ctx.player.take_damage(damage);
        ctx.frontend.line(&[
            ("You got hit for ", Tone::Plain),
            (&format!("{damage} damage"), Tone::Highlight),
            (".", Tone::Plain),
        ]);
    }
}
