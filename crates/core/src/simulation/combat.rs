//! Attack scheduling, hit resolution, opposed rolls, damage and healing.
//! This module exists to keep the combat flow apart from movement and bookkeeping.

use super::*;
use crate::attack::AttackShapeMarker;
use crate::character::DamageOutcome;
use crate::types::tag_union;

/// Result of one opposed attack roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub attack_total: i32,
    pub defense_total: i32,
    pub shifts: i32,
    pub damage: Option<DamageOutcome>,
}

impl Simulation {
    /// Starts the wind-up of an attack with `skill`, or the configured default skill.
    /// Returns `false` without changing anything if an attack is already in flight or the
    /// actor is taken out.
    pub fn schedule_attack(
        &mut self,
        actor: ActorId,
        skill: Option<&str>,
    ) -> Result<bool, CommandError> {
        let skill = skill.unwrap_or(self.config.default_attack_skill.as_str()).to_string();
        self.rulebook.skill(&skill)?;

        let character = self.character_mut(actor)?;
        if character.scheduled_attack.is_active() || character.is_taken_out {
            return Ok(false);
        }
        let phase = 0.5 / character.attack_speed();
        let shape = character.attack_shape();
        character.scheduled_attack.start(shape, skill.as_str(), phase, phase);
        let scheduled = SimEvent::AttackScheduled { actor, skill, windup: phase, winddown: phase };
        self.events.push(scheduled);
        Ok(true)
    }

    /// Interrupts the actor's attack. Returns `false` when none was active.
    pub fn stop_attack(&mut self, actor: ActorId) -> Result<bool, CommandError> {
        let character = self.character_mut(actor)?;
        if !character.scheduled_attack.is_active() {
            return Ok(false);
        }
        let completed = character.scheduled_attack.is_finished();
        character.scheduled_attack.stop();
        self.events.push(SimEvent::AttackStopped { actor, completed });
        Ok(true)
    }

    /// Registered enemies, by the attacker's enemy types, inside the attack shape. The
    /// scheduled shape is used when an attack is in flight, the current one otherwise;
    /// either way it is oriented with the attacker's rotation right now.
    pub fn enemies_in_attack_shape(
        &self,
        attacker: ActorId,
    ) -> Result<Vec<ActorId>, CommandError> {
        let character = self.character(attacker)?;
        let rotation = character.transform.rotation;
        let shape: Vec<AttackShapeMarker> = if character.scheduled_attack.is_active() {
            character.scheduled_attack.applied_shape(rotation)
        } else {
            let mut shape = character.attack_shape();
            shape.iter_mut().for_each(|marker| marker.apply(rotation));
            shape
        };
        let origin = character.position();

        Ok(self
            .game_master
            .characters_of_type(&character.enemies)
            .into_iter()
            .filter(|id| *id != attacker)
            .filter_map(|id| self.game_master.actor(id))
            .filter(|enemy| !enemy.is_taken_out)
            .filter(|enemy| {
                shape.iter().any(|marker| marker.contains(origin, enemy.position(), enemy.radius))
            })
            .map(|enemy| enemy.id)
            .collect())
    }

    pub(super) fn resolve_attack(&mut self, attacker: ActorId) -> Result<(), CommandError> {
        let targets = self.enemies_in_attack_shape(attacker)?;
        let skill = self.character(attacker)?.scheduled_attack.skill().to_string();
        log::debug!("{attacker:?} resolves {skill} against {} target(s)", targets.len());
        self.events.push(SimEvent::AttackResolved { attacker, targets: targets.clone() });
        for defender in targets {
            self.attack(attacker, defender, &skill, None)?;
        }
        Ok(())
    }

    /// One opposed exchange. The attacker rolls first, then the defender picks its best
    /// opposing skill and rolls. Positive shifts deal `shifts + weapon damage`; taking the
    /// defender out grants the attacker XP equal to the defender's build cost.
    pub fn attack(
        &mut self,
        attacker: ActorId,
        defender: ActorId,
        skill: &str,
        stunt: Option<&str>,
    ) -> Result<AttackOutcome, CommandError> {
        let rulebook = Arc::clone(&self.rulebook);
        let opposing = rulebook.opposing_skills(skill)?;
        let current_tags = self.game_master.current_tags().to_vec();

        let target = self.character(defender)?;
        let attack_context = tag_union(&target.tags, &current_tags);
        let source = self.character(attacker)?;
        let defense_context = tag_union(&source.tags, &current_tags);
        let skill_value = source.skill_value(skill, &attack_context);
        let stunt = stunt.and_then(|name| source.stunt(name)).cloned();
        let weapon_damage = source.damage();

        let roll = self.dice.roll();
        let mut attack_total = skill_value + roll;
        if let Some(stunt) = stunt {
            attack_total += stunt.bonus;
            self.events.push(SimEvent::StuntUsed {
                actor: attacker,
                stunt: stunt.name,
                bonus: stunt.bonus,
            });
        }
        let source = self.character_mut(attacker)?;
        let spin = mem::take(&mut source.spin);
        if spin > 0 {
            attack_total += spin;
            self.events.push(SimEvent::SpinUsed { actor: attacker, amount: spin });
        }
        self.events.push(SimEvent::AttackRolled {
            attacker,
            defender,
            skill: skill.to_string(),
            skill_value,
            roll,
            total: attack_total,
        });

        let (defense_skill, defense_value) = self
            .character(defender)?
            .best_defense(opposing, &defense_context)
            .map_or((None, 0), |(skill, value)| (Some(skill.to_string()), value));
        let defense_roll = self.dice.roll();
        let defense_total = defense_value + defense_roll;
        let shifts = attack_total - defense_total;
        self.events.push(SimEvent::DefenseRolled {
            attacker,
            defender,
            skill: defense_skill,
            skill_value: defense_value,
            roll: defense_roll,
            total: defense_total,
            shifts,
        });

        if shifts < -1 {
            let gained = shifts / -2;
            self.character_mut(defender)?.spin += gained;
            self.events.push(SimEvent::SpinGained { actor: defender, amount: gained });
        }

        let mut damage = None;
        if shifts > 0 {
            let was_taken_out = self.character(defender)?.is_taken_out;
            let outcome = self.apply_damage(defender, shifts + weapon_damage)?;
            if !was_taken_out && self.character(defender)?.is_taken_out {
                let cost = self.character(defender)?.cost();
                self.receive_xp(attacker, cost)?;
            }
            damage = Some(outcome);
        }

        Ok(AttackOutcome { attack_total, defense_total, shifts, damage })
    }

    /// Runs `incoming` through protection, stress and consequences, raising the matching
    /// event. Being taken out also interrupts the actor's own attack.
    pub fn apply_damage(
        &mut self,
        actor: ActorId,
        incoming: i32,
    ) -> Result<DamageOutcome, CommandError> {
        let effect = self.config.consequence_effect.to_aspect();
        let character = self.character_mut(actor)?;
        let was_taken_out = character.is_taken_out;
        let outcome = character.receive_damage(incoming, &effect);
        let newly_taken_out = !was_taken_out && character.is_taken_out;
        let interrupted = newly_taken_out && character.scheduled_attack.is_active();
        if interrupted {
            character.scheduled_attack.stop();
        }
        if newly_taken_out {
            log::info!("{} is taken out", character.name);
        }

        match &outcome {
            DamageOutcome::Stress { amount, stress } => {
                self.events.push(SimEvent::PhysicalStressChanged {
                    actor,
                    amount: *amount,
                    stress: *stress,
                });
            }
            DamageOutcome::Consequence { name, damage } => {
                self.events.push(SimEvent::ConsequenceTaken {
                    actor,
                    consequence: name.clone(),
                    damage: *damage,
                });
            }
            DamageOutcome::TakenOut { .. } => {
                if interrupted {
                    self.events.push(SimEvent::AttackStopped { actor, completed: false });
                }
                if newly_taken_out {
                    self.events.push(SimEvent::TakenOut { actor });
                }
            }
        }
        Ok(outcome)
    }

    /// Adds XP, raising a level event when a boundary is crossed. Returns levels gained.
    pub fn receive_xp(&mut self, actor: ActorId, amount: u32) -> Result<u32, CommandError> {
        let character = self.character_mut(actor)?;
        let gained = character.receive_xp(amount);
        let level = character.level();
        self.events.push(SimEvent::XpReceived { actor, amount });
        if gained > 0 {
            self.events.push(SimEvent::LevelReached { actor, level });
        }
        Ok(gained)
    }

    /// Healer rolls the healing skill against the current tags; meeting the consequence's
    /// capacity clears it. Returns whether it was cleared. A consequence that is missing
    /// or not taken is left alone and nothing is rolled.
    pub fn heal(
        &mut self,
        healer: ActorId,
        patient: ActorId,
        consequence: &str,
    ) -> Result<bool, CommandError> {
        let current_tags = self.game_master.current_tags().to_vec();
        let skill_value =
            self.character(healer)?.skill_value(&self.config.healing_skill, &current_tags);
        let target = self.character(patient)?;
        let Some(slot) = target.find_consequence_slot(consequence) else {
            return Ok(false);
        };
        let Some(capacity) = target.consequence(&slot).filter(|c| c.is_taken).map(|c| c.capacity)
        else {
            return Ok(false);
        };

        let roll = self.dice.roll();
        let total = skill_value + roll;
        let success = total >= capacity;
        if success && let Some(taken) = self.character_mut(patient)?.consequence_mut(&slot) {
            taken.clear();
        }
        self.events.push(SimEvent::Healed {
            healer,
            patient,
            consequence: consequence.to_string(),
            total,
            success,
        });
        Ok(success)
    }
}
