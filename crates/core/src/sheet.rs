//! Character-sheet value types: resource tracks, aspects, stunts and consequences.

use serde::{Deserialize, Serialize};

/// Tag that makes an aspect apply in every situation.
pub const ANY_TAG: &str = "any";

/// A bounded numeric resource such as physical stress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

impl Attribute {
    pub const fn new(value: i32, min: i32, max: i32) -> Self {
        Self { value, min, max }
    }

    pub const fn would_overflow(&self, amount: i32) -> bool {
        self.value.saturating_add(amount) > self.max
    }

    pub fn add(&mut self, amount: i32) {
        self.value = self.value.saturating_add(amount).clamp(self.min, self.max.max(self.min));
    }
}

/// Tag-conditioned skill modifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aspect {
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub bonus: i32,
    /// Situations the aspect applies in, next to any `#tag` written in the description.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Aspect {
    pub fn new(description: impl Into<String>, skills: &[&str], bonus: i32) -> Self {
        Self {
            description: description.into(),
            skills: skills.iter().map(|skill| skill.to_string()).collect(),
            bonus,
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|tag| tag.to_string()).collect();
        self
    }

    pub fn affects(&self, skill: &str) -> bool {
        self.skills.iter().any(|candidate| candidate == skill)
    }

    pub fn applicability_tags(&self) -> Vec<String> {
        let mut tags = self.tags.clone();
        for tag in hashtags(&self.description) {
            if !tags.iter().any(|known| known == tag) {
                tags.push(tag.to_string());
            }
        }
        tags
    }

    /// Number of applicability tags found in `context`. `#any` always counts.
    pub fn matches(&self, context: &[String]) -> usize {
        self.applicability_tags()
            .iter()
            .filter(|tag| tag.as_str() == ANY_TAG || context.contains(tag))
            .count()
    }
}

fn hashtags(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace().filter_map(|word| {
        let tag = word
            .strip_prefix('#')?
            .trim_end_matches(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'));
        (!tag.is_empty()).then_some(tag)
    })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stunt {
    pub name: String,
    pub bonus: i32,
}

impl Stunt {
    pub fn new(name: impl Into<String>, bonus: i32) -> Self {
        Self { name: name.into(), bonus }
    }
}

/// Damage-absorption slot. Once taken it carries a standing aspect until healed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consequence {
    pub name: String,
    pub capacity: i32,
    #[serde(default)]
    pub is_taken: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Aspect>,
}

impl Consequence {
    pub fn new(name: impl Into<String>, capacity: i32) -> Self {
        Self { name: name.into(), capacity, is_taken: false, effect: None }
    }

    pub fn can_absorb(&self, damage: i32) -> bool {
        !self.is_taken && damage <= self.capacity
    }

    pub fn take(&mut self, effect: Aspect) {
        self.is_taken = true;
        self.effect = Some(effect);
    }

    pub fn clear(&mut self) {
        self.is_taken = false;
        self.effect = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn description_hashtags_count_as_applicability_tags() {
        let aspect = Aspect::new("Hunter of the #forest, at home in the #dark.", &["Archery"], 2);
        assert_eq!(aspect.applicability_tags(), context(&["forest", "dark"]));
        assert_eq!(aspect.matches(&context(&["dark", "forest", "wet"])), 2);
        assert_eq!(aspect.matches(&context(&["cavern"])), 0);
    }

    #[test]
    fn explicit_tags_and_hashtags_are_deduplicated() {
        let aspect = Aspect::new("Fights best in the #dark", &[], 1).with_tags(&["dark", "wet"]);
        assert_eq!(aspect.applicability_tags(), context(&["dark", "wet"]));
    }

    #[test]
    fn any_tag_matches_every_context() {
        let aspect = Aspect::new("Bruised ribs affect #any skill.", &["MeleeCombat"], -1);
        assert_eq!(aspect.matches(&[]), 1);
        assert!(aspect.affects("MeleeCombat"));
        assert!(!aspect.affects("Athletics"));
    }

    #[test]
    fn untagged_aspect_never_matches() {
        let aspect = Aspect::new("Plain words", &["Athletics"], 3);
        assert_eq!(aspect.matches(&context(&["dark"])), 0);
    }

    #[test]
    fn consequence_absorbs_only_when_free_and_large_enough() {
        let mut consequence = Consequence::new("Mild", 2);
        assert!(consequence.can_absorb(2));
        assert!(!consequence.can_absorb(3));

        consequence.take(Aspect::new("Winded", &["Athletics"], -1));
        assert!(!consequence.can_absorb(1));
        assert!(consequence.effect.is_some());

        consequence.clear();
        assert!(consequence.can_absorb(1));
        assert!(consequence.effect.is_none());
    }

    #[test]
    fn attribute_overflow_is_strictly_above_max() {
        let mut stress = Attribute::new(1, 0, 3);
        assert!(!stress.would_overflow(2));
        assert!(stress.would_overflow(3));
        stress.add(2);
        assert_eq!(stress.value, 3);
    }
}
