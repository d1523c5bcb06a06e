//! Query payload routed through the game's broker.
use std::fmt;

/// Identifier of a creature within one [`Game`](crate::Game).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureId(pub u32);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Attribute a [`Query`] asks about.
///
/// This is a closed set: adding an interceptable attribute means adding a
/// variant here and a getter on [`Creature`](crate::Creature).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum QueryKind {
    Attack,
    Defense,
}

/// A read of one creature attribute, open to interception.
///
/// Built fresh for every attribute read with `value` set to the creature's
/// base value. Handlers transform `value` in place; `creature` and `kind` are
/// only read.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    pub creature: CreatureId,
    pub kind: QueryKind,
    pub value: i32,
}

impl Query {
    pub fn new(creature: CreatureId, kind: QueryKind, value: i32) -> Self {
        Self {
            creature,
            kind,
            value,
        }
    }

    /// Returns true if this query reads `kind` of `creature`.
    #[inline]
    pub fn targets(&self, creature: CreatureId, kind: QueryKind) -> bool {
        self.creature == creature && self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("attack".parse::<QueryKind>(), Ok(QueryKind::Attack));
        assert_eq!("DEFENSE".parse::<QueryKind>(), Ok(QueryKind::Defense));
        assert!("speed".parse::<QueryKind>().is_err());
        assert_eq!(QueryKind::Defense.to_string(), "defense");
    }

    #[test]
    fn targets_requires_both_creature_and_kind() {
        let query = Query::new(CreatureId(1), QueryKind::Attack, 3);

        assert!(query.targets(CreatureId(1), QueryKind::Attack));
        assert!(!query.targets(CreatureId(2), QueryKind::Attack));
        assert!(!query.targets(CreatureId(1), QueryKind::Defense));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn query_serializes_kind_in_snake_case() {
        let query = Query::new(CreatureId(4), QueryKind::Defense, 2);
        let json = serde_json::to_value(&query).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "creature": 4, "kind": "defense", "value": 2 })
        );
    }
}
