//! Data-driven activity and action definitions.
//!
//! An activity is a registered interactive capability ("secret door",
//! "hidden inscription") with one or more actions. Definitions are plain
//! configuration records resolved by registry lookup: location filters and
//! availability policies are tagged enums, so registration stays purely
//! declarative and no subclassing or virtual dispatch is involved.

mod availability;

pub use availability::{action_available, activity_available};

use std::collections::BTreeSet;

use crate::env::WallOracle;
use crate::hitarea::HitArea;
use crate::ids::{ActionId, ActivityId, ActorId, CellId};

/// Execution order class of an action. Normal actions run first; fallback
/// actions only run when no normal action succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PriorityClass {
    Normal,
    Fallback,
}

/// Rule governing whether an action can still trigger given the
/// accumulated result history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AvailabilityPolicy {
    /// Usable any number of times.
    Always,
    /// Usable while no result exists at all.
    Once,
    /// Usable while some hit cell was never part of a prior result.
    PerGrid,
    /// Usable while some hit wall was never part of a prior result.
    PerWall,
    /// Usable once per actor.
    PerActor,
    /// Usable while some (cell or wall, actor) pairing is new.
    Each,
}

/// Which entities of a hit area an action applies to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationFilter {
    /// The whole hit area.
    Global,
    /// Only the listed cells.
    Cells(BTreeSet<CellId>),
    /// Only walls whose host attribute `key` equals `expected`.
    WallAttribute { key: String, expected: String },
}

impl LocationFilter {
    /// Narrows a hit area to the entities matching this filter.
    ///
    /// Wall-attribute filters need the wall oracle for the attribute
    /// lookup; without one no wall matches.
    pub fn apply(&self, area: &HitArea, walls: Option<&dyn WallOracle>) -> HitArea {
        match self {
            LocationFilter::Global => area.clone(),
            LocationFilter::Cells(cells) => HitArea {
                cell_ids: area.cell_ids.intersection(cells).copied().collect(),
                wall_ids: BTreeSet::new(),
                tile_ids: BTreeSet::new(),
                polygon: area.polygon.clone(),
            },
            LocationFilter::WallAttribute { key, expected } => HitArea {
                cell_ids: BTreeSet::new(),
                wall_ids: area
                    .wall_ids
                    .iter()
                    .filter(|id| {
                        walls
                            .and_then(|w| w.attribute(id, key))
                            .is_some_and(|value| &value == expected)
                    })
                    .cloned()
                    .collect(),
                tile_ids: BTreeSet::new(),
                polygon: area.polygon.clone(),
            },
        }
    }
}

/// What the host should roll or prompt for before actions run. Opaque to
/// the core; interpreted by the test/prompt service.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestSpec {
    /// Host-side test kind, e.g. `"perception"`.
    pub kind: String,
    /// Threshold the roll is compared against, when the kind has one.
    pub target: Option<i32>,
}

impl TestSpec {
    pub fn new(kind: impl Into<String>, target: Option<i32>) -> Self {
        Self {
            kind: kind.into(),
            target,
        }
    }
}

/// Resolved outcome of a test prompt. Absence of an outcome (the user
/// closed the dialog) is modeled as `Option::None` at the service boundary,
/// never as a variant here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestOutcome {
    pub value: i32,
    pub passed: bool,
}

/// Stateless definition of one concrete effect within an activity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDefinition {
    pub id: ActionId,
    pub filter: LocationFilter,
    pub policy: AvailabilityPolicy,
    pub priority: PriorityClass,
}

impl ActionDefinition {
    pub fn new(
        id: impl Into<ActionId>,
        filter: LocationFilter,
        policy: AvailabilityPolicy,
        priority: PriorityClass,
    ) -> Self {
        Self {
            id: id.into(),
            filter,
            policy,
            priority,
        }
    }
}

/// Declarative definition of a registered activity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityDefinition {
    pub id: ActivityId,
    pub name: String,
    /// Priority classes in execution order.
    pub priority_groups: Vec<PriorityClass>,
    pub actions: Vec<ActionDefinition>,
    pub test: TestSpec,
}

impl ActivityDefinition {
    pub fn new(id: impl Into<ActivityId>, name: impl Into<String>, test: TestSpec) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority_groups: vec![PriorityClass::Normal, PriorityClass::Fallback],
            actions: Vec::new(),
            test,
        }
    }

    pub fn with_priority_groups(mut self, groups: Vec<PriorityClass>) -> Self {
        self.priority_groups = groups;
        self
    }

    pub fn with_action(mut self, action: ActionDefinition) -> Self {
        self.actions.push(action);
        self
    }

    /// Actions belonging to one priority class, in definition order.
    pub fn actions_in(&self, class: PriorityClass) -> impl Iterator<Item = &ActionDefinition> {
        self.actions.iter().filter(move |a| a.priority == class)
    }
}

/// Append-only record of one completed activity execution, persisted per
/// activity per scene.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityResult {
    pub outcome: TestOutcome,
    pub hit_area: HitArea,
    pub actor: ActorId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::ids::WallId;
    use crate::sweep::WallRef;
    use std::str::FromStr;

    #[test]
    fn policy_names_round_trip() {
        assert_eq!(AvailabilityPolicy::PerGrid.to_string(), "per_grid");
        assert_eq!(
            AvailabilityPolicy::from_str("per_wall").unwrap(),
            AvailabilityPolicy::PerWall
        );
        assert_eq!(PriorityClass::Fallback.to_string(), "fallback");
    }

    #[test]
    fn cells_filter_keeps_only_listed_cells() {
        let mut area = HitArea::default();
        area.cell_ids.insert(CellId::new(1, 1));
        area.cell_ids.insert(CellId::new(2, 2));
        area.wall_ids.insert(WallId::from("w1"));

        let filter = LocationFilter::Cells([CellId::new(2, 2)].into());
        let scoped = filter.apply(&area, None);
        assert_eq!(scoped.cell_ids, [CellId::new(2, 2)].into());
        assert!(scoped.wall_ids.is_empty());
    }

    #[derive(Debug)]
    struct DoorWalls;

    impl WallOracle for DoorWalls {
        fn walls_near(&self, _region: &Bounds) -> Vec<WallRef> {
            Vec::new()
        }

        fn attribute(&self, wall: &WallId, key: &str) -> Option<String> {
            (wall.as_str() == "w-door" && key == "door").then(|| "secret".to_owned())
        }
    }

    #[test]
    fn wall_attribute_filter_consults_the_oracle() {
        let mut area = HitArea::default();
        area.wall_ids.insert(WallId::from("w-door"));
        area.wall_ids.insert(WallId::from("w-plain"));
        area.cell_ids.insert(CellId::new(0, 0));

        let filter = LocationFilter::WallAttribute {
            key: "door".to_owned(),
            expected: "secret".to_owned(),
        };
        let scoped = filter.apply(&area, Some(&DoorWalls));
        assert_eq!(scoped.wall_ids, [WallId::from("w-door")].into());
        assert!(scoped.cell_ids.is_empty());

        // No oracle: nothing matches a wall-attribute filter.
        let blind = filter.apply(&area, None);
        assert!(blind.wall_ids.is_empty());
    }

    #[test]
    fn definition_builder_collects_actions() {
        let def = ActivityDefinition::new("secret-door", "Secret Door", TestSpec::new("perception", Some(15)))
            .with_action(ActionDefinition::new(
                "reveal",
                LocationFilter::Global,
                AvailabilityPolicy::PerWall,
                PriorityClass::Normal,
            ))
            .with_action(ActionDefinition::new(
                "hint",
                LocationFilter::Global,
                AvailabilityPolicy::PerActor,
                PriorityClass::Fallback,
            ));
        assert_eq!(def.actions_in(PriorityClass::Normal).count(), 1);
        assert_eq!(def.actions_in(PriorityClass::Fallback).count(), 1);
        assert_eq!(def.priority_groups, vec![PriorityClass::Normal, PriorityClass::Fallback]);
    }
}
