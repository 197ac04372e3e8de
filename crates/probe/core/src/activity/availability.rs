//! Availability policy engine.
//!
//! Pure functions deciding, per activity and per action, whether a trigger
//! is still usable given the accumulated result history and the current hit
//! area. The empty hit area short-circuits everything: proximity must have
//! found something for any activity to trigger.

use crate::activity::{ActionDefinition, ActivityDefinition, ActivityResult, AvailabilityPolicy};
use crate::hitarea::HitArea;
use crate::ids::ActorId;

/// Whether a single action is still usable.
pub fn action_available(
    action: &ActionDefinition,
    area: &HitArea,
    actor: &ActorId,
    history: &[ActivityResult],
) -> bool {
    if area.is_empty() {
        return false;
    }
    match action.policy {
        AvailabilityPolicy::Always => true,
        AvailabilityPolicy::Once => history.is_empty(),
        AvailabilityPolicy::PerActor => history.iter().all(|r| &r.actor != actor),
        AvailabilityPolicy::PerGrid => area.cell_ids.iter().any(|cell| {
            !history
                .iter()
                .any(|r| r.hit_area.cell_ids.contains(cell))
        }),
        AvailabilityPolicy::PerWall => area.wall_ids.iter().any(|wall| {
            !history
                .iter()
                .any(|r| r.hit_area.wall_ids.contains(wall))
        }),
        AvailabilityPolicy::Each => {
            // A hit area without walls defers entirely to grid pairings.
            let new_cell = area.cell_ids.iter().any(|cell| {
                !history
                    .iter()
                    .any(|r| &r.actor == actor && r.hit_area.cell_ids.contains(cell))
            });
            let new_wall = area.wall_ids.iter().any(|wall| {
                !history
                    .iter()
                    .any(|r| &r.actor == actor && r.hit_area.wall_ids.contains(wall))
            });
            new_cell || new_wall
        }
    }
}

/// An activity is available iff any of its actions, in any priority group,
/// is available.
pub fn activity_available(
    definition: &ActivityDefinition,
    area: &HitArea,
    actor: &ActorId,
    history: &[ActivityResult],
) -> bool {
    definition.priority_groups.iter().any(|&class| {
        definition
            .actions_in(class)
            .any(|action| action_available(action, area, actor, history))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{LocationFilter, PriorityClass, TestOutcome, TestSpec};
    use crate::ids::{CellId, WallId};

    fn area_with_cells(cells: &[(i32, i32)]) -> HitArea {
        let mut area = HitArea::default();
        for &(x, y) in cells {
            area.cell_ids.insert(CellId::new(x, y));
        }
        area
    }

    fn result(actor: &str, area: HitArea) -> ActivityResult {
        ActivityResult {
            outcome: TestOutcome {
                value: 12,
                passed: true,
            },
            hit_area: area,
            actor: ActorId::from(actor),
        }
    }

    fn action(policy: AvailabilityPolicy) -> ActionDefinition {
        ActionDefinition::new("a", LocationFilter::Global, policy, PriorityClass::Normal)
    }

    #[test]
    fn empty_hit_area_is_unavailable_for_every_policy() {
        let empty = HitArea::default();
        let actor = ActorId::from("pc-1");
        for policy in [
            AvailabilityPolicy::Always,
            AvailabilityPolicy::Once,
            AvailabilityPolicy::PerGrid,
            AvailabilityPolicy::PerWall,
            AvailabilityPolicy::PerActor,
            AvailabilityPolicy::Each,
        ] {
            assert!(
                !action_available(&action(policy), &empty, &actor, &[]),
                "{policy} must be unavailable on an empty hit area"
            );
        }
    }

    #[test]
    fn always_stays_available() {
        let area = area_with_cells(&[(1, 1)]);
        let actor = ActorId::from("pc-1");
        let history = vec![result("pc-1", area_with_cells(&[(1, 1)]))];
        assert!(action_available(&action(AvailabilityPolicy::Always), &area, &actor, &history));
    }

    #[test]
    fn once_blocks_after_a_single_result() {
        let area = area_with_cells(&[(1, 1)]);
        let actor = ActorId::from("pc-1");
        let other = ActorId::from("pc-2");
        let act = action(AvailabilityPolicy::Once);
        assert!(action_available(&act, &area, &actor, &[]));
        let history = vec![result("pc-1", area_with_cells(&[(9, 9)]))];
        assert!(!action_available(&act, &area, &actor, &history));
        // Regardless of actor or hit area.
        assert!(!action_available(&act, &area, &other, &history));
    }

    #[test]
    fn per_actor_tracks_actors_independently() {
        let area = area_with_cells(&[(1, 1)]);
        let act = action(AvailabilityPolicy::PerActor);
        let history = vec![result("pc-1", area_with_cells(&[(1, 1)]))];
        assert!(!action_available(&act, &area, &ActorId::from("pc-1"), &history));
        assert!(action_available(&act, &area, &ActorId::from("pc-2"), &history));
    }

    #[test]
    fn per_grid_needs_a_fresh_cell() {
        let act = action(AvailabilityPolicy::PerGrid);
        let actor = ActorId::from("pc-1");
        let history = vec![result("pc-1", area_with_cells(&[(1, 1)]))];
        assert!(!action_available(&act, &area_with_cells(&[(1, 1)]), &actor, &history));
        assert!(action_available(
            &act,
            &area_with_cells(&[(1, 1), (2, 2)]),
            &actor,
            &history
        ));
    }

    #[test]
    fn per_wall_needs_a_fresh_wall() {
        let act = action(AvailabilityPolicy::PerWall);
        let actor = ActorId::from("pc-1");

        let mut seen = HitArea::default();
        seen.wall_ids.insert(WallId::from("w1"));
        let history = vec![result("pc-1", seen)];

        let mut same = HitArea::default();
        same.wall_ids.insert(WallId::from("w1"));
        assert!(!action_available(&act, &same, &actor, &history));

        let mut fresh = same.clone();
        fresh.wall_ids.insert(WallId::from("w2"));
        assert!(action_available(&act, &fresh, &actor, &history));

        // No walls at all: wall-keyed policy cannot be satisfied.
        let cells_only = area_with_cells(&[(3, 3)]);
        assert!(!action_available(&act, &cells_only, &actor, &history));
    }

    #[test]
    fn each_pairs_entities_with_actors() {
        let act = action(AvailabilityPolicy::Each);
        let history = vec![result("pc-1", area_with_cells(&[(1, 1)]))];
        // Same actor, same cell: spent.
        assert!(!action_available(
            &act,
            &area_with_cells(&[(1, 1)]),
            &ActorId::from("pc-1"),
            &history
        ));
        // Same cell, new actor: fresh pairing.
        assert!(action_available(
            &act,
            &area_with_cells(&[(1, 1)]),
            &ActorId::from("pc-2"),
            &history
        ));
        // Same actor, new cell: fresh pairing.
        assert!(action_available(
            &act,
            &area_with_cells(&[(1, 1), (2, 2)]),
            &ActorId::from("pc-1"),
            &history
        ));
    }

    #[test]
    fn activity_is_available_when_any_action_is() {
        let def = ActivityDefinition::new("act", "Activity", TestSpec::new("perception", None))
            .with_action(ActionDefinition::new(
                "spent",
                LocationFilter::Global,
                AvailabilityPolicy::Once,
                PriorityClass::Normal,
            ))
            .with_action(ActionDefinition::new(
                "open",
                LocationFilter::Global,
                AvailabilityPolicy::Always,
                PriorityClass::Fallback,
            ));
        let area = area_with_cells(&[(0, 0)]);
        let actor = ActorId::from("pc-1");
        let history = vec![result("pc-1", area_with_cells(&[(0, 0)]))];
        // "spent" is blocked by the history, "open" keeps the activity alive.
        assert!(activity_available(&def, &area, &actor, &history));

        let only_once = ActivityDefinition::new("o", "Once", TestSpec::new("perception", None))
            .with_action(ActionDefinition::new(
                "spent",
                LocationFilter::Global,
                AvailabilityPolicy::Once,
                PriorityClass::Normal,
            ));
        assert!(!activity_available(&only_once, &area, &actor, &history));
    }
}
