//! Stock activity definitions.

use probe_core::{
    ActionDefinition, ActivityDefinition, AvailabilityPolicy, LocationFilter, PriorityClass,
    TestSpec,
};

/// Action id of the secret-door reveal.
pub const REVEAL_DOOR: &str = "reveal-door";
/// Action id of the secret-door presence fallback.
pub const SENSE_PRESENCE: &str = "sense-presence";
/// Action id of the inscription discovery.
pub const READ_INSCRIPTION: &str = "read-inscription";
/// Action id of the inscription glimpse fallback.
pub const GLIMPSE_MARKINGS: &str = "glimpse-markings";

/// Secret door: a perception test against DC 15. On success the reveal
/// action fires once per door wall (walls tagged `door = secret`); when
/// every nearby door is already revealed, a per-actor fallback still lets
/// each scanner notice that something is off.
pub fn secret_door_activity() -> ActivityDefinition {
    ActivityDefinition::new("secret-door", "Secret Door", TestSpec::new("perception", Some(15)))
        .with_action(ActionDefinition::new(
            REVEAL_DOOR,
            LocationFilter::WallAttribute {
                key: "door".to_owned(),
                expected: "secret".to_owned(),
            },
            AvailabilityPolicy::PerWall,
            PriorityClass::Normal,
        ))
        .with_action(ActionDefinition::new(
            SENSE_PRESENCE,
            LocationFilter::Global,
            AvailabilityPolicy::PerActor,
            PriorityClass::Fallback,
        ))
}

/// Hidden inscription: an investigation test with no fixed threshold (the
/// host decides pass/fail). Discovery is keyed to grid cells so a token can
/// keep finding inscriptions in fresh spots; the fallback pairs cells with
/// actors so every investigator gets their own glimpse.
pub fn hidden_inscription_activity() -> ActivityDefinition {
    ActivityDefinition::new(
        "hidden-inscription",
        "Hidden Inscription",
        TestSpec::new("investigation", None),
    )
    .with_action(ActionDefinition::new(
        READ_INSCRIPTION,
        LocationFilter::Global,
        AvailabilityPolicy::PerGrid,
        PriorityClass::Normal,
    ))
    .with_action(ActionDefinition::new(
        GLIMPSE_MARKINGS,
        LocationFilter::Global,
        AvailabilityPolicy::Each,
        PriorityClass::Fallback,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_core::{ActionId, ActivityId};

    #[test]
    fn secret_door_orders_reveal_before_fallback() {
        let def = secret_door_activity();
        assert_eq!(def.id, ActivityId::from("secret-door"));
        assert_eq!(def.test.target, Some(15));
        assert_eq!(
            def.priority_groups,
            vec![PriorityClass::Normal, PriorityClass::Fallback]
        );

        let normal: Vec<_> = def.actions_in(PriorityClass::Normal).collect();
        assert_eq!(normal.len(), 1);
        assert_eq!(normal[0].id, ActionId::from(REVEAL_DOOR));
        assert_eq!(normal[0].policy, AvailabilityPolicy::PerWall);
        assert!(matches!(
            normal[0].filter,
            LocationFilter::WallAttribute { .. }
        ));

        let fallback: Vec<_> = def.actions_in(PriorityClass::Fallback).collect();
        assert_eq!(fallback.len(), 1);
        assert_eq!(fallback[0].id, ActionId::from(SENSE_PRESENCE));
        assert_eq!(fallback[0].policy, AvailabilityPolicy::PerActor);
    }

    #[test]
    fn hidden_inscription_is_grid_keyed() {
        let def = hidden_inscription_activity();
        assert_eq!(def.test.kind, "investigation");
        assert_eq!(def.test.target, None);

        let normal: Vec<_> = def.actions_in(PriorityClass::Normal).collect();
        assert_eq!(normal[0].policy, AvailabilityPolicy::PerGrid);

        let fallback: Vec<_> = def.actions_in(PriorityClass::Fallback).collect();
        assert_eq!(fallback[0].policy, AvailabilityPolicy::Each);
    }
}
