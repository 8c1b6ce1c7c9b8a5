//! End-to-end replay tests for the cache: a registry fed a realistic
//! burst of decoded gateway deltas, read back through every surface.
//!
//! Covers the behaviors unit tests can't see in isolation:
//! - sorted channel views staying identical across arrival orders
//! - long-lived handles surviving replacement and deletion of their target
//! - voice occupancy reconciling against member state applied later

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use parlance_cache::{CacheRegistry, SpaceEvent};
use parlance_types::{
    Channel, ChannelId, ChannelKind, Member, SpaceId, SpaceProfile, UserId,
};

const SPACE: SpaceId = SpaceId::new(4000);

fn seed_registry() -> CacheRegistry {
    let registry = CacheRegistry::new();
    registry.create_space(SPACE, SpaceProfile::new("harbor", UserId::new(1)));
    registry
}

fn channel_fixtures() -> Vec<Channel> {
    let social = ChannelId::new(900);
    vec![
        Channel::new(social, "social", ChannelKind::Category).with_position(0),
        Channel::new(ChannelId::new(10), "general", ChannelKind::Text)
            .with_position(0)
            .with_parent(social),
        Channel::new(ChannelId::new(5), "welcome", ChannelKind::Text)
            .with_position(0)
            .with_parent(social),
        Channel::new(ChannelId::new(20), "announcements", ChannelKind::Announcement)
            .with_position(1),
        Channel::new(ChannelId::new(30), "lounge", ChannelKind::Voice)
            .with_position(0)
            .with_parent(social),
        Channel::new(ChannelId::new(31), "stage", ChannelKind::Stage).with_position(1),
    ]
}

#[test]
fn sorted_view_is_arrival_order_independent() {
    let mut baseline: Option<Vec<ChannelId>> = None;
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let registry = seed_registry();
        let mut fixtures = channel_fixtures();
        fixtures.shuffle(&mut rng);
        for channel in fixtures {
            registry
                .apply(SPACE, SpaceEvent::ChannelCreated { channel })
                .unwrap();
        }

        let order: Vec<ChannelId> = registry
            .space(&SPACE)
            .unwrap()
            .sorted_channels()
            .iter()
            .map(|c| c.id)
            .collect();

        match &baseline {
            None => baseline = Some(order),
            Some(expected) => assert_eq!(&order, expected),
        }
    }

    // Text ties on position break by id, voice follows text, the
    // category comes last.
    assert_eq!(
        baseline.unwrap(),
        vec![
            ChannelId::new(5),
            ChannelId::new(10),
            ChannelId::new(20),
            ChannelId::new(30),
            ChannelId::new(31),
            ChannelId::new(900),
        ]
    );
}

#[test]
fn handles_survive_replacement_and_deletion() {
    let registry = seed_registry();
    for channel in channel_fixtures() {
        registry
            .apply(SPACE, SpaceEvent::ChannelCreated { channel })
            .unwrap();
    }
    let space = registry.space(&SPACE).unwrap();

    let general = space.channel(ChannelId::new(10)).unwrap();
    let mut category = space.category_ref(&general).unwrap();
    let mut channel = space.channel_ref(ChannelId::new(10));

    // Replacement: both handles re-pin to the fresh records.
    registry
        .apply(
            SPACE,
            SpaceEvent::ChannelUpdated {
                channel: Channel::new(ChannelId::new(900), "community", ChannelKind::Category)
                    .with_position(0),
            },
        )
        .unwrap();
    registry
        .apply(
            SPACE,
            SpaceEvent::ChannelUpdated {
                channel: Channel::new(ChannelId::new(10), "general-v2", ChannelKind::Text)
                    .with_position(0)
                    .with_parent(ChannelId::new(900)),
            },
        )
        .unwrap();
    assert_eq!(category.resolve(space.channels()).unwrap().name, "community");
    assert_eq!(channel.resolve(space.channels()).unwrap().name, "general-v2");

    // Deletion: handles keep their last good values.
    registry
        .apply(
            SPACE,
            SpaceEvent::ChannelDeleted {
                id: ChannelId::new(900),
            },
        )
        .unwrap();
    registry
        .apply(
            SPACE,
            SpaceEvent::ChannelDeleted {
                id: ChannelId::new(10),
            },
        )
        .unwrap();
    assert_eq!(category.resolve(space.channels()).unwrap().name, "community");
    assert_eq!(channel.resolve(space.channels()).unwrap().name, "general-v2");

    // A handle minted after the deletion has nothing to fall back on.
    let mut too_late = space.channel_ref(ChannelId::new(10));
    assert!(too_late.resolve(space.channels()).is_none());
}

#[test]
fn voice_occupancy_reconciles_with_late_member_state() {
    let registry = seed_registry();
    let lounge = ChannelId::new(30);
    registry
        .apply(
            SPACE,
            SpaceEvent::ChannelCreated {
                channel: Channel::new(lounge, "lounge", ChannelKind::Voice).with_position(0),
            },
        )
        .unwrap();

    // Two connects arrive before any membership data beyond the payload.
    for (id, name) in [(7u64, "ada"), (8, "grace")] {
        registry
            .apply(
                SPACE,
                SpaceEvent::VoiceJoined {
                    channel_id: lounge,
                    member: Member::new(UserId::new(id), name),
                },
            )
            .unwrap();
    }
    let space = registry.space(&SPACE).unwrap();
    assert_eq!(space.occupants(lounge).len(), 2);

    // Member state catches up with a nickname; the occupancy read
    // reflects it without any voice event in between.
    registry
        .apply(
            SPACE,
            SpaceEvent::MemberUpdated {
                member: Member::new(UserId::new(7), "ada").with_nickname("countess"),
            },
        )
        .unwrap();
    let occupants = space.occupants(lounge);
    assert_eq!(occupants[&UserId::new(7)].display_name(), "countess");
    assert_eq!(occupants[&UserId::new(8)].display_name(), "grace");

    // One member departs the space entirely; the room still shows them
    // until their own disconnect lands.
    registry
        .apply(
            SPACE,
            SpaceEvent::MemberLeft {
                user_id: UserId::new(8),
            },
        )
        .unwrap();
    assert!(space.occupants(lounge).contains_key(&UserId::new(8)));

    registry
        .apply(
            SPACE,
            SpaceEvent::VoiceLeft {
                channel_id: lounge,
                user_id: UserId::new(8),
            },
        )
        .unwrap();
    let remaining = space.occupants(lounge);
    assert_eq!(remaining.len(), 1);
    assert!(remaining.contains_key(&UserId::new(7)));
}

#[test]
fn snapshots_are_immune_to_later_deltas() {
    let registry = seed_registry();
    let lounge = ChannelId::new(30);
    registry
        .apply(
            SPACE,
            SpaceEvent::VoiceJoined {
                channel_id: lounge,
                member: Member::new(UserId::new(7), "ada"),
            },
        )
        .unwrap();

    let space = registry.space(&SPACE).unwrap();
    let frozen = space.presence(lounge).unwrap();

    registry
        .apply(
            SPACE,
            SpaceEvent::VoiceJoined {
                channel_id: lounge,
                member: Member::new(UserId::new(8), "grace"),
            },
        )
        .unwrap();
    registry
        .apply(
            SPACE,
            SpaceEvent::VoiceLeft {
                channel_id: lounge,
                user_id: UserId::new(7),
            },
        )
        .unwrap();

    // The copy taken before the burst still shows exactly one occupant.
    assert_eq!(frozen.ids(), vec![UserId::new(7)]);
    assert_eq!(space.presence(lounge).unwrap().ids(), vec![UserId::new(8)]);
}
