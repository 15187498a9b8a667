//! Integration tests for the full generation pipeline.

use delve::{
    monster_for, ContentKind, Generator, Roller, ScriptedRoller, SeededRoller, SpaceId, Treasure,
};

/// Appends the rolls for one chamber that resolves to a rectangle with
/// four exits, all of whose doors come up as archways.
fn push_four_exit_chamber(script: &mut Vec<u32>) {
    script.extend([13, 16]); // shape: rectangle 30x40, exit sub-roll -> 4
    script.push(15); // reserved content roll
    script.push(9); // treasure roll (kind + container)
    script.extend([4, 5]); // percentile for the primary monster
    script.extend([3, 9]); // trap, stairs
    for _ in 0..4 {
        script.extend([1, 11]); // archway door + its trap re-roll
    }
}

/// Fisher-Yates rolls that rotate a pool of five chambers with four exits
/// each into [c5 c5 c5 c5 c1 c1 c1 c1 c2 ... c4 c4 c4 c4], an arrangement
/// the greedy assignment drains completely.
fn push_rotating_shuffle(script: &mut Vec<u32>) {
    script.extend([13, 14, 15, 16]);
    script.extend([9, 10, 11, 12]);
    script.extend([5, 6, 7, 8]);
    script.extend([1, 2, 3, 4]);
    script.extend([4, 3, 2]);
}

#[test]
fn test_five_chambers_with_four_exits_each() {
    let mut script = Vec::new();
    for _ in 0..5 {
        push_four_exit_chamber(&mut script);
    }
    push_rotating_shuffle(&mut script);
    // Ten passages, each with two archway boundary doors and two forced
    // straight sections.
    for _ in 0..10 {
        script.extend([1, 11, 1, 11]);
    }

    let mut roller = ScriptedRoller::new(script);
    let mut generator = Generator::new();
    generator.create_chambers(5, &mut roller).unwrap();
    for chamber in generator.dungeon().chambers() {
        assert_eq!(chamber.shape().exits(), 4);
        assert_eq!(chamber.door_count(), 4);
    }

    generator.build_slot_pool(&mut roller);
    assert_eq!(generator.slot_pool().len(), 20);

    generator.assign_chambers();
    assert!(generator.slot_pool().is_empty());
    assert_eq!(generator.paired_doors().len(), 20);
    for id in generator.dungeon().chamber_ids() {
        let chamber = generator.dungeon().chamber(id).unwrap();
        for &door in chamber.doors() {
            let target = generator.door_target(door).expect("door left unassigned");
            assert_ne!(target, id);
        }
    }

    generator.create_passages(&mut roller);
    assert_eq!(generator.passage_count(), 10);
    assert_eq!(roller.remaining(), 0);
}

#[test]
fn test_seeded_pipeline_invariants() {
    for seed in [1, 42, 1234, 987654321] {
        let mut roller = SeededRoller::new(seed);
        let mut generator = Generator::new();
        generator.generate(6, &mut roller).unwrap();

        assert_eq!(generator.chamber_count(), 6);
        for chamber in generator.dungeon().chambers() {
            assert!(chamber.shape().is_rectangular());
            assert!((2..=4).contains(&chamber.shape().exits()));
            assert_eq!(chamber.door_count() as u32, chamber.shape().exits());
            assert_eq!(chamber.contents(), ContentKind::MonsterAndTreasure);
        }

        for door in generator.dungeon().doors() {
            if door.is_archway() {
                assert!(door.is_open());
                assert!(!door.is_locked());
                assert!(!door.is_trapped());
            }
            if door.is_locked() {
                assert!(!door.is_open());
            }
        }

        for id in generator.dungeon().chamber_ids() {
            let chamber = generator.dungeon().chamber(id).unwrap();
            for &door in chamber.doors() {
                if let Some(target) = generator.door_target(door) {
                    assert_ne!(target, id);
                }
            }
        }

        assert_eq!(
            generator.passage_count(),
            generator.paired_doors().len() / 2
        );
    }
}

#[test]
fn test_descriptions_are_stable_without_mutation() {
    let mut roller = SeededRoller::new(2718);
    let mut generator = Generator::new();
    generator.generate(4, &mut roller).unwrap();

    for chamber in generator.dungeon().chambers() {
        assert_eq!(chamber.description(), chamber.description());
    }
    for passage in generator.dungeon().passages() {
        assert_eq!(passage.description(), passage.description());
    }
    for door in generator.dungeon().doors() {
        assert_eq!(door.description(), door.description());
    }
    assert_eq!(
        generator.linked_doors_report(),
        generator.linked_doors_report()
    );
}

#[test]
fn test_post_generation_edits_through_the_dungeon() {
    let mut roller = SeededRoller::new(11);
    let mut generator = Generator::new();
    generator.generate(3, &mut roller).unwrap();

    let id = generator.dungeon().chamber_ids().next().unwrap();
    let before = generator.dungeon().chamber(id).unwrap().treasures().len();

    let chamber = generator.dungeon_mut().chamber_mut(id).unwrap();
    chamber.add_treasure(Treasure::from_roll(92));
    chamber.add_monster(monster_for(roller.percentile()));

    let chamber = generator.dungeon().chamber(id).unwrap();
    assert_eq!(chamber.treasures().len(), before + 1);
    assert_eq!(chamber.monsters().len(), 1);

    let chamber = generator.dungeon_mut().chamber_mut(id).unwrap();
    chamber.remove_treasure(before).unwrap();
    chamber.remove_monster(0).unwrap();

    let chamber = generator.dungeon().chamber(id).unwrap();
    assert_eq!(chamber.treasures().len(), before);
    assert!(chamber.monsters().is_empty());
}

#[test]
fn test_chamber_doors_know_their_owning_space() {
    let mut roller = SeededRoller::new(64);
    let mut generator = Generator::new();
    generator.generate(4, &mut roller).unwrap();

    for id in generator.dungeon().chamber_ids() {
        let chamber = generator.dungeon().chamber(id).unwrap();
        for &door_id in chamber.doors() {
            let door = generator.dungeon().door(door_id).unwrap();
            assert_eq!(door.spaces(), &[SpaceId::Chamber(id)]);
        }
    }
}

#[test]
fn test_dungeon_serializes_to_json() {
    let mut roller = SeededRoller::new(3);
    let mut generator = Generator::new();
    generator.generate(2, &mut roller).unwrap();

    let json = serde_json::to_string(generator.dungeon()).unwrap();
    let restored: delve::Dungeon = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.chamber_count(), 2);
    assert_eq!(restored.door_count(), generator.dungeon().door_count());
}
