use wumpus_core::belief::{BeliefState, ObservationCtx, ObservationReport};
use wumpus_core::config::WorldConfig;
use wumpus_core::model::cell::Cell;
use wumpus_core::model::direction::Direction;
use wumpus_core::model::hazard::{HazardKind, HazardLabel};
use wumpus_core::model::percept::{AgentPose, Percepts};

/// Boustrophedon walk over the 4x4 cave starting at (1,1).
fn snake_path() -> Vec<AgentPose> {
    let mut path = Vec::new();
    for row in 1..=4u8 {
        let cols: Vec<u8> = if row % 2 == 1 {
            (1..=4).collect()
        } else {
            (1..=4).rev().collect()
        };
        let heading = if row % 2 == 1 {
            Direction::East
        } else {
            Direction::West
        };
        for col in cols {
            path.push(AgentPose::new(Cell::new(row, col), heading));
        }
    }
    path
}

fn scripted_percepts(seed: u32, turn: usize) -> Percepts {
    let bits = seed.rotate_left(turn as u32 * 3);
    Percepts {
        breeze: bits & 0b001 != 0,
        stench: bits & 0b010 != 0,
        ..Percepts::NONE
    }
}

fn assert_partition_covers_grid(belief: &BeliefState) {
    let partition = belief.partition();
    let known = partition.known();
    let frontier = partition.frontier();
    let unknown = partition.unknown();
    assert!(known.is_disjoint(frontier));
    assert!(known.is_disjoint(unknown));
    assert!(frontier.is_disjoint(unknown));
    assert_eq!(known.len() + frontier.len() + unknown.len(), 16);
    for cell in Cell::all(4) {
        assert!(partition.region(cell).is_some(), "{cell} missing");
    }
}

fn assert_monotone(before: &BeliefState, after: &BeliefState) {
    for kind in [HazardKind::Pit, HazardKind::Wumpus] {
        for (cell, old) in before.grid(kind).iter() {
            let new = after.grid(kind).label(cell);
            match old {
                HazardLabel::Danger => assert_eq!(new, HazardLabel::Danger, "{kind} {cell}"),
                HazardLabel::Safe => assert_eq!(new, HazardLabel::Safe, "{kind} {cell}"),
                HazardLabel::Possible => {}
            }
        }
    }
}

#[test]
fn invariants_hold_across_scripted_walks() {
    for seed in [0u32, 0x5555_5555, 0xA5A5_A5A5, 0x1234_5678, 0xFFFF_FFFF, 0x0F0F_0F0F] {
        let mut belief = BeliefState::new(WorldConfig::default());
        assert_partition_covers_grid(&belief);
        assert_eq!(belief.pits().label(Cell::START), HazardLabel::Safe);
        assert_eq!(belief.wumpus().label(Cell::START), HazardLabel::Safe);

        for (turn, pose) in snake_path().into_iter().enumerate() {
            let before = belief.clone();
            let ctx = ObservationCtx {
                arrow_shot_last_turn: turn % 5 == 4,
            };
            let report: ObservationReport = belief
                .observe_with(&scripted_percepts(seed, turn), &pose, &ctx)
                .expect("pose on grid");

            assert_partition_covers_grid(&belief);
            assert_eq!(belief.pits().label(Cell::START), HazardLabel::Safe);
            assert_eq!(belief.wumpus().label(Cell::START), HazardLabel::Safe);
            assert_monotone(&before, &belief);

            assert_eq!(
                usize::from(belief.pits_found() - before.pits_found()),
                report.pits_deduced.len()
            );
            assert!(report.pits_deduced.len() <= 1);
            assert!(belief.pits().count(HazardLabel::Danger) <= 2);
            if belief.pits_found() >= 2 {
                assert_eq!(belief.pits().count(HazardLabel::Possible), 0);
            }
            if belief.wumpus_found() {
                assert_eq!(belief.wumpus().count(HazardLabel::Danger), 1);
                assert_eq!(belief.wumpus().count(HazardLabel::Possible), 0);
            }
        }
        assert_eq!(belief.partition().known_count(), 16);
        assert!(belief.partition().frontier().is_empty());
    }
}

#[test]
fn quiet_walk_leaves_visited_cells_safe() {
    let mut belief = BeliefState::new(WorldConfig::default());
    for pose in snake_path().into_iter().take(4) {
        belief.observe(&Percepts::NONE, &pose).expect("pose on grid");
    }
    for col in 1..=4 {
        assert_eq!(belief.pits().label(Cell::new(2, col)), HazardLabel::Safe);
        assert_eq!(belief.wumpus().label(Cell::new(2, col)), HazardLabel::Safe);
    }
    assert_eq!(belief.pits().label(Cell::new(3, 1)), HazardLabel::Possible);
}
