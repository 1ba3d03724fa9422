use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use wumpus_bot::TurnController;
use wumpus_core::config::WorldConfig;
use wumpus_core::model::cell::Cell;
use wumpus_core::model::direction::Direction;
use wumpus_core::model::percept::{AgentPose, Percepts};

fn warmed_controller(walk: &[(Percepts, AgentPose)]) -> TurnController {
    let mut controller =
        TurnController::new(WorldConfig::default()).expect("default world is valid");
    for (percepts, pose) in walk {
        controller
            .process(percepts, *pose)
            .expect("walk stays on the grid");
    }
    controller
}

fn bench_lookahead(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookahead_decision");

    let quiet = Percepts::NONE;
    let breeze = Percepts {
        breeze: true,
        ..Percepts::NONE
    };
    let cases: &[(&str, Vec<(Percepts, AgentPose)>, (Percepts, AgentPose))] = &[
        (
            "start",
            Vec::new(),
            (quiet, AgentPose::new(Cell::START, Direction::North)),
        ),
        (
            "column_walk",
            vec![
                (quiet, AgentPose::new(Cell::START, Direction::North)),
                (quiet, AgentPose::new(Cell::new(2, 1), Direction::North)),
            ],
            (breeze, AgentPose::new(Cell::new(3, 1), Direction::North)),
        ),
    ];

    for (label, walk, (percepts, pose)) in cases {
        group.bench_function(format!("depth5_{label}"), |b| {
            b.iter_batched(
                || warmed_controller(walk),
                |mut controller| controller.process(percepts, *pose).expect("valid pose"),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lookahead);
criterion_main!(benches);
