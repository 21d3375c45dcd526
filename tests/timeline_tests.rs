//! Timeline and scheduler integration tests.
//!
//! These tests verify the sequencing guarantees end to end: total order
//! within a timeline, exactly one action in flight, abort semantics, and the
//! condition-gated waits that bridge to the input layer.

mod common;

use common::{drain, RecordingSink, TestGame};
use revolver_core::core::GameContext;
use revolver_core::timeline::{Scheduler, Timeline};

use std::cell::RefCell;
use std::rc::Rc;

/// Every action runs exactly once, in declaration order, and the timeline
/// finishes afterwards.
#[test]
fn test_drain_runs_every_action_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut builder = Timeline::builder();
    for i in 0..8 {
        let log = Rc::clone(&log);
        builder = builder.run(move |_| log.borrow_mut().push(i));
    }
    let mut timeline = builder.build();

    let mut game = TestGame::new();
    drain(&mut timeline, &mut game, 0);

    assert_eq!(*log.borrow(), (0..8).collect::<Vec<_>>());
    assert!(timeline.is_finished());
}

/// An empty timeline is finished before any tick, and scheduling one does
/// not consume a frame.
#[test]
fn test_empty_timeline_finished_without_ticks() {
    let timeline = Timeline::new();
    assert!(timeline.is_finished());
    assert!(!timeline.has_started());

    let built = Timeline::builder().build();
    assert!(built.is_finished());
}

/// A later action never starts while an earlier one is unfinished: the
/// condition predicate of a wait sees the preceding mutation, and the
/// following action only runs after the wait resolves.
#[test]
fn test_strict_sequencing_across_wait() {
    let polls = Rc::new(RefCell::new(0u32));
    let polls_in_wait = Rc::clone(&polls);

    let mut game = TestGame::new();
    let mut timeline = Timeline::builder()
        .run(|ctx| ctx.game.gain_reserves(1))
        .wait_until(move |ctx| {
            *polls_in_wait.borrow_mut() += 1;
            // The first action's mutation is already visible while waiting.
            assert_eq!(ctx.game.current_round(), 1);
            ctx.game.poll_confirmation()
        })
        .run(|ctx| ctx.game.draw_cards(1))
        .build();

    let mut sink = RecordingSink::new();
    for frame in 0..3 {
        let mut ctx = GameContext::new(&mut game, &mut sink, frame * 16);
        timeline.tick(&mut ctx);
    }
    assert!(!timeline.is_finished());
    assert_eq!(game.drawn, 0);
    assert!(*polls.borrow() >= 3);

    game.queue_confirmation();
    let mut ctx = GameContext::new(&mut game, &mut sink, 64);
    timeline.tick(&mut ctx);
    drop(ctx);

    assert!(timeline.is_finished());
    assert_eq!(game.ops, vec!["gain_reserves:1", "draw_cards:1"]);
}

/// Aborting mid-drain ends the running sub-unit and never starts the rest.
#[test]
fn test_abort_mid_drain() {
    let mut game = TestGame::new();

    let inner = Timeline::builder()
        .run(|ctx| ctx.game.gain_reserves(1))
        .wait_until(|_| false)
        .run(|ctx| ctx.game.gain_reserves(100))
        .build();

    let mut timeline = Timeline::builder()
        .run(|ctx| ctx.game.draw_cards(1))
        .include_as_action(inner)
        .run(|ctx| ctx.game.draw_cards(100))
        .build();

    let mut sink = RecordingSink::new();
    let mut ctx = GameContext::new(&mut game, &mut sink, 0);
    timeline.tick(&mut ctx);
    assert!(!timeline.is_finished());

    timeline.abort(&mut ctx);
    drop(ctx);

    assert!(timeline.is_finished());
    // The stuck wait and everything after it never ran.
    assert_eq!(game.ops, vec!["draw_cards:1", "gain_reserves:1"]);
}

/// A timed confirmation wait expires as ordinary completion.
#[test]
fn test_confirmation_timeout_completes_timeline() {
    let mut game = TestGame::new();
    let mut timeline = Timeline::builder()
        .await_confirmation(Some(1_000))
        .run(|ctx| ctx.game.gain_reserves(1))
        .build();

    let end = drain(&mut timeline, &mut game, 0);
    assert!(end >= 1_000);
    assert_eq!(game.reserves, 1);
}

/// A confirmation input resolves the wait before the deadline.
#[test]
fn test_confirmation_resolves_wait() {
    let mut game = TestGame::new();
    game.queue_confirmation();

    let mut timeline = Timeline::builder()
        .await_confirmation(Some(60_000))
        .run(|ctx| ctx.game.gain_reserves(1))
        .build();

    let end = drain(&mut timeline, &mut game, 0);
    assert!(end < 1_000);
    assert_eq!(game.reserves, 1);
}

/// Animations block the timeline until the facade reports completion.
#[test]
fn test_animation_gates_progress() {
    let mut game = TestGame::new();
    game.hold_animations = true;

    let mut timeline = Timeline::builder()
        .animation("muzzle_flash")
        .run(|ctx| ctx.game.draw_cards(1))
        .build();

    let mut sink = RecordingSink::new();
    for frame in 0..5 {
        let mut ctx = GameContext::new(&mut game, &mut sink, frame * 16);
        timeline.tick(&mut ctx);
    }
    assert!(!timeline.is_finished());
    assert_eq!(game.drawn, 0);

    game.hold_animations = false;
    let mut ctx = GameContext::new(&mut game, &mut sink, 96);
    timeline.tick(&mut ctx);
    drop(ctx);

    assert!(timeline.is_finished());
    assert_eq!(game.drawn, 1);
}

/// Flattened inclusion and opaque inclusion execute identically when nothing
/// aborts; the difference is purely structural.
#[test]
fn test_include_and_include_as_action_same_observable_order() {
    let build_inner = || {
        Timeline::builder()
            .run(|ctx| ctx.game.gain_reserves(1))
            .run(|ctx| ctx.game.draw_cards(1))
            .build()
    };

    let mut flat_game = TestGame::new();
    let mut flat = Timeline::builder()
        .run(|ctx| ctx.game.add_player_cover(1))
        .include(build_inner())
        .build();
    drain(&mut flat, &mut flat_game, 0);

    let mut opaque_game = TestGame::new();
    let mut opaque = Timeline::builder()
        .run(|ctx| ctx.game.add_player_cover(1))
        .include_as_action(build_inner())
        .build();
    drain(&mut opaque, &mut opaque_game, 0);

    assert_eq!(flat_game.ops, opaque_game.ops);
    assert_eq!(flat.action_kinds().len(), 0);
}

/// The scheduler drains queued timelines strictly in submission order and
/// `clear` drops queued work without starting it.
#[test]
fn test_scheduler_order_and_teardown() {
    let mut game = TestGame::new();
    let mut scheduler = Scheduler::new();

    scheduler.enqueue(
        Timeline::builder()
            .run(|ctx| ctx.game.gain_reserves(1))
            .delay(50)
            .run(|ctx| ctx.game.gain_reserves(2))
            .build(),
    );
    scheduler.enqueue(Timeline::builder().run(|ctx| ctx.game.draw_cards(1)).build());

    let mut sink = RecordingSink::new();
    let mut now = 0;
    while !scheduler.is_idle() {
        let mut ctx = GameContext::new(&mut game, &mut sink, now);
        scheduler.tick(&mut ctx);
        now += 16;
    }

    assert_eq!(
        game.ops,
        vec!["gain_reserves:1", "gain_reserves:2", "draw_cards:1"]
    );

    // Teardown: queued work is dropped unstarted.
    scheduler.enqueue(Timeline::builder().wait_until(|_| false).build());
    scheduler.enqueue(Timeline::builder().run(|ctx| ctx.game.draw_cards(100)).build());
    let mut ctx = GameContext::new(&mut game, &mut sink, now);
    scheduler.tick(&mut ctx);
    scheduler.clear(&mut ctx);
    drop(ctx);

    assert!(scheduler.is_idle());
    assert_eq!(game.drawn, 1);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Draining a timeline of N instantaneous actions performs exactly N
        /// runs, in declaration order, for any N.
        #[test]
        fn drain_preserves_count_and_order(n in 0usize..32) {
            let log = Rc::new(RefCell::new(Vec::new()));
            let mut builder = Timeline::builder();
            for i in 0..n {
                let log = Rc::clone(&log);
                builder = builder.run(move |_| log.borrow_mut().push(i));
            }
            let mut timeline = builder.build();
            prop_assert_eq!(timeline.len(), n);
            prop_assert_eq!(timeline.is_finished(), n == 0);

            let mut game = TestGame::new();
            drain(&mut timeline, &mut game, 0);

            prop_assert_eq!(&*log.borrow(), &(0..n).collect::<Vec<_>>());
            prop_assert!(timeline.is_finished());
        }

        /// Splicing any two timelines preserves the concatenated action count.
        #[test]
        fn include_concatenates(a in 0usize..16, b in 0usize..16) {
            let mut first = Timeline::builder();
            for _ in 0..a {
                first = first.delay(1);
            }
            let mut second = Timeline::builder();
            for _ in 0..b {
                second = second.delay(1);
            }

            let combined = Timeline::builder()
                .include(first.build())
                .include(second.build())
                .build();
            prop_assert_eq!(combined.len(), a + b);
        }
    }
}
