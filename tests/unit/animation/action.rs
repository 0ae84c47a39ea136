use std::cell::Cell;

use super::*;

fn counter() -> (Rc<Cell<u32>>, Action) {
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    (hits, Action::run(move || h.set(h.get() + 1)))
}

fn fire_all(callbacks: Vec<ActionCallback>) {
    for cb in callbacks {
        cb();
    }
}

#[test]
fn sequence_duration_sums_steps() {
    let (_, run) = counter();
    let seq = Action::sequence([
        Action::fade_in(0.25),
        Action::wait(1.0),
        Action::fade_out(0.5),
        run,
    ]);
    assert_eq!(seq.duration_secs(), 1.75);
}

#[test]
fn fade_interpolates_from_current_alpha() {
    let mut runner = ActionRunner::default();
    runner.run(Action::fade_in(1.0), None);

    let mut alpha = 0.0;
    assert!(runner.advance(0.25, &mut alpha).is_empty());
    assert_eq!(alpha, 0.25);
    runner.advance(0.25, &mut alpha);
    assert_eq!(alpha, 0.5);
    runner.advance(1.0, &mut alpha);
    assert_eq!(alpha, 1.0);
    assert!(runner.is_empty());
}

#[test]
fn eased_fade_follows_curve() {
    let mut runner = ActionRunner::default();
    runner.run(Action::fade_in(1.0).with_ease(Ease::InQuad), None);
    let mut alpha = 0.0;
    runner.advance(0.5, &mut alpha);
    assert_eq!(alpha, 0.25);
}

#[test]
fn leftover_time_carries_into_next_step() {
    let (hits, run) = counter();
    let mut runner = ActionRunner::default();
    runner.run(
        Action::sequence([Action::wait(0.5), Action::fade_out(1.0), run]),
        None,
    );

    let mut alpha = 1.0;
    runner.advance(1.0, &mut alpha);
    assert_eq!(alpha, 0.5);

    fire_all(runner.advance(0.5, &mut alpha));
    assert_eq!(alpha, 0.0);
    assert_eq!(hits.get(), 1);
    assert!(runner.is_empty());
}

#[test]
fn callbacks_are_returned_not_invoked() {
    let (hits, run) = counter();
    let mut runner = ActionRunner::default();
    runner.run(run, None);
    let mut alpha = 1.0;
    let fired = runner.advance(0.0, &mut alpha);
    assert_eq!(hits.get(), 0);
    assert_eq!(fired.len(), 1);
    fire_all(fired);
    assert_eq!(hits.get(), 1);
}

#[test]
fn keyed_run_replaces_previous_action() {
    let (first_hits, first) = counter();
    let (second_hits, second) = counter();
    let mut runner = ActionRunner::default();
    runner.run(Action::sequence([Action::wait(1.0), first]), Some("k"));
    runner.run(Action::sequence([Action::wait(1.0), second]), Some("k"));
    assert_eq!(runner.len(), 1);
    assert!(runner.contains("k"));

    let mut alpha = 1.0;
    fire_all(runner.advance(2.0, &mut alpha));
    assert_eq!(first_hits.get(), 0);
    assert_eq!(second_hits.get(), 1);
    assert!(!runner.contains("k"));
}

#[test]
fn unkeyed_actions_stack_and_remove_only_matches_key() {
    let mut runner = ActionRunner::default();
    runner.run(Action::wait(1.0), None);
    runner.run(Action::wait(1.0), None);
    runner.run(Action::wait(1.0), Some("k"));
    assert_eq!(runner.len(), 3);
    assert!(runner.remove("k"));
    assert!(!runner.remove("k"));
    assert_eq!(runner.len(), 2);
    runner.clear();
    assert!(runner.is_empty());
}

#[test]
fn zero_length_steps_complete_immediately() {
    let mut runner = ActionRunner::default();
    runner.run(Action::sequence([Action::wait(0.0), Action::fade_out(0.0)]), None);
    let mut alpha = 1.0;
    runner.advance(0.0, &mut alpha);
    assert_eq!(alpha, 0.0);
    assert!(runner.is_empty());
}
