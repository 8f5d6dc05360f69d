//! Schedule monotonicity property tests.

use lf_schedule::Machine;
use lf_schedule::machine::{
    Ceremony, CeremonyStep, CeremonyTrigger, Countdown, Ladder, Pursuit, PursuitTrigger, Rung,
};
use proptest::prelude::*;

/// Fire every trigger and check that progress never goes down and that a
/// terminal machine stays put.
fn assert_forward_only<M: Machine>(machine: &mut M, triggers: Vec<M::Trigger>) {
    let mut progress = machine.progress();
    let mut terminal_state = None;
    for trigger in triggers {
        let t = machine.fire(trigger);
        assert!(machine.progress() >= progress, "regressed from {:?} to {:?}", t.from, t.to);
        progress = machine.progress();
        if let Some(state) = terminal_state {
            assert_eq!(machine.state(), state);
        } else if machine.is_terminal() {
            terminal_state = Some(machine.state());
        }
    }
}

proptest! {
    #[test]
    fn countdown_never_regresses(triggers in prop::collection::vec(prop::option::of(0u32..5), 0..30)) {
        let mut cd = Countdown::new();
        assert_forward_only(&mut cd, triggers);
    }

    #[test]
    fn ladder_never_regresses(mut times in prop::collection::vec(0u64..200, 0..30)) {
        times.sort_unstable();
        let mut ladder = Ladder::new(vec![
            Rung::new("fed", 20),
            Rung::new("hungry", 10),
            Rung::new("faint", 5),
            Rung::new("starved", 0),
        ]);
        assert_forward_only(&mut ladder, times);
    }

    #[test]
    fn pursuit_never_regresses(rooms in prop::collection::vec(0u8..5, 0..30), escape_at in 0usize..40) {
        let mut pursuit = Pursuit::new().allow_once(1);
        let mut triggers = vec![PursuitTrigger::Begin { from: Some(0), at: 1 }];
        for (i, room) in rooms.into_iter().enumerate() {
            if i == escape_at {
                triggers.push(PursuitTrigger::Escape);
            }
            triggers.push(PursuitTrigger::Turn(room));
        }
        assert_forward_only(&mut pursuit, triggers);
    }

    #[test]
    fn ceremony_never_regresses(codes in prop::collection::vec(0u8..3, 0..30)) {
        let mut ceremony = Ceremony::new(vec![
            CeremonyStep::new("closing", 2).forgiving(),
            CeremonyStep::new("rising", 3),
        ]);
        let triggers = codes
            .into_iter()
            .map(|c| match c {
                0 => CeremonyTrigger::Begin,
                1 => CeremonyTrigger::Tick,
                _ => CeremonyTrigger::Interrupt,
            })
            .collect();
        assert_forward_only(&mut ceremony, triggers);
    }
}

#[test]
fn reset_is_the_only_way_back() {
    let mut cd = Countdown::new();
    cd.start(1);
    cd.tick();
    assert!(cd.is_terminal());
    cd.reset();
    assert_eq!(cd.progress(), 0);
}
