//! Property-based tests for the self-play state machine
//!
//! A run is simulated by feeding generated replies through the pure
//! transition function, executing only the invoke effects.

use super::*;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

struct Simulation {
    turns: Vec<DialogueTurn>,
    final_state: SelfPlayState,
    examiner_inputs: Vec<String>,
    begun_iterations: Vec<u32>,
}

/// Drive a run where the examiner and subject answer from the given scripts.
fn simulate(max_iterations: u32, examiner: &[String], subject: &[String]) -> Simulation {
    let context = SelfPlayContext::new(max_iterations);
    let mut result = start(&context, "Hi how can I help you?");
    let mut examiner = examiner.iter();
    let mut subject = subject.iter();

    let mut turns = Vec::new();
    let mut examiner_inputs = Vec::new();
    let mut begun_iterations = Vec::new();

    loop {
        let mut next_event = None;
        for effect in result.effects {
            match effect {
                Effect::BeginIteration { iteration } => begun_iterations.push(iteration),
                Effect::RecordTurn(turn) => turns.push(turn),
                Effect::InvokeExaminer { input } => {
                    examiner_inputs.push(input);
                    let text = examiner.next().expect("examiner script too short").clone();
                    next_event = Some(Event::ExaminerReplied { text });
                }
                Effect::InvokeSubject { .. } => {
                    let text = subject.next().expect("subject script too short").clone();
                    next_event = Some(Event::SubjectReplied { text });
                }
                Effect::Finish { .. } => {}
            }
        }

        match next_event {
            Some(event) => {
                result = transition(&result.new_state, &context, event)
                    .expect("scripted run never produces an invalid transition");
            }
            None => {
                return Simulation {
                    turns,
                    final_state: result.new_state,
                    examiner_inputs,
                    begun_iterations,
                }
            }
        }
    }
}

fn count(turns: &[DialogueTurn], role: Role) -> usize {
    turns.iter().filter(|t| t.role == role).count()
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_reply() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Z ?.]{0,30}",
        1 => "[a-zA-Z ]{0,10}".prop_map(|s| format!("{s} <STOP>")),
    ]
}

fn arb_script() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_reply(), 8)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn turns_alternate_starting_with_examiner(
        max in 0u32..6,
        examiner in arb_script(),
        subject in arb_script(),
    ) {
        let sim = simulate(max, &examiner, &subject);
        for (i, turn) in sim.turns.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::Examiner } else { Role::Subject };
            prop_assert_eq!(turn.role, expected);
        }
    }

    #[test]
    fn examiner_turns_bounded_by_iterations(
        max in 0u32..6,
        examiner in arb_script(),
        subject in arb_script(),
    ) {
        let sim = simulate(max, &examiner, &subject);
        let examiner_turns = count(&sim.turns, Role::Examiner);
        let subject_turns = count(&sim.turns, Role::Subject);

        prop_assert!(examiner_turns <= max as usize);
        prop_assert!(subject_turns <= examiner_turns);
        prop_assert!(examiner_turns - subject_turns <= 1);
        prop_assert_eq!(sim.begun_iterations.len(), examiner_turns);
    }

    #[test]
    fn run_always_terminates_with_consistent_reason(
        max in 0u32..6,
        examiner in arb_script(),
        subject in arb_script(),
    ) {
        let sim = simulate(max, &examiner, &subject);
        let examiner_turns = count(&sim.turns, Role::Examiner);
        let subject_turns = count(&sim.turns, Role::Subject);

        match sim.final_state {
            SelfPlayState::Terminated { reason: StopReason::StopToken } => {
                let last = sim.turns.last().expect("stop requires an examiner turn");
                prop_assert_eq!(last.role, Role::Examiner);
                prop_assert!(last.content.contains(STOP_TOKEN));
                prop_assert_eq!(subject_turns + 1, examiner_turns);
            }
            SelfPlayState::Terminated { reason: StopReason::IterationsExhausted } => {
                prop_assert_eq!(examiner_turns, max as usize);
                prop_assert_eq!(subject_turns, max as usize);
                prop_assert!(sim.turns.iter().all(|t| !t.content.contains(STOP_TOKEN)));
            }
            other => prop_assert!(false, "run ended in non-terminal state {:?}", other),
        }
    }

    #[test]
    fn examiner_hears_previous_subject_reply(
        max in 1u32..6,
        examiner in arb_script(),
        subject in arb_script(),
    ) {
        let sim = simulate(max, &examiner, &subject);
        prop_assert_eq!(sim.examiner_inputs[0].as_str(), "Hi how can I help you?");

        let subject_replies: Vec<_> = sim
            .turns
            .iter()
            .filter(|t| t.role == Role::Subject)
            .map(|t| t.content.clone())
            .collect();
        for (input, reply) in sim.examiner_inputs.iter().skip(1).zip(&subject_replies) {
            prop_assert_eq!(input, reply);
        }
    }
}

#[test]
fn stop_on_second_examiner_turn() {
    let examiner = vec![
        "What's the weather in New York?".to_string(),
        "Great, thanks! <STOP>".to_string(),
    ];
    let subject = vec!["It is sunny and 25 degrees.".to_string()];

    let sim = simulate(3, &examiner, &subject);
    assert_eq!(count(&sim.turns, Role::Examiner), 2);
    assert_eq!(count(&sim.turns, Role::Subject), 1);
    assert_eq!(
        sim.final_state,
        SelfPlayState::Terminated {
            reason: StopReason::StopToken
        }
    );
}
