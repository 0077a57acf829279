use proptest::prelude::*;
use tmd::{
    determinize, determinize_with_subsets, simulate, to_tm_decider, to_tm_decider_with,
    Configuration, Dfa, Halt, Nfa, TapeAlphabet, Verdict,
};

fn symbol() -> impl Strategy<Value = char> {
    prop_oneof![Just('a'), Just('b')]
}

fn label() -> impl Strategy<Value = Option<char>> {
    prop_oneof![Just(None), symbol().prop_map(Some)]
}

fn input() -> impl Strategy<Value = String> {
    proptest::collection::vec(symbol(), 0..8).prop_map(|symbols| symbols.into_iter().collect())
}

fn nfa() -> impl Strategy<Value = Nfa> {
    (1usize..6).prop_flat_map(|n| {
        (
            0..n,
            proptest::sample::subsequence((0..n).collect::<Vec<_>>(), 0..=n),
            proptest::collection::vec((0..n, label(), 0..n), 0..16),
        )
            .prop_map(move |(start, accept, edges)| {
                let mut nfa = Nfa::new(0..n, ['a', 'b'], start, accept);
                for (from, label, to) in edges {
                    nfa.add_transition(from, label, to);
                }
                nfa
            })
    })
}

/// DFAs with missing transitions, so the decider's reject routing is exercised.
fn partial_dfa() -> impl Strategy<Value = Dfa> {
    (1usize..5).prop_flat_map(|n| {
        (
            0..n,
            proptest::sample::subsequence((0..n).collect::<Vec<_>>(), 0..=n),
            proptest::collection::vec((0..n, symbol(), 0..n), 0..10),
        )
            .prop_map(move |(start, accept, edges)| {
                let mut dfa = Dfa::new(0..n, ['a', 'b'], start, accept);
                for (from, symbol, to) in edges {
                    dfa.add_transition(from, symbol, to);
                }
                dfa
            })
    })
}

fn ends_with_ab() -> Nfa {
    let mut nfa = Nfa::new([0, 1, 2], ['a', 'b'], 0, [2]);
    nfa.add_transition(0, 'a', 0);
    nfa.add_transition(0, 'a', 1);
    nfa.add_transition(0, 'b', 0);
    nfa.add_transition(1, 'b', 2);
    nfa
}

proptest! {
    #[test]
    fn determinized_table_is_total(nfa in nfa()) {
        let dfa = determinize(&nfa).expect("valid NFA determinizes");

        prop_assert_eq!(dfa.start, 0);
        prop_assert!(dfa.states.iter().copied().eq(0..dfa.states.len()));
        for &state in &dfa.states {
            for &symbol in &dfa.alphabet {
                let next = dfa.next(state, symbol);
                prop_assert!(next.is_some_and(|next| dfa.states.contains(&next)));
            }
        }
    }

    #[test]
    fn determinization_preserves_the_language(nfa in nfa(), inputs in proptest::collection::vec(input(), 1..10)) {
        let dfa = determinize(&nfa).expect("valid NFA determinizes");

        for input in inputs {
            prop_assert_eq!(dfa.accepts(&input), nfa.accepts(&input), "input {:?}", input);
        }
    }

    #[test]
    fn determinization_is_repeatable(nfa in nfa()) {
        let first = determinize(&nfa).expect("valid NFA determinizes");
        let second = determinize(&nfa.clone()).expect("valid NFA determinizes");

        prop_assert_eq!(first, second);
    }

    #[test]
    fn empty_subset_is_a_unique_dead_state(nfa in nfa()) {
        let (dfa, subsets) = determinize_with_subsets(&nfa).expect("valid NFA determinizes");
        let dead: Vec<usize> = subsets
            .iter()
            .enumerate()
            .filter(|(_, subset)| subset.is_empty())
            .map(|(index, _)| index)
            .collect();

        prop_assert!(dead.len() <= 1);
        for state in dead {
            prop_assert!(!dfa.is_accepting(state));
            for &symbol in &dfa.alphabet {
                prop_assert_eq!(dfa.next(state, symbol), Some(state));
            }
        }
    }

    #[test]
    fn decider_agrees_with_nfa(nfa in nfa(), input in input()) {
        let machine = to_tm_decider(&determinize(&nfa).expect("valid NFA determinizes"))
            .expect("decider builds");
        let execution = simulate(&machine, &input, None).expect("decider runs");

        prop_assert_eq!(execution.accepted(), nfa.accepts(&input));
    }

    #[test]
    fn decider_agrees_with_partial_dfa(dfa in partial_dfa(), input in input()) {
        let machine = to_tm_decider(&dfa).expect("decider builds");
        prop_assert!(machine.is_total());

        let execution = simulate(&machine, &input, None).expect("decider runs");
        let expected = if dfa.accepts(&input) { Verdict::Accept } else { Verdict::Reject };

        prop_assert_eq!(execution.verdict, expected);
        prop_assert!(matches!(execution.halt, Halt::Accepted | Halt::Rejected));
        prop_assert!(execution.trace.len() <= input.chars().count() + 2);
    }

    #[test]
    fn decider_never_rewrites_the_tape(nfa in nfa(), input in input()) {
        let machine = to_tm_decider(&determinize(&nfa).expect("valid NFA determinizes"))
            .expect("decider builds");
        let execution = simulate(&machine, &input, None).expect("decider runs");
        let tape: Vec<char> = input.chars().chain(['_']).collect();

        // One configuration per input symbol, one for the blank, one for the sink.
        prop_assert_eq!(execution.trace.len(), tape.len() + 1);
        for (step, configuration) in execution.trace.iter().enumerate() {
            prop_assert_eq!(&configuration.tape, &tape);
            prop_assert_eq!(configuration.head, step as isize);
        }
    }
}

#[test]
fn example_nfa_determinizes_to_three_states() {
    let dfa = determinize(&ends_with_ab()).unwrap();

    assert_eq!(dfa.states.len(), 3);
    assert_eq!(dfa.transitions.len(), 6);
    assert!(dfa.accepts("ab"));
    assert!(!dfa.accepts("abb"));
}

#[test]
fn example_decider_accepts_strings_ending_in_ab() {
    let machine = to_tm_decider(&determinize(&ends_with_ab()).unwrap()).unwrap();

    let execution = simulate(&machine, "ab", None).unwrap();
    assert_eq!(execution.verdict, Verdict::Accept);
    assert_eq!(
        execution.trace,
        vec![
            Configuration { state: 0, tape: vec!['a', 'b', '_'], head: 0 },
            Configuration { state: 1, tape: vec!['a', 'b', '_'], head: 1 },
            Configuration { state: 2, tape: vec!['a', 'b', '_'], head: 2 },
            Configuration { state: 3, tape: vec!['a', 'b', '_'], head: 3 },
        ]
    );

    // After "abb" the NFA is back in {0} alone.
    let execution = simulate(&machine, "abb", None).unwrap();
    assert_eq!(execution.verdict, Verdict::Reject);
    assert_eq!(execution.trace.last().map(|c| c.state), Some(machine.reject_state()));
}

#[test]
fn example_decider_rejects_empty_input_on_the_blank() {
    let machine = to_tm_decider(&determinize(&ends_with_ab()).unwrap()).unwrap();
    let execution = simulate(&machine, "", None).unwrap();

    assert_eq!(execution.verdict, Verdict::Reject);
    assert_eq!(execution.halt, Halt::Rejected);
    assert_eq!(execution.trace.len(), 2);
}

#[test]
fn epsilon_reachable_accept_state_accepts_empty_input() {
    let mut nfa = Nfa::new([0, 1, 2], ['a', 'b'], 0, [2]);
    nfa.add_epsilon(0, 1);
    nfa.add_epsilon(1, 2);
    nfa.add_transition(2, 'b', 0);

    let dfa = determinize(&nfa).unwrap();
    assert!(dfa.is_accepting(dfa.start));

    let execution = simulate(&to_tm_decider(&dfa).unwrap(), "", None).unwrap();
    assert_eq!(execution.verdict, Verdict::Accept);
}

#[test]
fn broader_outer_alphabet_rejects_foreign_symbols() {
    let mut nfa = Nfa::new([0], ['a'], 0, [0]);
    nfa.add_transition(0, 'a', 0);

    let dfa = determinize(&nfa).unwrap();
    let machine = to_tm_decider_with(&dfa, &TapeAlphabet::default()).unwrap();

    assert!(simulate(&machine, "aaa", None).unwrap().accepted());

    let execution = simulate(&machine, "aba", None).unwrap();
    assert_eq!(execution.verdict, Verdict::Reject);
    assert_eq!(execution.halt, Halt::Rejected);
}
