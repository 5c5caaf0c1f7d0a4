//! Property tests: field validation, and every reversible operation followed
//! by undo is the identity.

use proptest::prelude::*;
use recordbook::{
    validate_email, validate_token, Effect, ErrorKind, Operation, Record, RecordStore, Runner,
};

fn name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,8}"
}

fn email() -> impl Strategy<Value = String> {
    "[a-z]{1,6}@[a-z]{1,6}\\.[a-z]{2,3}"
}

fn record() -> impl Strategy<Value = Record> {
    (name(), name(), email()).prop_map(|(a, b, c)| Record::new(a, b, c))
}

fn store(min: usize) -> impl Strategy<Value = RecordStore> {
    prop::collection::vec(record(), min..12).prop_map(RecordStore::from_records)
}

proptest! {
    #[test]
    fn generated_emails_are_valid(e in email()) {
        prop_assert!(validate_email(&e));
    }

    #[test]
    fn dotted_emails_are_valid(
        local in "[A-Za-z0-9_]{1,4}([.-][A-Za-z0-9_]{1,4}){0,3}",
        domain in "[A-Za-z0-9]{1,4}([.-][A-Za-z0-9]{1,4}){0,3}",
        suffix in "[a-z]{2,3}",
    ) {
        let email = format!("{local}@{domain}.{suffix}");
        prop_assert!(validate_email(&email), "{}", email);
    }

    #[test]
    fn separator_runs_are_rejected(
        left in "[a-z]{1,4}",
        right in "[a-z]{1,4}",
        run in "[.-]{2}",
        in_domain in any::<bool>(),
    ) {
        let email = if in_domain {
            format!("{left}@{left}{run}{right}.com")
        } else {
            format!("{left}{run}{right}@{right}.com")
        };
        prop_assert!(!validate_email(&email), "{}", email);
    }

    #[test]
    fn tokens_match_their_alphabet(s in "[A-Za-z0-9_@.\\- ]{0,8}") {
        let expected = !s.is_empty()
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        prop_assert_eq!(validate_token(&s), expected);
    }

    #[test]
    fn add_then_undo_is_identity(
        initial in store(0),
        (a, b, c) in (name(), name(), email()),
    ) {
        let mut runner = Runner::new(initial.clone());
        let report = runner.run(vec![
            Operation::add(format!("{a} {b} {c}")),
            Operation::undo(),
        ]);

        prop_assert_eq!(report.applied_count(), 2);
        prop_assert_eq!(runner.store(), &initial);
        prop_assert!(runner.history().is_empty());
    }

    #[test]
    fn update_then_undo_restores_record(
        (initial, position) in store(1).prop_flat_map(|s| {
            let len = s.len();
            (Just(s), 1..=len)
        }),
        replacement in record(),
    ) {
        let mut runner = Runner::new(initial.clone());
        let params = format!("{position} {replacement}");
        let report = runner.run(vec![Operation::update(params.as_str())]);
        prop_assert_eq!(report.applied_count(), 1);

        let report = runner.run(vec![Operation::undo()]);
        prop_assert_eq!(report.applied_count(), 1);
        prop_assert_eq!(runner.store(), &initial);
    }

    #[test]
    fn delete_then_undo_restores_order(
        (initial, position) in store(1).prop_flat_map(|s| {
            let len = s.len();
            (Just(s), 1..=len)
        }),
    ) {
        let mut runner = Runner::new(initial.clone());
        runner.run(vec![Operation::delete(position.to_string())]);
        prop_assert_eq!(runner.store().len(), initial.len() - 1);

        runner.run(vec![Operation::undo()]);
        prop_assert_eq!(runner.store(), &initial);
    }

    #[test]
    fn list_is_idempotent(initial in store(0)) {
        let mut runner = Runner::new(initial.clone());
        let report = runner.run(vec![Operation::list(), Operation::list()]);

        let first = report.outcomes[0].effect().cloned();
        let second = report.outcomes[1].effect().cloned();
        prop_assert_eq!(&first, &second);
        if let Some(Effect::Listed { entries }) = first {
            prop_assert_eq!(entries.len(), initial.len());
        } else {
            prop_assert!(false, "list did not produce a listing");
        }
        prop_assert_eq!(runner.store(), &initial);
        prop_assert!(runner.history().is_empty());
    }

    #[test]
    fn undo_on_empty_history_changes_nothing(initial in store(0)) {
        let mut runner = Runner::new(initial.clone());
        let report = runner.run(vec![Operation::undo()]);

        prop_assert_eq!(report.errors(), vec![ErrorKind::EmptyHistory]);
        prop_assert_eq!(runner.store(), &initial);
    }

    #[test]
    fn out_of_range_delete_is_rejected(initial in store(0), extra in 1usize..5) {
        let mut runner = Runner::new(initial.clone());
        let position = initial.len() + extra;
        let report = runner.run(vec![Operation::delete(position.to_string())]);

        prop_assert_eq!(report.errors(), vec![ErrorKind::OutOfRange]);
        prop_assert_eq!(runner.store(), &initial);
    }
}
