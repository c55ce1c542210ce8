use finrel::{
  equipment::{counit_holds, unit_holds},
  hoare::{hoare_holds, Counterexample, Verdict},
  strategy::{RelFactory, Strategy},
  FinMap, Finite, RelError, Subset,
};
use googletest::{expect_that, gtest, prelude::*};
use rstest::rstest;
use rstest_reuse::{apply, template};

#[template]
#[rstest]
fn factory(#[values(RelFactory::dense(), RelFactory::bit())] factory: RelFactory) {}

#[apply(factory)]
fn test_abxyz(factory: RelFactory) {
  let a = Finite::range(4);
  let b = Finite::new(['x', 'y', 'z']);
  let r = factory
    .from_pairs(
      &a,
      &b,
      [(0usize, 'x'), (0, 'y'), (1, 'y'), (2, 'y'), (2, 'z'), (3, 'z')],
    )
    .unwrap();

  assert_eq!(r.domain(), vec![0, 1, 2, 3]);
  assert_eq!(r.range(), vec!['x', 'y', 'z']);
  assert_eq!(r.image([0usize, 1]).unwrap(), vec!['x', 'y']);
  assert!(!r.is_functional());
  assert!(r.is_total());
}

#[apply(factory)]
fn test_hoare_counterexample(factory: RelFactory) {
  let states = Finite::range(5);
  let prog = factory.from_fn(&states, &states, |&s, &t| t == s || t == (s + 1).min(4));
  let pre = Subset::by(&states, |&s| s % 2 == 0);
  let post = Subset::by(&states, |&s| s <= 2);

  assert_eq!(
    hoare_holds(&pre, &prog, &post).unwrap(),
    Verdict::Violated(Counterexample { s: 2, s_prime: 3 })
  );
}

#[apply(factory)]
fn test_identity_equipment(factory: RelFactory) {
  let states = Finite::new(["idle", "busy", "done"]);
  let id = FinMap::identity(&states);
  assert!(unit_holds(&factory, &id).unwrap());
  assert!(counit_holds(&factory, &id).unwrap());
}

#[apply(factory)]
fn test_distinct_carriers_rejected(factory: RelFactory) {
  let a = Finite::range(3);
  let lookalike = Finite::range(3);
  let r = factory.identity(&a);
  let s = factory.identity(&lookalike);

  assert!(matches!(r.compose(&s), Err(RelError::CarrierMismatch { .. })));
  assert!(matches!(r.meet(&s), Err(RelError::CarrierMismatch { .. })));
  assert!(matches!(r.leq(&s), Err(RelError::CarrierMismatch { .. })));
}

#[gtest]
fn test_mismatch_error_names_operation() {
  let a = Finite::range(2);
  let lookalike = Finite::range(2);
  let factory = RelFactory::new(Strategy::Bit);
  let err = factory
    .identity(&a)
    .compose(&factory.identity(&lookalike))
    .unwrap_err();
  expect_that!(err.to_string(), contains_substring("compose"));
}

#[gtest]
fn test_out_of_carrier() {
  let a = Finite::range(2);
  let err = RelFactory::default()
    .from_pairs(&a, &a, [(0usize, 5usize)])
    .unwrap_err();
  expect_true!(matches!(err, RelError::OutOfCarrier { .. }));
}
