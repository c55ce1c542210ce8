//! Algebraic laws of relations over small random carriers.

use finrel::{
  galois::verify_galois_chain,
  hoare::wp_sp_adjoint,
  strategy::{Rel, RelFactory, Strategy as Backend},
  verify_opts::VerifyOptions,
  FinMap, Finite, Subset,
};
use proptest::{collection::vec, prelude::*};

/// A row-major entry mask for each requested relation size.
fn arb_masks(sizes: &[usize]) -> Vec<BoxedStrategy<Vec<bool>>> {
  sizes.iter().map(|&len| vec(any::<bool>(), len).boxed()).collect()
}

fn arb_backend() -> impl Strategy<Value = Backend> {
  prop_oneof![Just(Backend::Dense), Just(Backend::Bit)]
}

fn rel(
  factory: &RelFactory,
  dom: &Finite<usize>,
  cod: &Finite<usize>,
  mask: &[bool],
) -> Rel<usize, usize> {
  factory.from_fn(dom, cod, |&i, &j| mask[i * cod.len() + j])
}

fn subset(carrier: &Finite<usize>, mask: &[bool]) -> Subset<usize> {
  Subset::by(carrier, |&i| mask[i])
}

/// Two sizes, and three relations between carriers of those sizes.
fn arb_parallel() -> impl Strategy<Value = (usize, usize, Vec<Vec<bool>>)> {
  (1usize..7, 1usize..7).prop_flat_map(|(n, m)| (Just(n), Just(m), arb_masks(&[n * m; 3])))
}

/// Four sizes, and the chain `A → B → C → D`.
fn arb_chain() -> impl Strategy<Value = (Vec<usize>, Vec<Vec<bool>>)> {
  vec(1usize..6, 4).prop_flat_map(|sizes| {
    let masks = arb_masks(&[sizes[0] * sizes[1], sizes[1] * sizes[2], sizes[2] * sizes[3]]);
    (Just(sizes), masks)
  })
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(256))]

  #[test]
  fn converse_is_an_involution(
    backend in arb_backend(),
    (n, m, masks) in arb_parallel(),
  ) {
    let factory = RelFactory::new(backend);
    let (a, b) = (Finite::range(n), Finite::range(m));
    let r = rel(&factory, &a, &b, &masks[0]);
    prop_assert_eq!(r.converse().converse(), r);
  }

  #[test]
  fn composition_is_associative(backend in arb_backend(), (sizes, masks) in arb_chain()) {
    let factory = RelFactory::new(backend);
    let carriers = sizes.iter().map(|&n| Finite::range(n)).collect::<Vec<_>>();
    let r = rel(&factory, &carriers[0], &carriers[1], &masks[0]);
    let s = rel(&factory, &carriers[1], &carriers[2], &masks[1]);
    let t = rel(&factory, &carriers[2], &carriers[3], &masks[2]);

    let left = r.compose(&s).unwrap().compose(&t).unwrap();
    let right = r.compose(&s.compose(&t).unwrap()).unwrap();
    prop_assert_eq!(left, right);
  }

  #[test]
  fn identity_is_neutral(backend in arb_backend(), (n, m, masks) in arb_parallel()) {
    let factory = RelFactory::new(backend);
    let (a, b) = (Finite::range(n), Finite::range(m));
    let r = rel(&factory, &a, &b, &masks[0]);
    prop_assert_eq!(factory.identity(&a).compose(&r).unwrap(), r.clone());
    prop_assert_eq!(r.compose(&factory.identity(&b)).unwrap(), r);
  }

  #[test]
  fn lattice_laws(backend in arb_backend(), (n, m, masks) in arb_parallel()) {
    let factory = RelFactory::new(backend);
    let (a, b) = (Finite::range(n), Finite::range(m));
    let r = rel(&factory, &a, &b, &masks[0]);
    let s = rel(&factory, &a, &b, &masks[1]);
    let t = rel(&factory, &a, &b, &masks[2]);

    prop_assert_eq!(r.meet(&s).unwrap(), s.meet(&r).unwrap());
    prop_assert_eq!(r.join(&s).unwrap(), s.join(&r).unwrap());
    prop_assert_eq!(
      r.meet(&s).unwrap().meet(&t).unwrap(),
      r.meet(&s.meet(&t).unwrap()).unwrap()
    );
    prop_assert_eq!(
      r.join(&s).unwrap().join(&t).unwrap(),
      r.join(&s.join(&t).unwrap()).unwrap()
    );
    prop_assert!(r.leq(&r.join(&s).unwrap()).unwrap());
    prop_assert!(r.meet(&s).unwrap().leq(&r).unwrap());
    prop_assert_eq!(r.complement().complement(), r.clone());
    prop_assert_eq!(r.difference(&s).unwrap(), r.meet(&s.complement()).unwrap());
  }

  #[test]
  fn wp_sp_adjunction(
    backend in arb_backend(),
    (n, prog_mask, pre_mask, post_mask) in (1usize..7).prop_flat_map(|n| {
      (Just(n), vec(any::<bool>(), n * n), vec(any::<bool>(), n), vec(any::<bool>(), n))
    }),
  ) {
    let factory = RelFactory::new(backend);
    let states = Finite::range(n);
    let prog = rel(&factory, &states, &states, &prog_mask);
    let pre = subset(&states, &pre_mask);
    let post = subset(&states, &post_mask);
    prop_assert!(wp_sp_adjoint(&pre, &prog, &post).unwrap());
  }
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn galois_chain_is_complete(
    (n, m, table) in (1usize..6, 1usize..6).prop_flat_map(|(n, m)| {
      (Just(n), Just(m), vec(0..m, n))
    }),
  ) {
    let (a, b) = (Finite::range(n), Finite::range(m));
    let f = FinMap::from_indices(&a, &b, table).unwrap();
    let report = verify_galois_chain(&f, &VerifyOptions::default()).unwrap();
    prop_assert!(report.holds());
    prop_assert_eq!(report.pairs_checked, 1u64 << (n + m));
  }
}
