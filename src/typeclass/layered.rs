//! Stack-safe recursion over layered aggregates.
//!
//! Collapsing a free semigroup, a free monoid or a chain peels one layer
//! `T<L, S>` off the aggregate, collapses the rest `S` and merges the layer
//! back. Written as plain recursion this costs one native stack frame per
//! layer. [`collapse`] runs the same recursion with an explicit stack of
//! pending merges instead, in the manner of a continuation stack.
//!
//! The rest of a layer is detached with `hright`. A combinator that stores
//! the rest directly hands it over at once: the loop collapses it and the
//! pending merge reattaches the result. A combinator that stores a
//! continuation only hands the rest over when the continuation runs; the
//! rest is collapsed there, one layer per call.
//!
//! [`release`] drops deeply nested values the same way: the nested half of
//! a layer is queued instead of being dropped in place.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use super::hbifunctor::HBifunctor;
use super::higher::{TypeConstructor, Value};
use super::identity::{Proxy, ProxyK};
use super::natural::NaturalTransformation;
use crate::control::{Either, Existential};

pub(crate) type SourceOf<R, A> = <<R as Layers>::Source as TypeConstructor>::Of<A>;
pub(crate) type TargetOf<R, A> = <<R as Layers>::Target as TypeConstructor>::Of<A>;
type LayerOf<R, G, A> = <<R as Layers>::Combinator as HBifunctor>::Of<<R as Layers>::Left, G, A>;

/// One step of a recursion from `Source` to `Target` through `Combinator`.
pub(crate) trait Layers: 'static {
    type Combinator: HBifunctor;
    type Left: TypeConstructor;
    type Source: TypeConstructor;
    type Target: TypeConstructor;

    /// Either finishes directly or exposes one layer over the rest.
    fn split<A: Value>(&self, value: SourceOf<Self, A>) -> Either<TargetOf<Self, A>, LayerOf<Self, Self::Source, A>>;

    /// Merges a layer whose rest has already been collapsed.
    fn join<A: Value>(&self, value: LayerOf<Self, Self::Target, A>) -> TargetOf<Self, A>;
}

/// Runs the recursion described by `layers` on `value`.
pub(crate) fn collapse<R: Layers, A: Value>(layers: R, value: SourceOf<R, A>) -> TargetOf<R, A> {
    run(stage::<R, A>(&Rc::new(layers), value)).downcast::<TargetOf<R, A>>()
}

type Resume = Box<dyn FnOnce() -> Stage>;
type Merge = Box<dyn FnOnce(Existential) -> Existential>;
type Pending = Rc<RefCell<Option<Resume>>>;

enum Stage {
    Finished(Existential),
    Nested { merge: Merge, rest: Resume },
}

fn run(first: Stage) -> Existential {
    let mut merges: Vec<Merge> = Vec::new();
    let mut stage = first;
    let mut result = loop {
        match stage {
            Stage::Finished(result) => break result,
            Stage::Nested { merge, rest } => {
                merges.push(merge);
                stage = rest();
            }
        }
    };
    while let Some(merge) = merges.pop() {
        result = merge(result);
    }
    result
}

fn stage<R: Layers, A: Value>(layers: &Rc<R>, value: SourceOf<R, A>) -> Stage {
    let layer = match layers.split::<A>(value) {
        Either::Left(finished) => return Stage::Finished(Existential::new(finished)),
        Either::Right(layer) => layer,
    };
    let pending: Pending = Rc::new(RefCell::new(None));
    let detached = <R::Combinator as HBifunctor>::hright::<R::Left, R::Source, ProxyK, A, Detach<R>>(
        layer,
        Detach {
            layers: Rc::clone(layers),
            pending: Rc::clone(&pending),
        },
    );
    let handed_over = pending.borrow_mut().take();
    let layers = Rc::clone(layers);
    match handed_over {
        Some(rest) => Stage::Nested {
            merge: Box::new(move |collapsed| {
                let attach = Attach {
                    pending,
                    collapsed: RefCell::new(Some(collapsed)),
                };
                Existential::new(layers.join::<A>(reattach::<R, A>(detached, attach)))
            }),
            rest,
        },
        None => {
            let attach = Attach {
                pending,
                collapsed: RefCell::new(None),
            };
            Stage::Finished(Existential::new(layers.join::<A>(reattach::<R, A>(detached, attach))))
        }
    }
}

fn reattach<R: Layers, A: Value>(detached: LayerOf<R, ProxyK, A>, attach: Attach) -> LayerOf<R, R::Target, A> {
    <R::Combinator as HBifunctor>::hright::<R::Left, ProxyK, R::Target, A, Attach>(detached, attach)
}

/// Parks the rest of a layer so the loop can collapse it.
struct Detach<R> {
    layers: Rc<R>,
    pending: Pending,
}

impl<R: Layers> NaturalTransformation<R::Source, ProxyK> for Detach<R> {
    fn transform<A: Value>(&self, value: SourceOf<R, A>) -> Proxy<A> {
        let layers = Rc::clone(&self.layers);
        *self.pending.borrow_mut() = Some(Box::new(move || stage::<R, A>(&layers, value)));
        Proxy::new()
    }
}

/// Puts the collapsed rest back in place of the parked one.
struct Attach {
    pending: Pending,
    collapsed: RefCell<Option<Existential>>,
}

impl<G: TypeConstructor> NaturalTransformation<ProxyK, G> for Attach {
    fn transform<A: Value>(&self, _value: Proxy<A>) -> G::Of<A> {
        let ready = self.collapsed.borrow_mut().take();
        let collapsed = match ready {
            Some(collapsed) => collapsed,
            None => {
                let rest = self
                    .pending
                    .borrow_mut()
                    .take()
                    .expect("a rest is parked before it is reattached");
                run(rest())
            }
        };
        collapsed.downcast::<G::Of<A>>()
    }
}

thread_local! {
    static RELEASED: RefCell<Option<Vec<Box<dyn Any>>>> = const { RefCell::new(None) };
}

/// Drops a layer, queueing its nested half instead of recursing into it.
///
/// The outermost release drains the queue in a loop; releases started
/// while it runs only add to the queue.
pub(crate) fn release<T, F, G, A>(layer: T::Of<F, G, A>)
where
    T: HBifunctor,
    F: TypeConstructor,
    G: TypeConstructor,
    A: Value,
{
    drop(T::hright::<F, G, ProxyK, A, Release>(layer, Release));
}

struct Release;

impl<G: TypeConstructor> NaturalTransformation<G, ProxyK> for Release {
    fn transform<A: Value>(&self, value: G::Of<A>) -> Proxy<A> {
        defer(Box::new(value));
        Proxy::new()
    }
}

fn defer(value: Box<dyn Any>) {
    let first = RELEASED.with(|released| match released.borrow_mut().as_mut() {
        Some(queue) => {
            queue.push(value);
            None
        }
        None => Some(value),
    });
    let Some(first) = first else {
        return;
    };
    RELEASED.with(|released| *released.borrow_mut() = Some(Vec::new()));
    drop(first);
    while let Some(next) = RELEASED.with(|released| released.borrow_mut().as_mut().and_then(Vec::pop)) {
        drop(next);
    }
    RELEASED.with(|released| *released.borrow_mut() = None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::{Functor, OptionK, VecK};

    enum PairT {}

    impl HBifunctor for PairT {
        type Of<F: TypeConstructor, G: TypeConstructor, A: Value> = (F::Of<A>, G::Of<A>);

        fn hbimap<F, G, J, L, A, N, M>(value: (F::Of<A>, G::Of<A>), left: N, right: M) -> (J::Of<A>, L::Of<A>)
        where
            F: TypeConstructor,
            G: TypeConstructor,
            J: TypeConstructor,
            L: TypeConstructor,
            A: Value,
            N: NaturalTransformation<F, J>,
            M: NaturalTransformation<G, L>,
        {
            (left.transform::<A>(value.0), right.transform::<A>(value.1))
        }

        fn hfmap<F, G, A, B, M>(value: (F::Of<A>, G::Of<A>), function: M) -> (F::Of<B>, G::Of<B>)
        where
            F: Functor,
            G: Functor,
            A: Value,
            B: Value,
            M: Fn(A) -> B + 'static,
        {
            let function = Rc::new(function);
            let second = Rc::clone(&function);
            (
                F::fmap::<A, B, _>(value.0, move |x| function(x)),
                G::fmap::<A, B, _>(value.1, move |x| second(x)),
            )
        }
    }

    /// A payload repeated a given number of times.
    enum RepeatK {}

    impl TypeConstructor for RepeatK {
        type Of<A: Value> = (usize, A);
    }

    /// Unfolds `(n, a)` into `n + 1` layers, one `a` each.
    struct Repeat;

    impl Layers for Repeat {
        type Combinator = PairT;
        type Left = OptionK;
        type Source = RepeatK;
        type Target = VecK;

        fn split<A: Value>(&self, value: (usize, A)) -> Either<Vec<A>, (Option<A>, (usize, A))> {
            match value {
                (0, last) => Either::Left(vec![last]),
                (count, item) => Either::Right((Some(item.clone()), (count - 1, item))),
            }
        }

        fn join<A: Value>(&self, value: (Option<A>, Vec<A>)) -> Vec<A> {
            let (head, mut rest) = value;
            rest.extend(head);
            rest
        }
    }

    #[test]
    fn shallow_recursion_merges_bottom_up() {
        assert_eq!(collapse::<Repeat, char>(Repeat, (2, 'x')), vec!['x', 'x', 'x']);
    }

    #[test]
    fn deep_recursion_runs_on_the_heap() {
        let collapsed = collapse::<Repeat, u8>(Repeat, (200_000, 7));
        assert_eq!(collapsed.len(), 200_001);
        assert!(collapsed.iter().all(|item| *item == 7));
    }

    struct Untouched;

    impl Layers for Untouched {
        type Combinator = PairT;
        type Left = OptionK;
        type Source = OptionK;
        type Target = OptionK;

        fn split<A: Value>(&self, value: Option<A>) -> Either<Option<A>, (Option<A>, Option<A>)> {
            Either::Left(value)
        }

        fn join<A: Value>(&self, value: (Option<A>, Option<A>)) -> Option<A> {
            value.0
        }
    }

    #[test]
    fn base_case_never_detaches() {
        assert_eq!(collapse::<Untouched, i32>(Untouched, Some(1)), Some(1));
    }

    #[derive(Clone)]
    struct Nested(Option<Box<(Option<u8>, Nested)>>);

    impl Drop for Nested {
        fn drop(&mut self) {
            if let Some(layer) = self.0.take() {
                release::<PairT, OptionK, NestedK, u8>(*layer);
            }
        }
    }

    enum NestedK {}

    impl TypeConstructor for NestedK {
        type Of<A: Value> = Nested;
    }

    #[test]
    fn release_unwinds_deep_nesting_in_a_loop() {
        let mut nested = Nested(None);
        for _ in 0..200_000 {
            nested = Nested(Some(Box::new((Some(1), nested))));
        }
        drop(nested);
        RELEASED.with(|released| assert!(released.borrow().is_none()));
    }
}
