//! Fetch Orchestration
//!
//! Debounced, generation-tagged retrieval of the dataset for the current
//! date range. Bursts of range edits collapse into one trailing fetch;
//! responses that resolve after a newer fetch was issued are discarded.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::spawn_local;
use leptos::SignalSet;

use crate::api;
use crate::state::global::{DateRange, FetchState, GlobalState};

/// Quiet period before a range edit actually triggers a fetch
pub const FETCH_DEBOUNCE_MS: u32 = 1_000;

/// Collapses a burst of calls into a single trailing invocation.
///
/// Each `call` stores its arguments and resets the timer; only when the
/// delay elapses with no newer call does the wrapped action run, receiving
/// the arguments of the last call. Fire-and-forget: callers get nothing
/// back, and a pending timer is not cancelled on teardown.
pub struct Debouncer<T: 'static> {
    delay_ms: u32,
    inner: Rc<RefCell<Pending<T>>>,
}

struct Pending<T> {
    args: Option<T>,
    timer: Option<Timeout>,
    action: Rc<dyn Fn(T)>,
}

impl<T> Pending<T> {
    fn new(action: Rc<dyn Fn(T)>) -> Self {
        Self {
            args: None,
            timer: None,
            action,
        }
    }

    /// Remember the arguments; the last call before firing wins
    fn push(&mut self, args: T) {
        self.args = Some(args);
    }

    /// Take what is needed to fire so the borrow can be released before
    /// the action runs (the action may call back into the debouncer)
    fn take_for_fire(&mut self) -> (Rc<dyn Fn(T)>, Option<T>) {
        self.timer = None;
        (Rc::clone(&self.action), self.args.take())
    }
}

fn fire<T>(inner: &Rc<RefCell<Pending<T>>>) {
    let (action, args) = inner.borrow_mut().take_for_fire();
    if let Some(args) = args {
        action(args);
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u32, action: impl Fn(T) + 'static) -> Self {
        Self {
            delay_ms,
            inner: Rc::new(RefCell::new(Pending::new(Rc::new(action)))),
        }
    }

    /// Schedule the action with `args`, superseding any pending call
    pub fn call(&self, args: T) {
        let mut pending = self.inner.borrow_mut();
        pending.push(args);
        if let Some(timer) = pending.timer.take() {
            timer.cancel();
        }
        let inner = Rc::clone(&self.inner);
        pending.timer = Some(Timeout::new(self.delay_ms, move || fire(&inner)));
    }
}

/// Issue one tagged fetch for `range`.
///
/// The resolution is applied through the generation check in
/// [`GlobalState`], so a response that arrives after a newer fetch was
/// issued never overwrites the newer result.
pub fn spawn_fetch(state: GlobalState, range: DateRange) {
    let generation = state.begin_fetch();
    spawn_local(async move {
        match api::get_chart_data(range.from, range.to).await {
            Ok(dataset) => state.apply_fetch_success(generation, dataset),
            Err(err) => state.apply_fetch_failure(generation, &err),
        }
    });
}

/// Leave `Failed`, re-enter `Loading` and refetch the current range
pub fn retry(state: GlobalState) {
    state.fetch.set(FetchState::Loading);
    match state.range_untracked() {
        Ok(range) => spawn_fetch(state, range),
        Err(err) => state.fetch.set(FetchState::Failed(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_pending() -> (Rc<RefCell<Pending<(i64, i64)>>>, Rc<RefCell<Vec<(i64, i64)>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let pending = Rc::new(RefCell::new(Pending::new(Rc::new(move |args| {
            sink.borrow_mut().push(args);
        }))));
        (pending, calls)
    }

    #[test]
    fn test_burst_collapses_to_last_call() {
        let (pending, calls) = recording_pending();

        // Three calls inside one quiet period: only the last args survive.
        pending.borrow_mut().push((1, 2));
        pending.borrow_mut().push((3, 4));
        pending.borrow_mut().push((5, 6));
        fire(&pending);

        assert_eq!(*calls.borrow(), vec![(5, 6)]);
    }

    #[test]
    fn test_fire_without_pending_call_does_nothing() {
        let (pending, calls) = recording_pending();

        fire(&pending);
        assert!(calls.borrow().is_empty());

        // After firing once, the slot is empty again.
        pending.borrow_mut().push((1, 2));
        fire(&pending);
        fire(&pending);
        assert_eq!(*calls.borrow(), vec![(1, 2)]);
    }

    #[test]
    fn test_spaced_calls_each_execute() {
        let (pending, calls) = recording_pending();

        pending.borrow_mut().push((1, 2));
        fire(&pending);
        pending.borrow_mut().push((3, 4));
        fire(&pending);

        assert_eq!(*calls.borrow(), vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn test_boundary_edit_carries_updated_pair() {
        let (pending, calls) = recording_pending();

        // A "from" edit followed by a "to" edit within the window: the
        // fetch must carry the fully updated pair, not a stale one.
        pending.borrow_mut().push((100, 200));
        pending.borrow_mut().push((100, 300));
        fire(&pending);

        assert_eq!(*calls.borrow(), vec![(100, 300)]);
    }
}
