#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::COMPOSER;
    use crate::prelude::*;
    use crate::runtime::{flush_effects, recompose_requested, take_focus_request};
    use crate::scope::*;
    use crate::signal::*;
    use crate::{HitRegion, SemNode, take_recompose_request};

    fn no_layout(v: &View) -> (View, Vec<HitRegion>, Vec<SemNode>) {
        (v.clone(), Vec::new(), Vec::new())
    }

    fn empty() -> View {
        View::new(0, ViewKind::Fragment)
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let called = Rc::new(RefCell::new(false));

        let called_clone = called.clone();
        sig.subscribe(move |_| {
            *called_clone.borrow_mut() = true;
        });

        sig.set(42);
        assert!(*called.borrow());
    }

    #[test]
    fn test_signal_write_requests_recompose() {
        take_recompose_request();
        let sig = signal(0);
        assert!(!recompose_requested());
        sig.update(|v| *v += 1);
        assert!(take_recompose_request());
        assert!(!recompose_requested());
    }

    #[test]
    fn test_mutable_ref_does_not_recompose() {
        take_recompose_request();
        let cell = MutableRef::new(0);
        for _ in 0..3 {
            cell.update(|c| *c += 1);
        }
        assert_eq!(cell.get(), 3);
        assert!(!recompose_requested());
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        let lifetime = scope.lifetime();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || {
            *cleaned_up_clone.borrow_mut() = true;
        });

        assert!(!*cleaned_up.borrow());
        assert!(lifetime.is_alive());
        scope.dispose();
        assert!(*cleaned_up.borrow());
        assert!(!lifetime.is_alive());
    }

    #[test]
    fn test_key_based_remember() {
        let val1 = remember_with_key("test", || 42);
        let val2 = remember_with_key("test", || 100);

        // Should return the same instance
        assert_eq!(*val1, 42);
        assert_eq!(*val2, 42); // Not 100, because key exists
    }

    #[test]
    fn test_remember_survives_recomposition() {
        let mut sched = Scheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut root = {
            let seen = seen.clone();
            move |_: &mut Scheduler| {
                let count = remember(|| signal(0));
                seen.borrow_mut().push(count.get());
                count.update(|c| *c += 1);
                empty()
            }
        };
        sched.compose(&mut root, no_layout);
        sched.compose(&mut root, no_layout);
        sched.compose(&mut root, no_layout);
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
        assert_eq!(sched.compositions(), 3);
    }

    #[test]
    fn test_component_unmount_disposes_scope() {
        let mut sched = Scheduler::new();
        let show = Rc::new(RefCell::new(true));
        let unmounted = Rc::new(RefCell::new(0));
        let lifetime = Rc::new(RefCell::new(None::<Lifetime>));

        let mut root = {
            let show = show.clone();
            let unmounted = unmounted.clone();
            let lifetime = lifetime.clone();
            move |_: &mut Scheduler| {
                if *show.borrow() {
                    let unmounted = unmounted.clone();
                    let lifetime = lifetime.clone();
                    component("child", move || {
                        *lifetime.borrow_mut() = current_scope().map(|s| s.lifetime());
                        disposable_effect((), move || {
                            on_unmount(move || *unmounted.borrow_mut() += 1)
                        });
                    });
                }
                empty()
            }
        };

        sched.compose(&mut root, no_layout);
        assert!(COMPOSER.with(|c| c.borrow().is_mounted("<root>/child")));
        assert_eq!(*unmounted.borrow(), 0);

        *show.borrow_mut() = false;
        sched.compose(&mut root, no_layout);
        assert!(!COMPOSER.with(|c| c.borrow().is_mounted("<root>/child")));
        assert_eq!(*unmounted.borrow(), 1);
        let lifetime = lifetime.borrow().clone().expect("child ran in a scope");
        assert!(!lifetime.is_alive());
    }

    #[test]
    fn test_component_state_resets_after_remount() {
        let mut sched = Scheduler::new();
        let show = Rc::new(RefCell::new(true));
        let values = Rc::new(RefCell::new(Vec::new()));
        let mut root = {
            let show = show.clone();
            let values = values.clone();
            move |_: &mut Scheduler| {
                if *show.borrow() {
                    let values = values.clone();
                    component("counter", move || {
                        let n = remember(|| signal(0));
                        values.borrow_mut().push(n.get());
                        n.update(|v| *v += 1);
                    });
                }
                empty()
            }
        };
        sched.compose(&mut root, no_layout);
        sched.compose(&mut root, no_layout);
        *show.borrow_mut() = false;
        sched.compose(&mut root, no_layout);
        *show.borrow_mut() = true;
        sched.compose(&mut root, no_layout);
        assert_eq!(*values.borrow(), vec![0, 1, 0]);
    }

    #[test]
    fn test_launched_effect_runs_after_commit_once_per_key() {
        let mut sched = Scheduler::new();
        let key = Rc::new(RefCell::new("a"));
        let log = Rc::new(RefCell::new(Vec::<String>::new()));
        let mut root = {
            let key = key.clone();
            let log = log.clone();
            move |_: &mut Scheduler| {
                let k = *key.borrow();
                let log_effect = log.clone();
                launched_effect(k, move || log_effect.borrow_mut().push(format!("effect {k}")));
                log.borrow_mut().push("body".to_string());
                empty()
            }
        };

        sched.compose(&mut root, no_layout);
        sched.compose(&mut root, no_layout);
        *key.borrow_mut() = "b";
        sched.compose(&mut root, no_layout);

        assert_eq!(
            *log.borrow(),
            vec!["body", "effect a", "body", "body", "effect b"]
        );
    }

    #[test]
    fn test_disposable_effect_cleans_up_on_key_change() {
        let mut sched = Scheduler::new();
        let key = Rc::new(RefCell::new(1));
        let cleaned = Rc::new(RefCell::new(Vec::new()));
        let mut root = {
            let key = key.clone();
            let cleaned = cleaned.clone();
            move |_: &mut Scheduler| {
                let k = *key.borrow();
                let cleaned = cleaned.clone();
                disposable_effect(k, move || on_unmount(move || cleaned.borrow_mut().push(k)));
                empty()
            }
        };
        sched.compose(&mut root, no_layout);
        *key.borrow_mut() = 2;
        sched.compose(&mut root, no_layout);
        assert_eq!(*cleaned.borrow(), vec![1]);
    }

    #[test]
    fn test_node_ref_focus_requests_without_recompose() {
        take_recompose_request();
        let r = NodeRef::new();
        assert!(!r.focus());
        r.bind(7);
        assert!(r.focus());
        assert_eq!(take_focus_request(), Some(7));
        assert_eq!(take_focus_request(), None);
        assert!(!recompose_requested());
    }

    #[test]
    fn test_locals_are_scoped() {
        #[derive(Clone, Debug, PartialEq)]
        struct Endpoint(&'static str);

        assert_eq!(local::<Endpoint>(), None);
        provide(Endpoint("outer"), || {
            assert_eq!(local::<Endpoint>(), Some(Endpoint("outer")));
            provide(Endpoint("inner"), || {
                assert_eq!(local::<Endpoint>(), Some(Endpoint("inner")));
            });
            assert_eq!(local::<Endpoint>(), Some(Endpoint("outer")));
        });
    }

    #[test]
    fn test_alert_reaches_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let guard = crate::set_alert_handler(move |m| sink.borrow_mut().push(m.to_string()));
        alert("Something went wrong...");
        drop(guard);
        alert("not delivered");
        assert_eq!(*seen.borrow(), vec!["Something went wrong..."]);
    }

    #[test]
    fn test_alert_handlers_nest() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (seen.clone(), seen.clone());
        let outer = crate::set_alert_handler(move |m| a.borrow_mut().push(format!("outer {m}")));
        let inner = crate::set_alert_handler(move |m| b.borrow_mut().push(format!("inner {m}")));

        alert("1");
        drop(inner);
        alert("2");
        drop(outer);
        alert("3");
        assert_eq!(*seen.borrow(), vec!["inner 1", "outer 2"]);
    }

    #[test]
    fn test_alert_guard_dropped_out_of_order_keeps_newer_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (seen.clone(), seen.clone());
        let first = crate::set_alert_handler(move |m| a.borrow_mut().push(format!("first {m}")));
        let second = crate::set_alert_handler(move |m| b.borrow_mut().push(format!("second {m}")));

        drop(first);
        alert("1");
        drop(second);
        // The first owner is gone, so nothing is restored.
        alert("2");
        assert_eq!(*seen.borrow(), vec!["second 1"]);
    }

    #[test]
    fn test_resource_success_path() {
        let res: Resource<Vec<u32>, String> = Resource::new(SettlePolicy::Latest);
        assert_eq!(res.get().phase(), &crate::resource::Phase::Idle);

        let ticket = res.begin();
        assert!(res.get().loading());
        assert!(ticket.settle(Ok(vec![1])));

        let state = res.get();
        assert_eq!(state.data(), Some(&vec![1]));
        assert!(!state.loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_resource_failure_keeps_previous_data() {
        let res: Resource<u32, String> = Resource::new(SettlePolicy::Latest);
        res.begin().settle(Ok(1));
        res.begin().settle(Err("boom".into()));

        let state = res.get();
        assert_eq!(state.data(), Some(&1));
        assert_eq!(state.error(), Some(&"boom".to_string()));
        assert!(!state.loading());

        // A new attempt clears the error but keeps the data.
        let _pending = res.begin();
        let state = res.get();
        assert!(state.loading());
        assert!(state.error().is_none());
        assert_eq!(state.data(), Some(&1));
    }

    #[test]
    fn test_resource_loading_falls_exactly_once() {
        for outcome in [Ok(5), Err("nope".to_string())] {
            let res: Resource<u32, String> = Resource::new(SettlePolicy::Latest);
            let transitions = Rc::new(RefCell::new(Vec::new()));
            let sink = transitions.clone();
            res.subscribe(move |s| sink.borrow_mut().push(s.loading()));

            let ticket = res.begin();
            ticket.settle(outcome);
            assert_eq!(*transitions.borrow(), vec![true, false]);
        }
    }

    #[test]
    fn test_resource_latest_policy_drops_superseded() {
        let res: Resource<&'static str, String> = Resource::new(SettlePolicy::Latest);
        let first = res.begin();
        let second = res.begin();
        assert!(!first.is_current());

        assert!(second.settle(Ok("new")));
        assert!(!first.settle(Ok("stale")));
        assert_eq!(res.get().data(), Some(&"new"));
    }

    #[test]
    fn test_resource_last_settled_policy_keeps_race() {
        let res: Resource<&'static str, String> = Resource::new(SettlePolicy::LastSettled);
        let first = res.begin();
        let second = res.begin();

        assert!(second.settle(Ok("new")));
        assert!(first.settle(Ok("stale")));
        assert_eq!(res.get().data(), Some(&"stale"));
    }

    #[test]
    fn test_resource_dropped_ticket_stops_loading() {
        let res: Resource<u32, String> = Resource::new(SettlePolicy::Latest);
        let ticket = res.begin();
        assert!(res.get().loading());
        drop(ticket);
        let state = res.get();
        assert!(!state.loading());
        assert!(state.error().is_none());
        assert_eq!(state.phase(), &crate::resource::Phase::Idle);
    }

    #[test]
    fn test_resource_superseded_drop_keeps_newer_request_pending() {
        for policy in [SettlePolicy::Latest, SettlePolicy::LastSettled] {
            let res: Resource<u32, String> = Resource::new(policy);
            let older = res.begin();
            let newer = res.begin();

            drop(older);
            assert!(res.get().loading(), "{policy:?}");

            assert!(newer.settle(Ok(2)));
            assert_eq!(res.get().data(), Some(&2));
            assert!(!res.get().loading());
        }
    }

    #[test]
    fn test_resource_drop_after_teardown_leaves_state_alone() {
        let res: Resource<u32, String> = Resource::new(SettlePolicy::Latest);
        let scope = Scope::new();
        let ticket = scope.run(|| res.begin());
        scope.dispose();

        drop(ticket);
        assert_eq!(res.get().phase(), &crate::resource::Phase::Pending);
    }

    #[test]
    fn test_resource_ignores_settle_after_teardown() {
        let res: Resource<u32, String> = Resource::new(SettlePolicy::Latest);
        let scope = Scope::new();
        let ticket = scope.run(|| res.begin());
        scope.dispose();

        assert!(!ticket.settle(Ok(9)));
        let state = res.get();
        assert!(state.data().is_none());
        // The torn-down view never sees loading end; nothing reads it anymore.
        assert!(state.loading());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_spawned_effect_work_runs_on_local_set() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let res: Resource<u32, String> = Resource::new(SettlePolicy::Latest);
                let ticket = res.begin();
                let handle = crate::spawn(async move {
                    tokio::task::yield_now().await;
                    ticket.settle(Ok(3))
                });
                assert!(res.get().loading());
                assert!(handle.await.expect("task"));
                assert_eq!(res.get().data(), Some(&3));
                assert_eq!(flush_effects(), 0);
            })
            .await;
    }
}
