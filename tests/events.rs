mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::{fast, loader, Behavior, Recorder, ScriptedHost};
use lazyscript::{EventKind, HostFn, Loader, Mount, ScriptElement, Subscribe};

#[tokio::test(start_paused = true)]
async fn subscriber_sees_retries_then_one_failure() {
    let host = Arc::new(ScriptedHost::new(Behavior::Fail));
    let (loader, events) = loader(fast(2), host.clone());

    let _ = loader.load_script("/x.js").await;

    let seen: Vec<(EventKind, Option<u32>)> =
        events.events().iter().map(|e| (e.kind, e.attempt)).collect();
    assert_eq!(
        seen,
        [
            (EventKind::ScriptLoadRetried, Some(1)),
            (EventKind::ScriptLoadRetried, Some(2)),
            (EventKind::ScriptLoadFailed, Some(2)),
        ]
    );
    let seqs: Vec<u64> = events.events().iter().map(|e| e.seq).collect();
    assert!(seqs.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(events.events()[0].delay_ms, Some(10));
}

#[tokio::test(start_paused = true)]
async fn callbacks_run_in_subscription_order() {
    let host = Arc::new(ScriptedHost::new(Behavior::Fail));
    let (loader, _events) = loader(fast(1), host.clone());

    let order = Arc::new(Mutex::new(Vec::new()));
    for tag in ["a", "b", "c"] {
        let order = Arc::clone(&order);
        loader.on(EventKind::ScriptLoadFailed, move |ev| {
            order.lock().unwrap().push(format!("{tag}:{}", ev.src));
        });
    }

    let _ = loader.load_script("/y.js").await;
    assert_eq!(*order.lock().unwrap(), ["a:/y.js", "b:/y.js", "c:/y.js"]);
}

#[tokio::test(start_paused = true)]
async fn late_subscriber_misses_history_and_unsubscribe_stops_delivery() {
    let host = Arc::new(ScriptedHost::new(Behavior::Fail));
    let (loader, _events) = loader(fast(1), host.clone());

    let _ = loader.load_script("/first.js").await;

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let sub = loader.on(EventKind::ScriptLoadFailed, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    let _ = loader.load_script("/second.js").await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    assert!(sub.unsubscribe());
    let _ = loader.load_script("/third.js").await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_event_fires_before_callers_are_rejected() {
    let host = HostFn::arc("down", |_script: Arc<ScriptElement>| async {
        Err::<(), _>(lazyscript::HostError::new("offline"))
    });
    let loader = Loader::builder(fast(0), host)
        .with_mount(Mount::arc())
        .build();

    let fired = Arc::new(AtomicUsize::new(0));
    let flag = Arc::clone(&fired);
    loader.on(EventKind::ScriptLoadFailed, move |ev| {
        assert_eq!(ev.reason.as_deref(), Some("offline"));
        flag.fetch_add(1, Ordering::SeqCst);
    });

    let err = loader.load_script("/z.js").await.expect_err("offline");
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(err.host_error().map(|e| e.message()), Some("offline"));
}

#[tokio::test(start_paused = true)]
async fn panicking_subscriber_does_not_break_the_chain() {
    struct Exploding;
    impl Subscribe for Exploding {
        fn on_event(&self, _event: &lazyscript::Event) {
            panic!("subscriber bug");
        }
    }

    let host = Arc::new(ScriptedHost::new(Behavior::FailTimes(1)));
    let recorder = Arc::new(Recorder::default());
    let loader = Loader::builder(fast(1), host)
        .with_mount(Mount::arc())
        .with_subscribers(vec![
            Arc::new(Exploding) as Arc<dyn Subscribe>,
            recorder.clone() as Arc<dyn Subscribe>,
        ])
        .build();

    loader.load_script("/p.js").await.expect("loads on retry");
    assert_eq!(recorder.count(EventKind::ScriptLoadRetried), 1);
}

#[cfg(feature = "logging")]
#[tokio::test(start_paused = true)]
async fn log_writer_renders_events() {
    common::init_tracing();
    let host = Arc::new(ScriptedHost::new(Behavior::Fail));
    let loader = Loader::builder(fast(1), host)
        .with_mount(Mount::arc())
        .with_subscribers(vec![Arc::new(lazyscript::LogWriter::new()) as Arc<dyn Subscribe>])
        .build();

    assert!(loader.load_script("/logged.js").await.is_err());
}
