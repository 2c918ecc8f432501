//! Cross-thread handoff behavior
//!
//! Exercises the single-slot mailbox the way the application uses it: a
//! real-time sender that must never block, a worker that holds the slot
//! while processing, and cancellation as the only way to unblock a
//! parked receiver.

use marga_nav::sync::Handoff;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[test]
fn worker_consumes_latest_value() {
    let handoff: Arc<Handoff<u32>> = Arc::new(Handoff::new());
    let consumer = Arc::clone(&handoff);

    let worker = thread::spawn(move || {
        let mut received = Vec::new();
        loop {
            let mut got = None;
            if !consumer.recv_once(|v| got = Some(v)) {
                break;
            }
            received.push(got.unwrap());
        }
        received
    });

    assert!(handoff.send(1));
    // give the worker time to drain before overwriting
    thread::sleep(Duration::from_millis(50));
    assert!(handoff.send(2));
    thread::sleep(Duration::from_millis(50));
    handoff.cancel();

    let received = worker.join().unwrap();
    assert_eq!(received, vec![1, 2]);
}

#[test]
fn sender_is_rejected_while_worker_is_busy() {
    let handoff: Arc<Handoff<u32>> = Arc::new(Handoff::new());
    let consumer = Arc::clone(&handoff);
    let gate = Arc::new(Barrier::new(2));
    let worker_gate = Arc::clone(&gate);

    let worker = thread::spawn(move || {
        consumer.recv_once(|_| {
            worker_gate.wait(); // sender observes the busy slot now
            thread::sleep(Duration::from_millis(200));
        })
    });

    assert!(handoff.send(1));
    gate.wait();
    // the worker holds the slot inside its callback
    assert!(!handoff.try_send(2));
    assert!(worker.join().unwrap());

    // once the worker is done the slot is writable again
    assert!(handoff.try_send(3));
    let mut got = None;
    assert!(handoff.recv_once(|v| got = Some(v)));
    assert_eq!(got, Some(3));
}

#[test]
fn overwrite_keeps_only_the_newest_snapshot() {
    let handoff: Handoff<&str> = Handoff::new();
    assert!(handoff.send("stale"));
    assert!(handoff.send("fresh"));
    let mut got = None;
    assert!(handoff.recv_once(|v| got = Some(v)));
    assert_eq!(got, Some("fresh"));
}

#[test]
fn cancel_unblocks_a_parked_receiver() {
    let handoff: Arc<Handoff<u32>> = Arc::new(Handoff::new());
    let consumer = Arc::clone(&handoff);

    let worker = thread::spawn(move || consumer.recv_once(|_| panic!("nothing was sent")));

    thread::sleep(Duration::from_millis(50));
    handoff.cancel();
    assert!(!worker.join().unwrap());

    // cancellation is permanent, no matter how often it is repeated
    handoff.cancel();
    handoff.cancel();
    assert!(!handoff.send(9));
    assert!(!handoff.try_send(10));
    assert!(!handoff.recv_once(|_| panic!("canceled handoff delivered")));
}
