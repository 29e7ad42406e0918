use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::time::Duration;

use obj_iface::{wrap, Handle};
use serde_json::{json, Value};
use tokio::time::sleep;

fn fixture() -> Value {
    json!({
        "a": 1,
        "b": {
            "c": 2,
            "d": 3,
        },
        "e": [4, 5],
    })
}

/// Longer delays for earlier keys, so completion order is the reverse of
/// key order.
fn delay_for(key: &str) -> Duration {
    match key {
        "a" => Duration::from_millis(30),
        "b" => Duration::from_millis(20),
        _ => Duration::from_millis(5),
    }
}

#[tokio::test]
async fn test_for_each_async_waits_for_all() {
    let h = Handle::new(fixture()).unwrap();
    let done = RefCell::new(Vec::new());
    h.for_each_async(|_, key, _| {
        let done = &done;
        async move {
            sleep(delay_for(key)).await;
            done.borrow_mut().push(key.to_owned());
            Ok::<_, Infallible>(())
        }
    })
    .await
    .unwrap();

    let mut done = done.into_inner();
    assert_eq!(done.len(), 3);
    done.sort();
    assert_eq!(done, vec!["a", "b", "e"]);
}

#[tokio::test]
async fn test_for_each_async_fires_all_before_awaiting() {
    let h = Handle::new(fixture()).unwrap();
    let started = RefCell::new(Vec::new());
    let polled = Cell::new(false);
    h.for_each_async(|_, key, _| {
        assert!(!polled.get(), "callback ran after a future was polled");
        started.borrow_mut().push(key.to_owned());
        let polled = &polled;
        async move {
            polled.set(true);
            Ok::<_, Infallible>(())
        }
    })
    .await
    .unwrap();
    assert_eq!(started.into_inner(), vec!["a", "b", "e"]);
}

#[tokio::test]
async fn test_map_async_keeps_key_order() {
    let h = Handle::new(fixture()).unwrap();
    let finished = RefCell::new(Vec::new());
    let out = h
        .map_async(|v, key, _| {
            let finished = &finished;
            async move {
                sleep(delay_for(key)).await;
                finished.borrow_mut().push(key.to_owned());
                Ok::<_, Infallible>(json!({ "key": key, "was": v }))
            }
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(finished.into_inner(), vec!["e", "b", "a"]);
    let keys: Vec<_> = out.keys().cloned().collect();
    assert_eq!(keys, vec!["a", "b", "e"]);
    assert_eq!(out["b"], json!({"key": "b", "was": {"c": 2, "d": 3}}));
    assert_eq!(h.read(), &fixture());
}

#[tokio::test]
async fn test_map_async_empty_is_none() {
    let h = Handle::new(json!({})).unwrap();
    let out = h
        .map_async(|v, _, _| async move { Ok::<_, Infallible>(v.clone()) })
        .await
        .unwrap();
    assert!(out.is_none());
}

#[tokio::test]
async fn test_map_async_first_error_wins() {
    let h = Handle::new(fixture()).unwrap();
    let err = h
        .map_async(|_, key, _| async move {
            match key {
                "b" => Err(format!("failed on {key}")),
                _ => Ok(json!(key)),
            }
        })
        .await
        .unwrap_err();
    assert_eq!(err, "failed on b");
}

#[tokio::test]
async fn test_for_each_async_error_keeps_sibling_effects() {
    let h = Handle::new(fixture()).unwrap();
    let effects = RefCell::new(Vec::new());
    let result = h
        .for_each_async(|_, key, _| {
            let effects = &effects;
            async move {
                if key == "b" {
                    sleep(Duration::from_millis(10)).await;
                    return Err("boom");
                }
                effects.borrow_mut().push(key.to_owned());
                Ok(())
            }
        })
        .await;
    assert_eq!(result, Err("boom"));
    // "a" and "e" resolve on their first poll, before "b" fails
    assert_eq!(effects.into_inner(), vec!["a", "e"]);
}

#[tokio::test]
async fn test_map_async_wrap_inherits_options() {
    let mut record = fixture();
    let h = wrap(&mut record, false).unwrap();
    let wrapped = h
        .map_async_wrap(|_, _, nested| async move {
            Ok::<_, Infallible>(nested.map_or(0, |n| n.len()))
        })
        .await
        .unwrap()
        .unwrap();
    assert!(!wrapped.is_deep_copy());
    assert_eq!(wrapped.read(), &json!({"a": 0, "b": 2, "e": 0}));
}

#[tokio::test]
async fn test_filter_async() {
    let h = Handle::new(fixture()).unwrap();
    let out = h
        .filter_async(|v, key, _| async move {
            sleep(delay_for(key)).await;
            Ok::<_, Infallible>(!v.is_number())
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        Value::Object(out),
        json!({"b": {"c": 2, "d": 3}, "e": [4, 5]})
    );
    assert_eq!(h.read(), &fixture());
}

#[tokio::test]
async fn test_filter_async_wrap_none_match() {
    let h = Handle::new(fixture()).unwrap();
    let out = h
        .filter_async_wrap(|_, _, _| async { Ok::<_, Infallible>(false) })
        .await
        .unwrap();
    assert!(out.is_none());
}

#[tokio::test]
async fn test_filter_async_wrap_nested() {
    let h = Handle::new(fixture()).unwrap();
    let kept = h
        .filter_async_wrap(|_, _, nested| async move {
            let nested_sum = nested.map(|n| {
                n.map(|v, _, _| v.clone())
                    .map(|r| r.values().filter_map(Value::as_i64).sum::<i64>())
                    .unwrap_or_default()
            });
            Ok::<_, Infallible>(nested_sum == Some(5))
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.read(), &json!({"b": {"c": 2, "d": 3}}));
}
