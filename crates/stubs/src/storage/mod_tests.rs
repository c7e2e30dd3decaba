// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn stub(target: Option<&str>, status: u16) -> ResponseStub {
    let stub = ResponseStub::new().with_status(status);
    match target {
        Some(target) => stub.with_target(target),
        None => stub,
    }
}

#[test]
fn exact_match_wins_over_earlier_stubs() {
    let mut stubs = vec![
        stub(None, 1),
        stub(Some("/other"), 2),
        stub(Some("/users"), 3),
    ];
    let taken = take_stub(&mut stubs, "/users").unwrap();
    assert_eq!(taken.status, 3);
    assert_eq!(stubs.len(), 2);
}

#[test]
fn wildcard_wins_over_mismatched_target() {
    let mut stubs = vec![stub(Some("/other"), 1), stub(None, 2), stub(None, 3)];
    assert_eq!(take_stub(&mut stubs, "/users").unwrap().status, 2);
    assert_eq!(take_stub(&mut stubs, "/users").unwrap().status, 3);
}

#[test]
fn falls_back_to_first_registered() {
    let mut stubs = vec![stub(Some("/a"), 1), stub(Some("/b"), 2)];
    assert_eq!(take_stub(&mut stubs, "/users").unwrap().status, 1);
    assert_eq!(take_stub(&mut stubs, "/users").unwrap().status, 2);
    assert!(take_stub(&mut stubs, "/users").is_none());
}
