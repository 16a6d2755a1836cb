// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::json;

use innkeep_domain::{Booking, BookingPatch, BookingStatus, User, UserPatch};

use crate::{
    AUTHORIZATION, Method, Request, Response, SimulatedBackend, SimulationConfig, Transport,
};

use super::helpers::{create_test_bookings, create_test_user, create_test_users};

const TOKEN: &str = "session_test";

fn backend() -> SimulatedBackend {
    let backend: SimulatedBackend = SimulatedBackend::new(
        create_test_bookings(),
        create_test_users(),
        SimulationConfig::default(),
    );
    backend.accept_token(TOKEN);
    backend
}

fn authed(request: Request) -> Request {
    request.with_header(AUTHORIZATION, format!("Bearer {TOKEN}"))
}

#[tokio::test]
async fn test_rejects_missing_or_unknown_token() {
    let backend: SimulatedBackend = backend();

    let anonymous: Response = backend.send(Request::get("/bookings")).await.unwrap();
    let stranger: Response = backend
        .send(Request::get("/bookings").with_header(AUTHORIZATION, "Bearer nope"))
        .await
        .unwrap();

    assert_eq!(anonymous.status, 401);
    assert_eq!(stranger.status, 401);
}

#[tokio::test]
async fn test_lists_bookings() {
    let backend: SimulatedBackend = backend();

    let response: Response = backend.send(authed(Request::get("/bookings"))).await.unwrap();

    assert!(response.is_success());
    let bookings: Vec<Booking> = response.json().unwrap();
    assert_eq!(bookings, create_test_bookings());
}

#[tokio::test]
async fn test_patch_booking_enforces_lifecycle() {
    let backend: SimulatedBackend = backend();
    let patch: BookingPatch = BookingPatch::status(BookingStatus::Confirmed);

    let accepted: Response = backend
        .send(authed(Request::patch("/bookings/10", &patch).unwrap()))
        .await
        .unwrap();
    let refused: Response = backend
        .send(authed(Request::patch("/bookings/13", &patch).unwrap()))
        .await
        .unwrap();

    assert_eq!(accepted.status, 200);
    assert_eq!(accepted.json::<Booking>().unwrap().status, BookingStatus::Confirmed);
    assert_eq!(refused.status, 422);
    assert_eq!(backend.bookings()[3].status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_delete_unknown_booking_is_not_found() {
    let backend: SimulatedBackend = backend();

    let response: Response = backend
        .send(authed(Request::delete("/bookings/999")))
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.message(), "Booking #999 not found");
}

#[tokio::test]
async fn test_user_routes() {
    let backend: SimulatedBackend = backend();
    let newcomer: User = create_test_user(9, "Nia New", innkeep_domain::UserRole::Staff);

    let created: Response = backend
        .send(authed(Request::post("/users", &newcomer).unwrap()))
        .await
        .unwrap();
    let duplicate: Response = backend
        .send(authed(Request::post("/users", &newcomer).unwrap()))
        .await
        .unwrap();
    let patched: Response = backend
        .send(authed(
            Request::patch("/users/9", &UserPatch::active(false)).unwrap(),
        ))
        .await
        .unwrap();
    let deleted: Response = backend
        .send(authed(Request::delete("/users/9")))
        .await
        .unwrap();

    assert_eq!(created.status, 200);
    assert_eq!(duplicate.status, 409);
    assert!(!patched.json::<User>().unwrap().is_active);
    assert_eq!(deleted.status, 200);
    assert_eq!(backend.users(), create_test_users());
}

#[tokio::test]
async fn test_bad_input_is_rejected() {
    let backend: SimulatedBackend = backend();

    let bad_id: Response = backend
        .send(authed(Request::delete("/users/abc")))
        .await
        .unwrap();
    let bad_body: Response = backend
        .send(authed(
            Request::patch("/users/2", &json!({"isActive": "yes"})).unwrap(),
        ))
        .await
        .unwrap();
    let no_route: Response = backend.send(authed(Request::get("/rooms"))).await.unwrap();

    assert_eq!(bad_id.status, 400);
    assert_eq!(bad_body.status, 400);
    assert_eq!(no_route.status, 404);
}

#[tokio::test]
async fn test_fail_next_counts_down() {
    let backend: SimulatedBackend = backend();
    backend.fail_next(2);

    let mut statuses: Vec<u16> = Vec::new();
    for _ in 0..3 {
        statuses.push(backend.send(authed(Request::get("/users"))).await.unwrap().status);
    }

    assert_eq!(statuses, vec![503, 503, 200]);
}

#[tokio::test]
async fn test_failure_rate_of_one_always_fails() {
    let backend: SimulatedBackend = backend();
    backend.set_failure_rate(1.0);

    let response: Response = backend.send(authed(Request::get("/users"))).await.unwrap();

    assert_eq!(response.status, 500);
}

#[tokio::test]
async fn test_records_every_request() {
    let backend: SimulatedBackend = backend();

    let _anonymous: Response = backend.send(Request::get("/users")).await.unwrap();
    let _listed: Response = backend.send(authed(Request::get("/bookings"))).await.unwrap();

    assert_eq!(
        backend.requests(),
        vec![
            (Method::Get, String::from("/users")),
            (Method::Get, String::from("/bookings")),
        ]
    );
}
