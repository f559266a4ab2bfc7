// Copyright (C) 2026 Seatline Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for registration, sign-in, and lockout.

use crate::accounts::AccountService;
use crate::error::{BookingError, INVALID_CREDENTIALS_MESSAGE, LOCKED_ACCOUNT_MESSAGE};
use crate::request_response::{LoginOutcome, LoginRequest};
use crate::tests::helpers::{account_service, register_request};
use seatline_domain::{Role, User};
use seatline_persistence::MemoryStore;
use std::sync::Arc;

fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: String::from(username),
        password: String::from(password),
    }
}

#[test]
fn test_register_normalizes_username() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);

    let user: User = service.register(&register_request("Alice")).unwrap();

    assert_eq!(user.username(), "alice");
    assert_eq!(user.role(), Role::Attendee);
    assert_eq!(user.failed_login_count(), 0);
    assert!(!user.is_locked());
}

#[test]
fn test_register_rejects_taken_username() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);
    service.register(&register_request("alice")).unwrap();

    let mut request = register_request("ALICE");
    request.email = String::from("other@example.com");

    let err: BookingError = service.register(&request).unwrap_err();
    assert!(matches!(err, BookingError::Conflict { .. }));
}

#[test]
fn test_register_rejects_taken_email() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);
    service.register(&register_request("alice")).unwrap();

    let mut request = register_request("bob");
    request.email = String::from("Alice@Example.com");

    let err: BookingError = service.register(&request).unwrap_err();
    assert!(matches!(err, BookingError::Conflict { .. }));
}

#[test]
fn test_register_rejects_weak_password() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);

    let mut request = register_request("alice");
    request.password = String::from("short");

    let err: BookingError = service.register(&request).unwrap_err();
    assert!(matches!(err, BookingError::PasswordPolicyViolation { .. }));
}

#[test]
fn test_register_rejects_invalid_email() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);

    let mut request = register_request("alice");
    request.email = String::from("not-an-email");

    let err: BookingError = service.register(&request).unwrap_err();
    assert!(matches!(err, BookingError::Validation { ref field, .. } if field == "email"));
}

#[test]
fn test_login_with_correct_credentials() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);
    let user: User = service.register(&register_request("alice")).unwrap();

    let outcome: LoginOutcome = service
        .login(&login_request("alice", "Str0ng-Passw0rd!"))
        .unwrap();

    assert_eq!(outcome.user_id, *user.user_id());
    assert_eq!(outcome.username, "alice");
    assert_eq!(outcome.role, Role::Attendee);
}

#[test]
fn test_login_username_is_case_insensitive() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);
    service.register(&register_request("alice")).unwrap();

    service
        .login(&login_request("ALICE", "Str0ng-Passw0rd!"))
        .unwrap();
}

#[test]
fn test_login_failures_share_one_message() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);
    service.register(&register_request("alice")).unwrap();

    let unknown_user: BookingError = service
        .login(&login_request("nobody", "Str0ng-Passw0rd!"))
        .unwrap_err();
    let wrong_password: BookingError = service
        .login(&login_request("alice", "wrong-password"))
        .unwrap_err();

    // An attacker cannot tell a wrong password from an unknown username.
    assert_eq!(unknown_user, wrong_password);
    assert_eq!(unknown_user.to_string(), INVALID_CREDENTIALS_MESSAGE);
}

#[test]
fn test_failed_login_increments_counter() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);
    let user: User = service.register(&register_request("alice")).unwrap();

    service
        .login(&login_request("alice", "wrong-password"))
        .unwrap_err();
    service
        .login(&login_request("alice", "wrong-password"))
        .unwrap_err();

    let loaded: User = service.get_user(user.user_id()).unwrap();
    assert_eq!(loaded.failed_login_count(), 2);
    assert!(!loaded.is_locked());
}

#[test]
fn test_successful_login_resets_counter() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);
    let user: User = service.register(&register_request("alice")).unwrap();

    for _ in 0..4 {
        service
            .login(&login_request("alice", "wrong-password"))
            .unwrap_err();
    }
    service
        .login(&login_request("alice", "Str0ng-Passw0rd!"))
        .unwrap();

    let loaded: User = service.get_user(user.user_id()).unwrap();
    assert_eq!(loaded.failed_login_count(), 0);
    assert!(!loaded.is_locked());
}

#[test]
fn test_fifth_failure_locks_the_account() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);
    let user: User = service.register(&register_request("alice")).unwrap();

    for _ in 0..4 {
        let err: BookingError = service
            .login(&login_request("alice", "wrong-password"))
            .unwrap_err();
        assert_eq!(err, BookingError::InvalidCredentials);
    }
    // The fifth failure still reports invalid credentials; the lock shows
    // on the next attempt.
    let fifth: BookingError = service
        .login(&login_request("alice", "wrong-password"))
        .unwrap_err();
    assert_eq!(fifth, BookingError::InvalidCredentials);
    assert!(service.get_user(user.user_id()).unwrap().is_locked());

    // Even the correct password is now rejected, before verification.
    let locked: BookingError = service
        .login(&login_request("alice", "Str0ng-Passw0rd!"))
        .unwrap_err();
    assert_eq!(locked, BookingError::LockedAccount);
    assert_eq!(locked.to_string(), LOCKED_ACCOUNT_MESSAGE);
}

#[test]
fn test_unlock_restores_access() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);
    let user: User = service.register(&register_request("alice")).unwrap();

    for _ in 0..5 {
        service
            .login(&login_request("alice", "wrong-password"))
            .unwrap_err();
    }
    assert!(service.get_user(user.user_id()).unwrap().is_locked());

    service.unlock(user.user_id()).unwrap();

    let loaded: User = service.get_user(user.user_id()).unwrap();
    assert!(!loaded.is_locked());
    assert_eq!(loaded.failed_login_count(), 0);
    service
        .login(&login_request("alice", "Str0ng-Passw0rd!"))
        .unwrap();
}

#[test]
fn test_change_password_replaces_the_credential() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);
    let user: User = service.register(&register_request("alice")).unwrap();

    service
        .change_password(user.user_id(), "An0ther-Secr3t!")
        .unwrap();

    let stale: BookingError = service
        .login(&login_request("alice", "Str0ng-Passw0rd!"))
        .unwrap_err();
    assert_eq!(stale, BookingError::InvalidCredentials);
    service
        .login(&login_request("alice", "An0ther-Secr3t!"))
        .unwrap();
}

#[test]
fn test_change_password_enforces_the_policy() {
    let store = Arc::new(MemoryStore::new());
    let service: AccountService = account_service(&store);
    let user: User = service.register(&register_request("alice")).unwrap();

    let err: BookingError = service.change_password(user.user_id(), "weak").unwrap_err();
    assert!(matches!(err, BookingError::PasswordPolicyViolation { .. }));
}
