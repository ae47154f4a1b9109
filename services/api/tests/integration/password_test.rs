use playconnect_api::error::ApiError;
use playconnect_api::usecase::auth::verify_password;
use playconnect_api::usecase::password::{
    RequestResetInput, RequestResetUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

use crate::helpers::{MockMailer, MockResetCodeStore, MockUserRepo, test_user};

#[tokio::test]
async fn should_issue_and_deliver_reset_code() {
    let user = test_user("alice@example.com", "abc123");
    let codes = MockResetCodeStore::empty();
    let codes_handle = codes.codes_handle();
    let mailer = MockMailer::working();
    let sent_handle = mailer.sent_handle();

    let usecase = RequestResetUseCase {
        users: MockUserRepo::new(vec![user]),
        codes,
        mailer,
    };
    let out = usecase
        .execute(RequestResetInput {
            email: "alice@example.com".to_owned(),
        })
        .await
        .unwrap();

    assert!(out.delivered);
    let codes = codes_handle.lock().unwrap();
    let code = codes.get("alice@example.com").expect("code persisted");
    assert_eq!(code.len(), 6);

    // Delivered email carries the stored code.
    let sent = sent_handle.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "alice@example.com");
    assert!(sent[0].1.contains(code.as_str()));
}

#[tokio::test]
async fn should_not_persist_code_for_unknown_email() {
    let codes = MockResetCodeStore::empty();
    let codes_handle = codes.codes_handle();

    let usecase = RequestResetUseCase {
        users: MockUserRepo::empty(),
        codes,
        mailer: MockMailer::working(),
    };
    let result = usecase
        .execute(RequestResetInput {
            email: "nobody@example.com".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::UserNotFound)));
    assert!(codes_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_keep_code_valid_when_delivery_fails() {
    let user = test_user("alice@example.com", "abc123");
    let codes = MockResetCodeStore::empty();
    let codes_handle = codes.codes_handle();

    let usecase = RequestResetUseCase {
        users: MockUserRepo::new(vec![user]),
        codes,
        mailer: MockMailer::failing(),
    };
    let out = usecase
        .execute(RequestResetInput {
            email: "alice@example.com".to_owned(),
        })
        .await
        .unwrap();

    // The request still succeeds, with a degraded-delivery indicator, and the
    // code stays redeemable.
    assert!(!out.delivered);
    assert!(codes_handle.lock().unwrap().contains_key("alice@example.com"));
}

#[tokio::test]
async fn should_replace_prior_code_on_reissue() {
    let user = test_user("alice@example.com", "abc123");
    let codes = MockResetCodeStore::empty();
    let codes_handle = codes.codes_handle();

    let usecase = RequestResetUseCase {
        users: MockUserRepo::new(vec![user]),
        codes,
        mailer: MockMailer::working(),
    };
    usecase
        .execute(RequestResetInput {
            email: "alice@example.com".to_owned(),
        })
        .await
        .unwrap();
    let first = codes_handle.lock().unwrap()["alice@example.com"].clone();

    // Reissue until the generated code differs, then check only one survives.
    loop {
        usecase
            .execute(RequestResetInput {
                email: "alice@example.com".to_owned(),
            })
            .await
            .unwrap();
        let codes = codes_handle.lock().unwrap();
        assert_eq!(codes.len(), 1);
        if codes["alice@example.com"] != first {
            break;
        }
    }
}

#[tokio::test]
async fn should_reset_password_and_consume_code() {
    let user = test_user("alice@example.com", "abc123");
    let users = MockUserRepo::new(vec![user]);
    let users_handle = users.users_handle();
    let codes = MockResetCodeStore::empty();
    codes
        .codes_handle()
        .lock()
        .unwrap()
        .insert("alice@example.com".to_owned(), "123456".to_owned());

    let usecase = ResetPasswordUseCase { users, codes };
    usecase
        .execute(ResetPasswordInput {
            email: "alice@example.com".to_owned(),
            code: "123456".to_owned(),
            new_password: "fresh42pass".to_owned(),
        })
        .await
        .unwrap();

    let users = users_handle.lock().unwrap();
    assert!(verify_password("fresh42pass", &users[0].password_hash));
    assert!(!verify_password("abc123", &users[0].password_hash));
}

#[tokio::test]
async fn should_reject_second_redemption_of_same_code() {
    let user = test_user("alice@example.com", "abc123");
    let codes = MockResetCodeStore::empty();
    codes
        .codes_handle()
        .lock()
        .unwrap()
        .insert("alice@example.com".to_owned(), "123456".to_owned());

    let usecase = ResetPasswordUseCase {
        users: MockUserRepo::new(vec![user]),
        codes,
    };
    let input = || ResetPasswordInput {
        email: "alice@example.com".to_owned(),
        code: "123456".to_owned(),
        new_password: "fresh42pass".to_owned(),
    };

    usecase.execute(input()).await.unwrap();
    let second = usecase.execute(input()).await;
    assert!(matches!(second, Err(ApiError::InvalidResetCode)));
}

#[tokio::test]
async fn should_reject_wrong_code_without_consuming() {
    let user = test_user("alice@example.com", "abc123");
    let codes = MockResetCodeStore::empty();
    let codes_handle = codes.codes_handle();
    codes_handle
        .lock()
        .unwrap()
        .insert("alice@example.com".to_owned(), "123456".to_owned());

    let usecase = ResetPasswordUseCase {
        users: MockUserRepo::new(vec![user]),
        codes,
    };
    let result = usecase
        .execute(ResetPasswordInput {
            email: "alice@example.com".to_owned(),
            code: "654321".to_owned(),
            new_password: "fresh42pass".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::InvalidResetCode)));
    // Stored code untouched by the failed attempt.
    assert_eq!(codes_handle.lock().unwrap()["alice@example.com"], "123456");
}

#[tokio::test]
async fn should_reject_weak_replacement_password() {
    let usecase = ResetPasswordUseCase {
        users: MockUserRepo::new(vec![test_user("alice@example.com", "abc123")]),
        codes: MockResetCodeStore::empty(),
    };
    let result = usecase
        .execute(ResetPasswordInput {
            email: "alice@example.com".to_owned(),
            code: "123456".to_owned(),
            new_password: "short".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}
