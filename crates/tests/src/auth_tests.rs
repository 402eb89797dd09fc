use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
async fn login_returns_tokens_and_user() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    let resp = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "admin@acme.test",
            "password": "Admin123!",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert!(!json["access_token"].as_str().unwrap().is_empty());
    assert!(!json["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(json["user"]["email"], "admin@acme.test");
    assert_eq!(json["user"]["role"], "admin");
    assert_eq!(json["user"]["organization_id"], org.org_id);
}

#[tokio::test]
async fn login_wrong_password_and_unknown_email_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.seed_org("acme").await;

    let wrong_password = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "admin@acme.test",
            "password": "nope",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_password.status().as_u16(), 401);
    let wrong_password: Value = wrong_password.json().await.unwrap();

    let unknown_email = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "ghost@acme.test",
            "password": "Admin123!",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_email.status().as_u16(), 401);
    let unknown_email: Value = unknown_email.json().await.unwrap();

    // Same message either way, so the endpoint cannot enumerate accounts
    assert_eq!(wrong_password["message"], unknown_email["message"]);
    assert_eq!(wrong_password["message"], "Invalid email or password");
}

#[tokio::test]
async fn login_email_is_case_insensitive() {
    let app = TestApp::spawn().await;
    app.seed_org("acme").await;

    let resp = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "ADMIN@Acme.Test",
            "password": "Admin123!",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn me_returns_current_user() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    let resp = app
        .auth_get("/api/auth/me", &org.member.access_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["email"], "member@acme.test");
    assert_eq!(json["role"], "user");
}

#[tokio::test]
async fn unauthenticated_request_gets_401() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/api/customers")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn garbage_token_gets_401() {
    let app = TestApp::spawn().await;

    let resp = app
        .auth_get("/api/customers", "not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn refresh_reissues_tokens_from_current_user_document() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    // Promote the member out of band; the old access token still carries
    // the stale role, but refresh rebuilds claims from the database
    let resp = app
        .auth_put(
            &format!("/api/admin/users/{}", org.member.id),
            &org.admin.access_token,
        )
        .json(&serde_json::json!({ "role": "manager" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let resp = app
        .client
        .post(app.url("/api/auth/refresh"))
        .json(&serde_json::json!({ "refresh_token": org.member.refresh_token }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["user"]["role"], "manager");

    // The fresh access token now passes the manager-only gate
    let token = json["access_token"].as_str().unwrap();
    let resp = app.auth_get("/api/analytics", token).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn access_token_cannot_be_used_as_refresh_token() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    let resp = app
        .client
        .post(app.url("/api/auth/refresh"))
        .json(&serde_json::json!({ "refresh_token": org.admin.access_token }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn logout_clears_session_cookie() {
    let app = TestApp::spawn().await;
    app.seed_org("acme").await;

    let resp = app
        .client
        .post(app.url("/api/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(cookie.contains("access_token=;"), "cookie: {}", cookie);
    assert!(cookie.contains("Max-Age=0"), "cookie: {}", cookie);
}

#[tokio::test]
async fn session_cookie_authenticates_without_bearer_header() {
    let app = TestApp::spawn().await;
    app.seed_org("acme").await;

    // login_user uses the shared cookie-store client, so the Set-Cookie
    // from login is replayed here automatically
    app.login_user("admin@acme.test", "Admin123!").await;

    let resp = app.client.get(app.url("/api/auth/me")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["email"], "admin@acme.test");
}
