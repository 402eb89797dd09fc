use crate::fixtures::test_app::TestApp;
use bson::doc;
use serde_json::Value;

#[tokio::test]
async fn signup_creates_org_owner_and_welcome_notification() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    let resp = app
        .auth_post("/api/organizations", &org.admin.access_token)
        .json(&serde_json::json!({
            "name": "Beta Industries",
            "email": "info@beta.test",
            "plan": "starter",
            "owner_name": "Beta Owner",
            "owner_email": "owner@beta.test",
            "owner_password": "Owner123!",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 201);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["organization"]["slug"], "beta-industries");
    assert_eq!(json["organization"]["plan"], "starter");
    assert_eq!(json["organization"]["max_users"], 10);
    assert_eq!(json["organization"]["max_projects"], 50);
    assert_eq!(
        json["organization"]["owner_id"],
        json["owner"]["id"],
        "owner reference should point at the owner user"
    );
    assert_eq!(json["owner"]["role"], "admin");

    // The new owner can log in and finds the welcome notification waiting
    let owner = app.login_user("owner@beta.test", "Owner123!").await;
    let resp = app
        .auth_get("/api/notifications", &owner.access_token)
        .send()
        .await
        .unwrap();
    let inbox: Value = resp.json().await.unwrap();
    let notifications = inbox["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["title"], "Welcome to Prisbo!");
    assert_eq!(notifications[0]["kind"], "success");
    assert_eq!(inbox["unread_count"], 1);
}

#[tokio::test]
async fn signup_slug_collision_appends_counter() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    let create = |n: u32| {
        serde_json::json!({
            "name": "Gamma Group",
            "email": "info@gamma.test",
            "owner_name": "Gamma Owner",
            "owner_email": format!("owner{}@gamma.test", n),
            "owner_password": "Owner123!",
        })
    };

    let first: Value = app
        .auth_post("/api/organizations", &org.admin.access_token)
        .json(&create(1))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: Value = app
        .auth_post("/api/organizations", &org.admin.access_token)
        .json(&create(2))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first["organization"]["slug"], "gamma-group");
    assert_eq!(second["organization"]["slug"], "gamma-group-1");
}

#[tokio::test]
async fn signup_rejects_owner_email_taken_anywhere() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    // member@acme.test already exists in another organization, and the
    // signup check is global
    let resp = app
        .auth_post("/api/organizations", &org.admin.access_token)
        .json(&serde_json::json!({
            "name": "Delta LLC",
            "email": "info@delta.test",
            "owner_name": "Delta Owner",
            "owner_email": "member@acme.test",
            "owner_password": "Owner123!",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 409);
}

#[tokio::test]
async fn signup_rejects_short_password_and_missing_fields() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    let resp = app
        .auth_post("/api/organizations", &org.admin.access_token)
        .json(&serde_json::json!({
            "name": "Epsilon",
            "email": "info@epsilon.test",
            "owner_name": "Owner",
            "owner_email": "owner@epsilon.test",
            "owner_password": "short",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);

    let resp = app
        .auth_post("/api/organizations", &org.admin.access_token)
        .json(&serde_json::json!({ "name": "Epsilon" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
    let json: Value = resp.json().await.unwrap();
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .starts_with("Missing required fields:"),
        "message: {}",
        json["message"]
    );
}

#[tokio::test]
async fn get_current_returns_active_organization() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    let resp = app
        .auth_get("/api/organizations", &org.member.access_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["id"], org.org_id);
    assert_eq!(json["slug"], "acme");
    assert_eq!(json["status"], "active");
    assert_eq!(json["plan"], "professional");
    assert_eq!(json["max_users"], 50);
    assert_eq!(json["max_projects"], 200);
}

#[tokio::test]
async fn switch_to_home_org_reissues_tokens() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    let resp = app
        .auth_post("/api/organizations/switch", &org.admin.access_token)
        .json(&serde_json::json!({ "organization_id": org.org_id }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["user"]["current_organization_id"], org.org_id);
    assert!(!json["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn switch_to_foreign_org_is_forbidden() {
    let app = TestApp::spawn().await;
    let acme = app.seed_org("acme").await;
    let beta = app.seed_org("beta").await;

    let resp = app
        .auth_post("/api/organizations/switch", &acme.admin.access_token)
        .json(&serde_json::json!({ "organization_id": beta.org_id }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn switch_to_suspended_org_is_forbidden() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    app.db
        .collection::<bson::Document>("organizations")
        .update_one(
            doc! { "slug": "acme" },
            doc! { "$set": { "status": "suspended" } },
        )
        .await
        .unwrap();

    let resp = app
        .auth_post("/api/organizations/switch", &org.admin.access_token)
        .json(&serde_json::json!({ "organization_id": org.org_id }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 403);
}
