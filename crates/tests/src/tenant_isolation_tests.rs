use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
async fn customer_lists_are_scoped_per_organization() {
    let app = TestApp::spawn().await;
    let acme = app.seed_org("acme").await;
    let beta = app.seed_org("beta").await;

    app.create_customer(&acme.admin.access_token, "Acme Client").await;
    app.create_customer(&acme.admin.access_token, "Acme Other").await;
    app.create_customer(&beta.admin.access_token, "Beta Client").await;

    let acme_list: Value = app
        .auth_get("/api/customers", &acme.admin.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(acme_list["total"], 2);

    let beta_list: Value = app
        .auth_get("/api/customers", &beta.admin.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(beta_list["total"], 1);
    assert_eq!(beta_list["customers"][0]["name"], "Beta Client");
}

#[tokio::test]
async fn cross_tenant_reads_are_not_found_not_forbidden() {
    let app = TestApp::spawn().await;
    let acme = app.seed_org("acme").await;
    let beta = app.seed_org("beta").await;

    let customer_id = app.create_customer(&acme.admin.access_token, "Acme Client").await;

    // A foreign id must be indistinguishable from a nonexistent one
    let resp = app
        .auth_get(&format!("/api/customers/{}", customer_id), &beta.admin.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let resp = app
        .auth_get(
            &format!("/api/customers/{}", bson::oid::ObjectId::new()),
            &beta.admin.access_token,
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn cross_tenant_update_and_delete_are_not_found() {
    let app = TestApp::spawn().await;
    let acme = app.seed_org("acme").await;
    let beta = app.seed_org("beta").await;

    let customer_id = app.create_customer(&acme.admin.access_token, "Acme Client").await;

    let resp = app
        .auth_put(&format!("/api/customers/{}", customer_id), &beta.admin.access_token)
        .json(&serde_json::json!({ "name": "Hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let resp = app
        .auth_delete(&format!("/api/customers/{}", customer_id), &beta.admin.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    // The customer is untouched in its home organization
    let resp = app
        .auth_get(&format!("/api/customers/{}", customer_id), &acme.admin.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["name"], "Acme Client");
}

#[tokio::test]
async fn project_cannot_reference_foreign_customer() {
    let app = TestApp::spawn().await;
    let acme = app.seed_org("acme").await;
    let beta = app.seed_org("beta").await;

    let acme_customer = app.create_customer(&acme.admin.access_token, "Acme Client").await;

    // The parent-existence check runs in the caller's scope, so the
    // foreign customer reads as missing
    let resp = app
        .auth_post("/api/projects", &beta.admin.access_token)
        .json(&serde_json::json!({
            "name": "Infiltration",
            "customer_id": acme_customer,
            "status": "pending",
            "due_date": "2026-12-31T00:00:00Z",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn team_roster_is_scoped_per_organization() {
    let app = TestApp::spawn().await;
    let acme = app.seed_org("acme").await;
    let beta = app.seed_org("beta").await;

    let acme_roster: Value = app
        .auth_get("/api/users", &acme.member.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let users = acme_roster["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(
        users
            .iter()
            .all(|u| u["email"].as_str().unwrap().ends_with("@acme.test")),
        "roster: {}",
        acme_roster
    );

    let beta_roster: Value = app
        .auth_get("/api/users", &beta.member.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(beta_roster["users"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn activity_feed_is_scoped_per_organization() {
    let app = TestApp::spawn().await;
    let acme = app.seed_org("acme").await;
    let beta = app.seed_org("beta").await;

    app.create_customer(&acme.admin.access_token, "Acme Client").await;

    let beta_feed: Value = app
        .auth_get("/api/activities", &beta.admin.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(beta_feed["activities"].as_array().unwrap().len(), 0);

    let acme_feed: Value = app
        .auth_get("/api/activities", &acme.admin.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(acme_feed["activities"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn admin_cannot_delete_user_in_foreign_organization() {
    let app = TestApp::spawn().await;
    let acme = app.seed_org("acme").await;
    let beta = app.seed_org("beta").await;

    let resp = app
        .auth_delete(
            &format!("/api/admin/users/{}", beta.member.id),
            &acme.admin.access_token,
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    // Beta member is still there
    let resp = app
        .auth_get("/api/auth/me", &beta.member.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}
