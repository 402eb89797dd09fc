use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
async fn summary_counts_by_status_within_scope() {
    let app = TestApp::spawn().await;
    let acme = app.seed_org("acme").await;
    let beta = app.seed_org("beta").await;
    let token = &acme.admin.access_token;

    let customer_id = app.create_customer(token, "Counted Client").await;
    let other = app.create_customer(token, "Other Client").await;
    app.auth_put(&format!("/api/customers/{}", other), token)
        .json(&serde_json::json!({ "status": "converted" }))
        .send()
        .await
        .unwrap();

    let project = app.create_project(token, &customer_id, "Counted Project").await;
    app.auth_put(&format!("/api/projects/{}", project), token)
        .json(&serde_json::json!({ "status": "in-progress" }))
        .send()
        .await
        .unwrap();

    app.auth_post("/api/tasks", token)
        .json(&serde_json::json!({ "title": "Counted Task", "project_id": project }))
        .send()
        .await
        .unwrap();

    // Noise in another organization must not leak into the counts
    app.create_customer(&beta.admin.access_token, "Beta Client").await;

    let json: Value = app
        .auth_get("/api/analytics", token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(json["customers"]["new"], 1);
    assert_eq!(json["customers"]["converted"], 1);
    assert_eq!(json["customers"]["total"], 2);
    assert_eq!(json["projects"]["in_progress"], 1);
    assert_eq!(json["projects"]["total"], 1);
    assert_eq!(json["tasks"]["pending"], 1);
    assert_eq!(json["tasks"]["total"], 1);
    assert_eq!(json["team_size"], 2);
}

#[tokio::test]
async fn summary_requires_manager_or_admin() {
    let app = TestApp::spawn().await;
    let org = app.seed_org("acme").await;

    let resp = app
        .auth_get("/api/analytics", &org.member.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    let resp = app
        .auth_get("/api/analytics", &org.admin.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}
