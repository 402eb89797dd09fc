use mongodb::{Database, IndexModel, options::IndexOptions};
use tracing::info;

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Organizations
    create_indexes(
        db,
        "organizations",
        vec![
            index_unique(bson::doc! { "slug": 1 }),
            index(bson::doc! { "owner_id": 1 }),
        ],
    )
    .await?;

    // Users. Email uniqueness is per organization; the global owner-email
    // check at signup happens in application code.
    create_indexes(
        db,
        "users",
        vec![
            index_unique(bson::doc! { "email": 1, "organization_id": 1 }),
            index(bson::doc! { "organization_id": 1, "role": 1 }),
        ],
    )
    .await?;

    // Customers
    create_indexes(
        db,
        "customers",
        vec![
            index(bson::doc! { "organization_id": 1, "created_at": -1 }),
            index(bson::doc! { "organization_id": 1, "status": 1 }),
        ],
    )
    .await?;

    // Projects
    create_indexes(
        db,
        "projects",
        vec![
            index(bson::doc! { "organization_id": 1, "created_at": -1 }),
            index(bson::doc! { "organization_id": 1, "customer_id": 1 }),
            index(bson::doc! { "organization_id": 1, "status": 1 }),
        ],
    )
    .await?;

    // Tasks
    create_indexes(
        db,
        "tasks",
        vec![
            index(bson::doc! { "organization_id": 1, "created_at": -1 }),
            index(bson::doc! { "organization_id": 1, "project_id": 1 }),
            index(bson::doc! { "organization_id": 1, "assigned_to": 1 }),
        ],
    )
    .await?;

    // Activities
    create_indexes(
        db,
        "activities",
        vec![index(bson::doc! { "organization_id": 1, "created_at": -1 })],
    )
    .await?;

    // Notifications
    create_indexes(
        db,
        "notifications",
        vec![
            index(bson::doc! { "user_id": 1, "organization_id": 1, "created_at": -1 }),
            index(bson::doc! { "user_id": 1, "organization_id": 1, "read": 1 }),
        ],
    )
    .await?;

    // Demo requests (global, no organization predicate)
    create_indexes(
        db,
        "demo_requests",
        vec![
            index(bson::doc! { "status": 1, "created_at": -1 }),
            index(bson::doc! { "created_at": -1 }),
        ],
    )
    .await?;

    info!("MongoDB indexes ensured");
    Ok(())
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

fn index_unique(keys: bson::Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}
