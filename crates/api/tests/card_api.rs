//! HTTP-level tests for the multipart card update and image handling.

mod common;

use axum::http::StatusCode;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../db/migrations")]
async fn put_updates_only_the_provided_fields(pool: SqlitePool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let board = common::create_board(&pool, &token, 1001, "Pilot", &[]).await;
    let fkboardid = board["fkboardid"].as_str().unwrap();
    let listid = common::list_ids(&common::kanban(&pool, Some(&token), fkboardid).await)[0].0;
    let card = common::create_card(&pool, &token, listid, "Original title").await;

    let response = common::put_multipart(
        common::build_test_app(pool.clone()),
        &format!("/cards/{card}"),
        Some(&token),
        &[
            ("description", "now with details"),
            ("startdate", "2026-02-01T09:00:00Z"),
        ],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["title"], "Original title");
    assert_eq!(body["description"], "now with details");
    assert!(body["startdate"].as_str().unwrap().starts_with("2026-02-01"));
    assert!(body["enddate"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn put_with_a_malformed_date_is_400(pool: SqlitePool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let board = common::create_board(&pool, &token, 1001, "Pilot", &[]).await;
    let fkboardid = board["fkboardid"].as_str().unwrap();
    let listid = common::list_ids(&common::kanban(&pool, Some(&token), fkboardid).await)[0].0;
    let card = common::create_card(&pool, &token, listid, "Card").await;

    let response = common::put_multipart(
        common::build_test_app(pool),
        &format!("/cards/{card}"),
        Some(&token),
        &[("startdate", "tomorrow-ish")],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn uploaded_image_is_stored_and_served_without_caching(pool: SqlitePool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let board = common::create_board(&pool, &token, 1001, "Pilot", &[]).await;
    let fkboardid = board["fkboardid"].as_str().unwrap();
    let listid = common::list_ids(&common::kanban(&pool, Some(&token), fkboardid).await)[0].0;
    let card = common::create_card(&pool, &token, listid, "Card").await;

    let response = common::put_multipart(
        common::build_test_app(pool.clone()),
        &format!("/cards/{card}"),
        Some(&token),
        &[],
        Some(("image", "cover.png", b"png-bytes")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let image_url = body["imageUrl"].as_str().unwrap();
    assert!(image_url.contains("/uploads/"), "absolute url: {image_url}");
    assert!(image_url.ends_with(".png"));

    // The file is served read-only with caching disabled.
    let path = &image_url[image_url.find("/uploads/").unwrap()..];
    let response = common::get(common::build_test_app(pool), path, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn replacing_an_image_discards_the_old_file(pool: SqlitePool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let board = common::create_board(&pool, &token, 1001, "Pilot", &[]).await;
    let fkboardid = board["fkboardid"].as_str().unwrap();
    let listid = common::list_ids(&common::kanban(&pool, Some(&token), fkboardid).await)[0].0;
    let card = common::create_card(&pool, &token, listid, "Card").await;

    let response = common::put_multipart(
        common::build_test_app(pool.clone()),
        &format!("/cards/{card}"),
        Some(&token),
        &[],
        Some(("image", "first.png", b"first")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let first_url = common::body_json(response).await["imageUrl"]
        .as_str()
        .unwrap()
        .to_string();
    let first_name = first_url.rsplit('/').next().unwrap().to_string();

    let response = common::put_multipart(
        common::build_test_app(pool.clone()),
        &format!("/cards/{card}"),
        Some(&token),
        &[],
        Some(("image", "second.jpg", b"second")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second_url = common::body_json(response).await["imageUrl"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(first_url, second_url);

    let upload_dir = std::path::PathBuf::from(common::test_config().upload_dir);
    assert!(
        !upload_dir.join(&first_name).exists(),
        "superseded image should be removed"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn oversized_upload_is_413(pool: SqlitePool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let board = common::create_board(&pool, &token, 1001, "Pilot", &[]).await;
    let fkboardid = board["fkboardid"].as_str().unwrap();
    let listid = common::list_ids(&common::kanban(&pool, Some(&token), fkboardid).await)[0].0;
    let card = common::create_card(&pool, &token, listid, "Card").await;

    let oversized = vec![0u8; common::TEST_MAX_UPLOAD_BYTES + 1];
    let response = common::put_multipart(
        common::build_test_app(pool),
        &format!("/cards/{card}"),
        Some(&token),
        &[],
        Some(("image", "big.png", &oversized)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn put_on_an_unknown_card_is_404(pool: SqlitePool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let response = common::put_multipart(
        common::build_test_app(pool),
        "/cards/999999",
        Some(&token),
        &[("title", "ghost")],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn task_lifecycle_via_the_api(pool: SqlitePool) {
    let (admin, token) = common::seed_admin(&pool).await;
    let board = common::create_board(&pool, &token, 1001, "Pilot", &[]).await;
    let fkboardid = board["fkboardid"].as_str().unwrap();
    let listid = common::list_ids(&common::kanban(&pool, Some(&token), fkboardid).await)[0].0;
    let card = common::create_card(&pool, &token, listid, "Card").await;

    let response = common::post_json(
        common::build_test_app(pool.clone()),
        &format!("/cards/{card}/tasks"),
        Some(&token),
        serde_json::json!({ "name": "write tests", "assigneeId": admin.user_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = common::body_json(response).await;
    assert_eq!(task["status"], "todo");
    assert_eq!(task["assigneeId"], admin.user_id);
    let taskid = task["taskid"].as_i64().unwrap();

    let response = common::patch_json(
        common::build_test_app(pool.clone()),
        &format!("/tasks/{taskid}"),
        Some(&token),
        serde_json::json!({ "status": "done" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let task = common::body_json(response).await;
    assert_eq!(task["status"], "done");
    assert_eq!(task["name"], "write tests");

    let response = common::delete(
        common::build_test_app(pool.clone()),
        &format!("/tasks/{taskid}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::delete(
        common::build_test_app(pool),
        &format!("/tasks/{taskid}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tag_and_comment_creation_validate_their_parent(pool: SqlitePool) {
    let (_admin, token) = common::seed_admin(&pool).await;

    let response = common::post_json(
        common::build_test_app(pool.clone()),
        "/cards/999999/tags",
        Some(&token),
        serde_json::json!({ "title": "orphan" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::post_json(
        common::build_test_app(pool),
        "/cards/999999/comments",
        Some(&token),
        serde_json::json!({ "message": "orphan" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
