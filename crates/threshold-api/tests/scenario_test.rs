//! End-to-end scenarios across the character, inventory and exits routes.

mod common;

use axum::Router;
use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

use common::{get_json, post_json, texts_for};

/// Rooms X and Y joined by a doorway whose leaves are D1 (in X) and D2 (in
/// Y). Ada starts in X, Brom waits in Y.
struct World {
    app: Router,
    ada: Uuid,
    brom: Uuid,
    doorway: Uuid,
    d1: Uuid,
    d2: Uuid,
    x: Uuid,
    y: Uuid,
}

async fn register(app: &Router, id: Uuid, name: &str, location: Option<Uuid>) {
    let (status, _) = post_json(
        app.clone(),
        "/api/v1/world/entities",
        &json!({ "id": id, "name": name, "location_id": location }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn catalogue(app: &Router, name: &str, location: Uuid, wear_slot: Option<&str>) -> Uuid {
    let json = post_ok(
        app,
        "/api/v1/world/items",
        &json!({ "name": name, "location_id": location, "wear_slot": wear_slot }),
    )
    .await;
    Uuid::parse_str(json["id"].as_str().unwrap()).unwrap()
}

async fn post_ok(app: &Router, uri: &str, body: &Value) -> Value {
    let (status, json) = post_json(app.clone(), uri, body).await;
    assert_eq!(status, StatusCode::OK, "{uri} failed: {json}");
    json
}

async fn world(app: Router) -> World {
    let world = World {
        app,
        ada: Uuid::new_v4(),
        brom: Uuid::new_v4(),
        doorway: Uuid::new_v4(),
        d1: Uuid::new_v4(),
        d2: Uuid::new_v4(),
        x: Uuid::new_v4(),
        y: Uuid::new_v4(),
    };
    register(&world.app, world.ada, "Ada", Some(world.x)).await;
    register(&world.app, world.brom, "Brom", Some(world.y)).await;
    register(&world.app, world.d1, "the oak door", None).await;
    register(&world.app, world.d2, "the oak door", None).await;

    post_ok(
        &world.app,
        "/api/v1/characters/create",
        &json!({ "character_id": world.ada, "name": "Ada" }),
    )
    .await;
    post_ok(
        &world.app,
        "/api/v1/exits/build",
        &json!({
            "doorway_id": world.doorway,
            "front": { "exit_id": world.d1, "location_id": world.x },
            "back": { "exit_id": world.d2, "location_id": world.y },
        }),
    )
    .await;
    world
}

fn door_use(world: &World, exit_id: Uuid) -> Value {
    json!({ "doorway_id": world.doorway, "exit_id": exit_id, "actor_id": world.ada })
}

fn posture(world: &World, posture: &str) -> Value {
    json!({ "character_id": world.ada, "posture": posture })
}

async fn walk_through_the_door(world: &World) {
    // Sitting blocks movement before the door is even considered.
    post_ok(&world.app, "/api/v1/characters/change-posture", &posture(world, "sitting")).await;
    let (status, json) = post_json(
        world.app.clone(),
        "/api/v1/exits/traverse",
        &door_use(world, world.d1),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], "You must be standing to move.");

    let stood = post_ok(
        &world.app,
        "/api/v1/characters/change-posture",
        &posture(world, "standing"),
    )
    .await;
    assert_eq!(texts_for(&stood, world.ada), vec!["You stand up."]);

    // Standing, but the door is closed.
    let (status, json) = post_json(
        world.app.clone(),
        "/api/v1/exits/traverse",
        &door_use(world, world.d1),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], "The oak door is closed.");

    let opened = post_ok(&world.app, "/api/v1/exits/open", &door_use(world, world.d1)).await;
    assert_eq!(texts_for(&opened, world.ada), vec!["You open the oak door."]);
    assert_eq!(texts_for(&opened, world.brom), vec!["The oak door opens."]);

    let moved = post_ok(&world.app, "/api/v1/exits/traverse", &door_use(world, world.d1)).await;
    assert_eq!(moved["destination"], world.y.to_string());

    // Ada now stands beside Brom, on the D2 side.
    let closed = post_ok(&world.app, "/api/v1/exits/close", &door_use(world, world.d2)).await;
    assert_eq!(texts_for(&closed, world.ada), vec!["You close the oak door."]);
    assert_eq!(texts_for(&closed, world.brom), vec!["Ada closes the oak door."]);

    let (_, view) = get_json(world.app.clone(), &format!("/api/v1/exits/{}", world.doorway)).await;
    assert_eq!(view["state"], "closed");
    assert_eq!(view["version"], 3);
}

#[tokio::test]
async fn test_actor_stands_opens_walks_through_and_closes_door() {
    let world = world(common::build_test_app(common::memory_state())).await;

    walk_through_the_door(&world).await;
}

#[tokio::test]
async fn test_locked_door_refuses_open_until_unlocked() {
    // Arrange
    let world = world(common::build_test_app(common::memory_state())).await;
    let doorway = json!({ "doorway_id": world.doorway });
    post_ok(&world.app, "/api/v1/exits/lock", &doorway).await;

    // Act
    let (refused, json) = post_json(
        world.app.clone(),
        "/api/v1/exits/open",
        &door_use(&world, world.d1),
    )
    .await;
    post_ok(&world.app, "/api/v1/exits/unlock", &doorway).await;
    let (opened, _) = post_json(
        world.app.clone(),
        "/api/v1/exits/open",
        &door_use(&world, world.d1),
    )
    .await;

    // Assert
    assert_eq!(refused, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "precondition_unmet");
    assert_eq!(opened, StatusCode::OK);
}

#[tokio::test]
async fn test_custom_traverse_error_is_shown_when_access_is_denied() {
    let app = common::build_test_app(common::memory_state());
    let (ada, gate_in, gate_out, x, y) = (
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
    );
    register(&app, ada, "Ada", Some(x)).await;
    post_ok(
        &app,
        "/api/v1/characters/create",
        &json!({ "character_id": ada, "name": "Ada" }),
    )
    .await;
    let built = post_ok(
        &app,
        "/api/v1/exits/build",
        &json!({
            "front": {
                "exit_id": gate_in,
                "location_id": x,
                "traverse_error": "The guard shakes his head."
            },
            "back": { "exit_id": gate_out, "location_id": y },
        }),
    )
    .await;
    let doorway = built["aggregate_id"].clone();
    let use_gate = json!({ "doorway_id": doorway, "exit_id": gate_in, "actor_id": ada });
    post_ok(&app, "/api/v1/exits/open", &use_gate).await;
    post_ok(
        &app,
        "/api/v1/world/access",
        &json!({
            "actor_id": ada,
            "entity_id": gate_in,
            "capability": "traverse",
            "allowed": false
        }),
    )
    .await;

    let (status, json) = post_json(app.clone(), "/api/v1/exits/traverse", &use_gate).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "permission_denied");
    assert_eq!(json["message"], "The guard shakes his head.");
}

#[tokio::test]
async fn test_character_and_inventory_of_one_actor_keep_separate_streams() {
    // Arrange
    let world = world(common::build_test_app(common::memory_state())).await;
    let cloak = catalogue(&world.app, "a grey cloak", world.x, Some("neck")).await;

    // Act
    let created = post_ok(
        &world.app,
        "/api/v1/inventory/create",
        &json!({ "actor_id": world.ada }),
    )
    .await;
    post_ok(&world.app, "/api/v1/characters/change-posture", &posture(&world, "sitting")).await;
    post_ok(
        &world.app,
        "/api/v1/inventory/pick-up",
        &json!({ "actor_id": world.ada, "item_id": cloak }),
    )
    .await;
    let worn = post_ok(
        &world.app,
        "/api/v1/inventory/wear",
        &json!({ "actor_id": world.ada, "item_id": cloak }),
    )
    .await;

    // Assert
    assert_ne!(created["aggregate_id"], world.ada.to_string());
    assert_eq!(texts_for(&worn, world.ada), vec!["You wear a grey cloak."]);
    let (_, character) =
        get_json(world.app.clone(), &format!("/api/v1/characters/{}", world.ada)).await;
    assert_eq!(character["posture"], "sitting");
    assert_eq!(character["version"], 2);
    let (_, inventory) =
        get_json(world.app.clone(), &format!("/api/v1/inventory/{}", world.ada)).await;
    assert_eq!(inventory["version"], 3);
}

#[tokio::test]
async fn test_worn_boots_cannot_come_off_with_full_hands() {
    // Arrange
    let world = world(common::build_test_app(common::memory_state())).await;
    register(&world.app, world.ada, "Ada", Some(world.y)).await;
    let boots = catalogue(&world.app, "muddy boots", world.y, Some("left_foot")).await;
    let torch = catalogue(&world.app, "a torch", world.y, None).await;
    let map = catalogue(&world.app, "a map", world.y, None).await;
    post_ok(&world.app, "/api/v1/inventory/create", &json!({ "actor_id": world.ada })).await;

    // Act
    let picked = post_ok(
        &world.app,
        "/api/v1/inventory/pick-up",
        &json!({ "actor_id": world.ada, "item_id": boots }),
    )
    .await;
    post_ok(
        &world.app,
        "/api/v1/inventory/wear",
        &json!({ "actor_id": world.ada, "item_id": boots }),
    )
    .await;
    for item_id in [torch, map] {
        post_ok(
            &world.app,
            "/api/v1/inventory/pick-up",
            &json!({ "actor_id": world.ada, "item_id": item_id }),
        )
        .await;
    }
    let (status, json) = post_json(
        world.app.clone(),
        "/api/v1/inventory/remove",
        &json!({ "actor_id": world.ada, "item_id": boots }),
    )
    .await;

    // Assert
    assert_eq!(texts_for(&picked, world.brom), vec!["Ada picks up muddy boots."]);
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "resource_exhausted");
    assert_eq!(json["message"], "You don't have a free hand to hold it in.");
    let (_, equipment) = get_json(
        world.app.clone(),
        &format!("/api/v1/inventory/{}/equipment", world.ada),
    )
    .await;
    assert!(
        equipment["text"]
            .as_str()
            .unwrap()
            .contains(": muddy boots")
    );
}

#[tokio::test]
async fn test_door_cannot_be_worked_from_another_room() {
    // Arrange
    let world = world(common::build_test_app(common::memory_state())).await;

    // Act
    let (status, json) = post_json(
        world.app.clone(),
        "/api/v1/exits/open",
        &door_use(&world, world.d2),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "precondition_unmet");
    assert_eq!(json["message"], "You don't see that here.");
    let (_, view) = get_json(world.app.clone(), &format!("/api/v1/exits/{}", world.doorway)).await;
    assert_eq!(view["state"], "closed");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_door_scenario_against_postgres(pool: PgPool) {
    let world = world(common::build_test_app(common::pg_state(pool))).await;

    walk_through_the_door(&world).await;
}
