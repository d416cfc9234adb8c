use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use courtside::api::AppState;
use courtside::config::Config;
use courtside::domain::{PlayerId, RosterId, UserId};
use courtside::models::NewPlayer;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    state: Arc<AppState>,
    db_path: std::path::PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

async fn spawn_app() -> TestApp {
    let db_path =
        std::env::temp_dir().join(format!("courtside_api_{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = courtside::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let router = courtside::api::router(state.clone())
        .await
        .expect("Failed to build router");

    TestApp {
        router,
        state,
        db_path,
    }
}

async fn seed_players(app: &TestApp) {
    let records: Vec<NewPlayer> = serde_json::from_value(serde_json::json!([
        {"nombre": "Bo Guard", "equipo": "Heat", "posicion": "Guard",
         "edad": 22, "altura": 1.85, "pais": "USA",
         "puntos_por_partido": 21.3, "rebotes_por_partido": 3.1, "asistencias_por_partido": 7.4},
        {"nombre": "Cy Forward", "equipo": "Bulls", "posicion": "Forward",
         "edad": 25, "altura": 2.01, "universidad": "Duke", "pais": "Canada",
         "partidos_jugados": 70, "puntos_por_partido": 15.0},
        {"nombre": "Di Forward", "equipo": "Jazz", "posicion": "Forward",
         "edad": 29, "altura": 2.03, "pais": "France"}
    ]))
    .unwrap();

    app.state.store().insert_players(records).await.unwrap();
}

fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn body_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn get(app: &TestApp, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &TestApp, uri: &str, form: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.router
        .clone()
        .oneshot(builder.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

async fn post_json(app: &TestApp, uri: &str, body: &serde_json::Value, cookie: &str) -> Response {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, cookie)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Register `username` and return the logged-in session cookie.
async fn register(app: &TestApp, username: &str) -> String {
    let response = post_form(
        app,
        "/register",
        &format!("username={username}&password=hunter22&password_confirm=hunter22"),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    session_cookie(&response).expect("registration should start a session")
}

async fn user_id(app: &TestApp, username: &str) -> UserId {
    app.state
        .store()
        .get_user_by_username(username)
        .await
        .unwrap()
        .expect("user exists")
        .id
}

#[tokio::test]
async fn test_api_requires_session() {
    let app = spawn_app().await;

    for uri in [
        "/api/jugadores",
        "/api/jugadores/1",
        "/api/jugadores_por_posicion/Guard",
        "/api/mis_equipos",
    ] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_pages_redirect_to_login_with_next() {
    let app = spawn_app().await;

    let response = get(&app, "/armar_equipo", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Farmar_equipo");

    let cookie = session_cookie(&response).expect("flash is stored in a session");
    let response = get(&app, "/login?next=%2Farmar_equipo", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Please log in to access this page."));
    assert!(html.contains("/login?next=%2Farmar_equipo"));
}

#[tokio::test]
async fn test_register_logs_user_in() {
    let app = spawn_app().await;
    let cookie = register(&app, "alice").await;

    let response = get(&app, "/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Welcome, alice"));
    assert!(html.contains("Registration successful"));

    let response = get(&app, "/login", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let app = spawn_app().await;
    register(&app, "alice").await;

    let response = post_form(
        &app,
        "/register",
        "username=alice&password=other123&password_confirm=other123",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let cookie = session_cookie(&response).unwrap();
    let html = body_text(get(&app, "/login", Some(&cookie)).await).await;
    assert!(html.contains("Username 'alice' is already taken"));

    assert_eq!(app.state.store().count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_registration_validation() {
    let app = spawn_app().await;

    let response = post_form(
        &app,
        "/register",
        "username=bob&password=one&password_confirm=two",
        None,
    )
    .await;
    assert_eq!(location(&response), "/login");
    let cookie = session_cookie(&response).unwrap();
    let html = body_text(get(&app, "/login", Some(&cookie)).await).await;
    assert!(html.contains("Passwords do not match"));

    let response = post_form(&app, "/register", "username=&password=x", None).await;
    let cookie = session_cookie(&response).unwrap();
    let html = body_text(get(&app, "/login", Some(&cookie)).await).await;
    assert!(html.contains("Please fill in all fields"));

    assert_eq!(app.state.store().count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = spawn_app().await;
    register(&app, "alice").await;

    let wrong_password =
        post_form(&app, "/login", "username=alice&password=nope", None).await;
    let unknown_user =
        post_form(&app, "/login", "username=mallory&password=nope", None).await;

    assert_eq!(wrong_password.status(), unknown_user.status());
    assert_eq!(location(&wrong_password), location(&unknown_user));

    let first = session_cookie(&wrong_password).unwrap();
    let second = session_cookie(&unknown_user).unwrap();
    let first = body_text(get(&app, "/login", Some(&first)).await).await;
    let second = body_text(get(&app, "/login", Some(&second)).await).await;

    assert!(first.contains("Incorrect username or password"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_login_follows_only_local_next() {
    let app = spawn_app().await;
    register(&app, "alice").await;

    let response = post_form(
        &app,
        "/login?next=%2Fmis_equipos",
        "username=alice&password=hunter22",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/mis_equipos");

    let response = post_form(
        &app,
        "/login?next=%2F%2Fevil.example",
        "username=alice&password=hunter22",
        None,
    )
    .await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = spawn_app().await;
    let cookie = register(&app, "alice").await;

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = get(&app, "/api/jugadores", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_player_catalog() {
    let app = spawn_app().await;
    seed_players(&app).await;
    let cookie = register(&app, "alice").await;

    let response = get(&app, "/api/jugadores", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let players = body_json(response).await;
    let players = players.as_array().unwrap();
    assert_eq!(players.len(), 3);
    assert_eq!(players[0]["id"], 1);
    assert_eq!(players[0]["nombre"], "Bo Guard");
    assert_eq!(players[0]["posicion"], "Guard");
    assert!(players[0].get("universidad").is_none());

    let response = get(&app, "/api/jugadores/2", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let player = body_json(response).await;
    assert_eq!(player["universidad"], "Duke");
    assert_eq!(player["partidos_jugados"], 70);
    assert_eq!(player["pais"], "Canada");

    let response = get(&app, "/api/jugadores/3", Some(&cookie)).await;
    let player = body_json(response).await;
    assert!(player["universidad"].is_null());
}

#[tokio::test]
async fn test_unknown_player_is_not_found() {
    let app = spawn_app().await;
    seed_players(&app).await;
    let cookie = register(&app, "alice").await;

    for uri in ["/api/jugadores/999", "/api/jugadores/abc", "/api/jugadores/0"] {
        let response = get(&app, uri, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn test_players_by_position() {
    let app = spawn_app().await;
    seed_players(&app).await;
    let cookie = register(&app, "alice").await;

    let response = get(&app, "/api/jugadores_por_posicion/Forward", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let players = body_json(response).await;
    let names: Vec<_> = players
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nombre"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Cy Forward", "Di Forward"]);
    assert!(players[0]["rebotes_por_partido"].is_number());

    let response = get(&app, "/api/jugadores_por_posicion/Center", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));

    let response = get(&app, "/api/jugadores_por_posicion/forward", Some(&cookie)).await;
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_create_roster_skips_unknown_players() {
    let app = spawn_app().await;
    seed_players(&app).await;
    let cookie = register(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/crear_equipo",
        &serde_json::json!({"nombre": "DreamTeam", "tipo": "fantasy", "jugadores": [1, 2, 999]}),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Team created successfully");

    let roster_id = RosterId::new(i32::try_from(body["equipo_id"].as_i64().unwrap()).unwrap());
    let mut members = app.state.store().roster_member_ids(roster_id).await.unwrap();
    members.sort_by_key(|id| id.value());
    assert_eq!(members, vec![PlayerId::new(1), PlayerId::new(2)]);
}

#[tokio::test]
async fn test_duplicate_roster_name_is_rejected() {
    let app = spawn_app().await;
    seed_players(&app).await;
    let cookie = register(&app, "alice").await;
    let draft = serde_json::json!({"nombre": "DreamTeam", "tipo": "fantasy", "jugadores": [1]});

    let first = post_json(&app, "/api/crear_equipo", &draft, &cookie).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(&app, "/api/crear_equipo", &draft, &cookie).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = body_json(second).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("DreamTeam"));

    let owner = user_id(&app, "alice").await;
    assert_eq!(
        app.state.store().count_rosters_for_owner(owner).await.unwrap(),
        1
    );

    // Another user may reuse the name.
    let other = register(&app, "bob").await;
    let response = post_json(&app, "/api/crear_equipo", &draft, &other).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_incomplete_roster_is_rejected() {
    let app = spawn_app().await;
    seed_players(&app).await;
    let cookie = register(&app, "alice").await;

    for draft in [
        serde_json::json!({"nombre": "Empty", "tipo": "fantasy", "jugadores": []}),
        serde_json::json!({"tipo": "fantasy", "jugadores": [1]}),
        serde_json::json!({"nombre": "  ", "tipo": "fantasy", "jugadores": [1]}),
        serde_json::json!({"nombre": "NoType", "jugadores": [1]}),
        serde_json::json!({"nombre": "BadIds", "tipo": "fantasy", "jugadores": "1,2"}),
    ] {
        let response = post_json(&app, "/api/crear_equipo", &draft, &cookie).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{draft}");
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Incomplete data");
    }

    let owner = user_id(&app, "alice").await;
    assert_eq!(
        app.state.store().count_rosters_for_owner(owner).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_my_rosters_lists_newest_first() {
    let app = spawn_app().await;
    seed_players(&app).await;
    let cookie = register(&app, "alice").await;

    for (name, ids) in [("First", vec![1]), ("Second", vec![2, 3])] {
        let response = post_json(
            &app,
            "/api/crear_equipo",
            &serde_json::json!({"nombre": name, "tipo": "fantasy", "jugadores": ids}),
            &cookie,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(&app, "/api/mis_equipos", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rosters = body_json(response).await;
    let rosters = rosters.as_array().unwrap();
    assert_eq!(rosters.len(), 2);
    assert_eq!(rosters[0]["nombre"], "Second");
    assert_eq!(rosters[0]["jugadores"].as_array().unwrap().len(), 2);
    assert_eq!(rosters[1]["nombre"], "First");

    let response = get(&app, "/mis_equipos", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Second"));
    assert!(html.contains("Cy Forward"));

    let other = register(&app, "bob").await;
    let response = get(&app, "/api/mis_equipos", Some(&other)).await;
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_route_renders_not_found_page() {
    let app = spawn_app().await;

    let response = get(&app, "/no/such/page", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("404"));
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let app = spawn_app().await;

    let response = get(&app, "/static/css/app.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/css"));
    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );

    let response = get(&app, "/static/js/missing.js", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expired_sessions_are_purged_on_startup() {
    use sea_orm::ConnectionTrait;

    let app = spawn_app().await;
    let conn = &app.state.store().conn;

    conn.execute_unprepared(
        "INSERT INTO tower_sessions (id, data, expiry_date) VALUES ('stale', x'80', 0)",
    )
    .await
    .unwrap();

    courtside::api::router(app.state.clone()).await.unwrap();

    let row = conn
        .query_one(sea_orm::Statement::from_string(
            conn.get_database_backend(),
            "SELECT COUNT(*) AS n FROM tower_sessions WHERE id = 'stale'",
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.try_get::<i64>("", "n").unwrap(), 0);
}

#[tokio::test]
async fn test_unplayed_positions_are_empty_not_errors() {
    let app = spawn_app().await;
    seed_players(&app).await;
    let cookie = register(&app, "alice").await;

    let long = "x".repeat(51);
    for uri in [
        "/api/jugadores_por_posicion/%20%20".to_string(),
        format!("/api/jugadores_por_posicion/{long}"),
    ] {
        let response = get(&app, &uri, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_json(response).await, serde_json::json!([]), "{uri}");
    }
}

#[tokio::test]
async fn test_roster_ignores_ids_out_of_range() {
    let app = spawn_app().await;
    seed_players(&app).await;
    let cookie = register(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/crear_equipo",
        &serde_json::json!({"nombre": "Big", "tipo": "fantasy", "jugadores": [1, 3_000_000_000_i64, 2.5, "x"]}),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    let roster_id = RosterId::new(i32::try_from(body["equipo_id"].as_i64().unwrap()).unwrap());
    let members = app.state.store().roster_member_ids(roster_id).await.unwrap();
    assert_eq!(members, vec![PlayerId::new(1)]);
}
