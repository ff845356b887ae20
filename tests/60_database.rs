mod common;

use anyhow::{Context, Result};
use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::{json, Value};

use cineteca_api::database::models::NewFavorite;
use cineteca_api::database::{favorites, DatabaseError};
use cineteca_api::routes;
use cineteca_api::state::AppState;

/// Registers a fresh account and returns `(user id, bearer header)`.
async fn register(app: &Router) -> Result<(i64, String)> {
    let username = common::unique("user");
    let req = common::request(
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": format!("{}@example.com", username),
            "username": username,
            "password": "secreto",
            "name": "Ana"
        })),
    );
    let (status, body) = common::send(app, req).await?;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let id = body["user"]["id"].as_i64().context("user id")?;
    let token = body["token"].as_str().context("token")?;
    Ok((id, common::bearer(token)))
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    auth: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    common::send(app, common::request(method, uri, Some(auth), body)).await
}

async fn live() -> Result<Option<(AppState, Router)>> {
    Ok(common::live_state()
        .await?
        .map(|state| (state.clone(), routes::app(state))))
}

#[tokio::test]
async fn register_login_me_round_trip() -> Result<()> {
    let Some((_, app)) = live().await? else { return Ok(()) };

    let username = common::unique("ana");
    let email = format!("{}@example.com", username);
    let account = json!({ "email": email, "username": username, "password": "secreto" });

    let (status, _) = common::send(
        &app,
        common::request(Method::POST, "/api/auth/register", None, Some(account.clone())),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = common::send(
        &app,
        common::request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": "secreto" })),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().context("token")?;

    let (status, body) = call(&app, Method::GET, "/api/auth/me", &common::bearer(token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], username.as_str());
    assert!(body["user"].get("password").is_none());

    let (status, body) = common::send(
        &app,
        common::request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": "otro-secreto" })),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Credenciales inválidas");
    Ok(())
}

#[tokio::test]
async fn duplicate_email_or_username_is_400() -> Result<()> {
    let Some((_, app)) = live().await? else { return Ok(()) };

    let username = common::unique("dup");
    let email = format!("{}@example.com", username);
    let first = json!({ "email": email, "username": username, "password": "secreto" });
    let (status, _) = common::send(
        &app,
        common::request(Method::POST, "/api/auth/register", None, Some(first)),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    for again in [
        json!({ "email": email, "username": common::unique("other"), "password": "secreto" }),
        json!({ "email": format!("{}@example.com", common::unique("other")), "username": username, "password": "secreto" }),
    ] {
        let (status, body) = common::send(
            &app,
            common::request(Method::POST, "/api/auth/register", None, Some(again)),
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email o username ya existe");
    }
    Ok(())
}

#[tokio::test]
async fn unknown_avatar_is_400() -> Result<()> {
    let Some((_, app)) = live().await? else { return Ok(()) };
    let (_, auth) = register(&app).await?;

    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/auth/me",
        &auth,
        Some(json!({ "profileImageId": i64::MAX })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Avatar inválido");

    let (status, body) = call(&app, Method::PUT, "/api/auth/me", &auth, Some(json!({ "name": " Leo " }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Leo");
    Ok(())
}

#[tokio::test]
async fn one_favorite_per_user_and_movie() -> Result<()> {
    let Some((state, app)) = live().await? else { return Ok(()) };
    let (user_id, auth) = register(&app).await?;
    let favorite = json!({ "movieId": 550, "title": "Fight Club", "releaseDate": "1999-10-15" });

    let (status, body) = call(&app, Method::POST, "/api/favorites", &auth, Some(favorite.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["movieId"], "550");
    assert_eq!(body["userId"], user_id);

    let (status, body) = call(&app, Method::POST, "/api/favorites", &auth, Some(favorite)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Ya está en favoritos");

    // Past the existence check, the constraint itself still refuses the row.
    let duplicate = NewFavorite {
        movie_id: "550".to_string(),
        title: "Fight Club".to_string(),
        poster_path: None,
        release_date: None,
    };
    let err = favorites::insert(&state.db, user_id, &duplicate).await.unwrap_err();
    assert!(matches!(err, DatabaseError::UniqueViolation(_)), "{:?}", err);

    let (status, body) = call(&app, Method::GET, "/api/favorites", &auth, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn deleting_a_missing_favorite_is_404() -> Result<()> {
    let Some((_, app)) = live().await? else { return Ok(()) };
    let (_, auth) = register(&app).await?;

    let (status, body) = call(&app, Method::DELETE, "/api/favorites/603", &auth, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Favorito no encontrado");

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/favorites",
        &auth,
        Some(json!({ "movieId": "603", "title": "The Matrix" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, Method::DELETE, "/api/favorites/603", &auth, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Favorito eliminado");
    Ok(())
}

#[tokio::test]
async fn second_review_replaces_the_first() -> Result<()> {
    let Some((_, app)) = live().await? else { return Ok(()) };
    let (user_id, auth) = register(&app).await?;
    let movie_id = common::unique("m");

    let (status, first) = call(
        &app,
        Method::POST,
        "/api/reviews",
        &auth,
        Some(json!({ "movieId": movie_id, "rating": 2, "comment": "Floja" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, second) = call(
        &app,
        Method::POST,
        "/api/reviews",
        &auth,
        Some(json!({ "movieId": movie_id, "rating": "5", "comment": "  La volví a ver  " })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["review"]["id"], first["review"]["id"]);
    assert_eq!(second["review"]["rating"], 5);
    assert_eq!(second["review"]["comment"], "La volví a ver");

    let uri = format!("/api/reviews?movieId={}&userId={}", movie_id, user_id);
    let (status, body) = common::send(&app, common::get(&uri)).await?;
    assert_eq!(status, StatusCode::OK);
    let reviews = body["reviews"].as_array().context("reviews")?;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["user"]["id"], user_id);
    Ok(())
}

#[tokio::test]
async fn movie_and_user_filters_combine() -> Result<()> {
    let Some((_, app)) = live().await? else { return Ok(()) };
    let (ana, ana_auth) = register(&app).await?;
    let (_, leo_auth) = register(&app).await?;
    let shared = common::unique("m");
    let other = common::unique("m");

    for (auth, movie) in [(&ana_auth, &shared), (&ana_auth, &other), (&leo_auth, &shared)] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/reviews",
            auth,
            Some(json!({ "movieId": movie, "rating": 4, "comment": "Bien" })),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let count = |body: &Value| body["reviews"].as_array().map(Vec::len);

    let (_, body) = common::send(&app, common::get(&format!("/api/reviews?movieId={}", shared))).await?;
    assert_eq!(count(&body), Some(2));

    let (_, body) = common::send(&app, common::get(&format!("/api/reviews?userId={}", ana))).await?;
    assert_eq!(count(&body), Some(2));

    let uri = format!("/api/reviews?movieId={}&userId={}", shared, ana);
    let (_, body) = common::send(&app, common::get(&uri)).await?;
    assert_eq!(count(&body), Some(1));
    assert_eq!(body["reviews"][0]["movieId"], shared.as_str());
    assert_eq!(body["reviews"][0]["userId"], ana);

    let (status, body) = call(&app, Method::GET, "/api/reviews/my-reviews", &ana_auth, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count(&body), Some(2));
    Ok(())
}
