//! In-memory stand-in for the Azur Lane API.
//!
//! Serves `/v2/ship`, `/v2/ships`, and `/v2/build` from a fixed fixture,
//! wrapping every answer in the API's envelope
//! (`statusCode`, `statusMessage`, `message`, payload).

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

#[derive(Clone)]
struct AppState {
    ships: Arc<Vec<Value>>,
    builds: Arc<Vec<Value>>,
    token: Option<Arc<str>>,
}

type Reply = (StatusCode, Json<Value>);

/// Router that accepts requests with or without a token.
pub fn app() -> Router {
    router(None)
}

/// Router that answers 401 unless `Authorization` equals `token`.
pub fn app_with_token(token: &str) -> Router {
    router(Some(Arc::from(token)))
}

fn router(token: Option<Arc<str>>) -> Router {
    let state = AppState {
        ships: Arc::new(fixture_ships()),
        builds: Arc::new(fixture_builds()),
        token,
    };
    let api = Router::new()
        .route("/ship", get(get_ship))
        .route("/ships", get(list_ships))
        .route("/build", get(get_build));
    Router::new().nest("/v2", api).with_state(state)
}

pub async fn run(listener: TcpListener, token: Option<String>) -> Result<(), std::io::Error> {
    let app = match token.as_deref() {
        Some(token) => app_with_token(token),
        None => app(),
    };
    axum::serve(listener, app).await
}

fn envelope(status: StatusCode, message: &str, payload: Option<(&str, Value)>) -> Reply {
    let mut body = Map::new();
    body.insert("statusCode".to_string(), json!(status.as_u16()));
    body.insert(
        "statusMessage".to_string(),
        json!(status.canonical_reason().unwrap_or_default()),
    );
    body.insert("message".to_string(), json!(message));
    if let Some((key, value)) = payload {
        body.insert(key.to_string(), value);
    }
    (status, Json(Value::Object(body)))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Reply> {
    let Some(expected) = state.token.as_deref() else {
        return Ok(());
    };
    let given = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if given == Some(expected) {
        Ok(())
    } else {
        Err(envelope(StatusCode::UNAUTHORIZED, "missing or invalid token", None))
    }
}

fn field<'a>(ship: &'a Value, key: &str) -> &'a str {
    ship.get(key).and_then(Value::as_str).unwrap_or_default()
}

async fn get_ship(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    let found = if let Some(name) = params.get("name") {
        state
            .ships
            .iter()
            .find(|s| field(s, "name").eq_ignore_ascii_case(name))
    } else if let Some(id) = params.get("id") {
        state.ships.iter().find(|s| field(s, "id") == id)
    } else {
        return envelope(StatusCode::BAD_REQUEST, "expected a name or id parameter", None);
    };
    match found {
        Some(ship) => envelope(StatusCode::OK, "", Some(("ship", ship.clone()))),
        None => envelope(StatusCode::NOT_FOUND, "ship not found", None),
    }
}

async fn list_ships(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    let Some(category) = params.get("category") else {
        return envelope(StatusCode::BAD_REQUEST, "expected a category parameter", None);
    };
    let key = match category.as_str() {
        "rarity" => "rarity",
        "type" => "hullType",
        "affiliation" => "nationality",
        _ => return envelope(StatusCode::BAD_REQUEST, "unknown category", None),
    };
    let Some(value) = params.get(category.as_str()) else {
        return envelope(StatusCode::BAD_REQUEST, "expected a filter value", None);
    };
    let ships: Vec<Value> = state
        .ships
        .iter()
        .filter(|s| field(s, key).eq_ignore_ascii_case(value))
        .map(|s| json!({ "id": field(s, "id"), "name": field(s, "name") }))
        .collect();
    envelope(StatusCode::OK, "", Some(("ships", Value::Array(ships))))
}

async fn get_build(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    if let Err(reply) = authorize(&state, &headers) {
        return reply;
    }
    let Some(time) = params.get("time") else {
        return envelope(StatusCode::BAD_REQUEST, "expected a time parameter", None);
    };
    match state.builds.iter().find(|b| field(b, "time") == time) {
        Some(build) => envelope(StatusCode::OK, "", Some(("construction", build.clone()))),
        None => envelope(StatusCode::NOT_FOUND, "no ships with that construction time", None),
    }
}

fn stat(name: &str, value: &str) -> Value {
    json!({ "name": name, "image": format!("https://azurlane.koumakan.jp/w/images/{name}.png"), "value": value })
}

fn credit(name: &str, link: &str) -> Value {
    json!({ "name": name, "link": link })
}

fn fixture_ships() -> Vec<Value> {
    vec![
        json!({
            "wikiUrl": "https://azurlane.koumakan.jp/Enterprise",
            "id": "077",
            "name": "Enterprise",
            "thumbnail": "https://azurlane.koumakan.jp/w/images/EnterpriseIcon.png",
            "skins": [
                { "title": "Default", "image": "https://azurlane.koumakan.jp/w/images/Enterprise.png", "chibi": "https://azurlane.koumakan.jp/w/images/EnterpriseChibi.png" },
                { "title": "Wedding", "image": "https://azurlane.koumakan.jp/w/images/EnterpriseWedding.png", "chibi": "" }
            ],
            "buildTime": "Cannot Be Constructed",
            "rarity": "Super Rare",
            "stars": { "value": "★★★☆☆☆", "count": 3 },
            "class": "Yorktown",
            "nationality": "Eagle Union",
            "nationalityShort": "USS",
            "hullType": "Aircraft Carrier",
            "stats": {
                "base": [stat("Health", "1124"), stat("Aviation", "77")],
                "level100": [stat("Health", "5968"), stat("Aviation", "403")],
                "level120": [stat("Health", "7126"), stat("Aviation", "481")],
                "retrofit100": [],
                "retrofit120": []
            },
            "miscellaneous": {
                "artist": credit("Saru", "https://www.pixiv.net/member.php?id=8094"),
                "web": credit("", ""),
                "pixiv": credit("Saru", "https://www.pixiv.net/member.php?id=8094"),
                "twitter": credit("", ""),
                "voiceActress": credit("Ishikawa Yui", "https://en.wikipedia.org/wiki/Yui_Ishikawa")
            }
        }),
        json!({
            "wikiUrl": "https://azurlane.koumakan.jp/Prinz_Eugen",
            "id": "231",
            "name": "Prinz Eugen",
            "thumbnail": "https://azurlane.koumakan.jp/w/images/Prinz_EugenIcon.png",
            "skins": [{ "title": "Default", "image": "https://azurlane.koumakan.jp/w/images/Prinz_Eugen.png", "chibi": "" }],
            "buildTime": "Limited",
            "rarity": "Super Rare",
            "stars": { "value": "★★★☆☆☆", "count": 3 },
            "class": "Admiral Hipper",
            "nationality": "Iron Blood",
            "nationalityShort": "KMS",
            "hullType": "Heavy Cruiser",
            "stats": { "base": [stat("Health", "1316")] }
        }),
        json!({
            "wikiUrl": "https://azurlane.koumakan.jp/Javelin",
            "id": "132",
            "name": "Javelin",
            "rarity": "Rare",
            "stars": { "value": "★★☆☆☆", "count": 2 },
            "class": "J",
            "nationality": "Royal Navy",
            "nationalityShort": "HMS",
            "hullType": "Destroyer",
            "buildTime": "00:24:00"
        }),
        json!({
            "wikiUrl": "https://azurlane.koumakan.jp/Ayanami",
            "id": "140",
            "name": "Ayanami",
            "rarity": "Elite",
            "class": "Ayanami",
            "nationality": "Sakura Empire",
            "nationalityShort": "IJN",
            "hullType": "Destroyer",
            "buildTime": "00:25:00"
        }),
        json!({
            "wikiUrl": "https://azurlane.koumakan.jp/Kaga_(Battleship)",
            "id": "Plan-011",
            "name": "Kaga (Battleship)",
            "rarity": "Rare",
            "class": "Kaga",
            "nationality": "Sakura Empire",
            "nationalityShort": "IJN",
            "hullType": "Battleship",
            "buildTime": "Cannot Be Constructed"
        }),
    ]
}

fn fixture_builds() -> Vec<Value> {
    vec![
        json!({
            "time": "00:24:00",
            "wikiUrl": "https://azurlane.koumakan.jp/Building",
            "ships": ["Javelin", "Laffey"]
        }),
        json!({
            "time": "00:25:00",
            "wikiUrl": "https://azurlane.koumakan.jp/Building",
            "ships": ["Ayanami"]
        }),
    ]
}
