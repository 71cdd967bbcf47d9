//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP through the default `UreqTransport`.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use azurlane_core::{ApiError, AzurLaneClient, Category, ClientConfig};

/// Serve the mock API from a background thread and return its address.
fn start_server(token: Option<&str>) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();
    let token = token.map(str::to_string);

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, token).await
        })
        .unwrap();
    });

    addr
}

fn client_for(addr: SocketAddr) -> AzurLaneClient {
    AzurLaneClient::new(ClientConfig::default().with_base_url(&format!("http://{addr}/v2")))
}

#[test]
fn every_operation_returns_its_payload() {
    let client = client_for(start_server(None));

    let ship = client.lookup_ship_by_name("Enterprise").unwrap();
    assert_eq!(ship.id, "077");
    assert_eq!(ship.rarity, "Super Rare");
    assert_eq!(ship.stars.count, 3);
    assert_eq!(ship.skins.len(), 2);
    assert_eq!(ship.stats.level120[0].value, "7126");
    assert!(ship.stats.retrofit100.is_empty());
    assert_eq!(ship.miscellaneous.voice_actress.name, "Ishikawa Yui");

    let ship = client.lookup_ship_by_id("231").unwrap();
    assert_eq!(ship.name, "Prinz Eugen");
    assert_eq!(ship.nationality_short, "KMS");

    let ships = client.list_ships(Category::Rarity, "Super Rare").unwrap();
    let names: Vec<&str> = ships.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Enterprise", "Prinz Eugen"]);

    let build = client.get_build_info("00:24:00").unwrap();
    assert_eq!(build.time(), Some("00:24:00"));
    assert_eq!(build.get("ships").unwrap()[1], "Laffey");
}

#[test]
fn encoded_values_reach_the_server_intact() {
    let client = client_for(start_server(None));

    let ship = client.lookup_ship_by_name("Kaga (Battleship)").unwrap();
    assert_eq!(ship.id, "Plan-011");

    let ships = client.list_ships(Category::Affiliation, "Sakura Empire").unwrap();
    assert_eq!(ships.len(), 2);

    // `&` and `=` must stay inside the value instead of splitting the query.
    let err = client.lookup_ship_by_name("Enterprise&id=231").unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedStatus { status: 404, .. }));
}

#[test]
fn missing_fields_come_back_as_zero_values() {
    let client = client_for(start_server(None));

    let ship = client.lookup_ship_by_name("Ayanami").unwrap();
    assert!(ship.skins.is_empty());
    assert_eq!(ship.stars.count, 0);
    assert!(ship.thumbnail.is_empty());
}

#[test]
fn not_found_is_unexpected_status_with_body() {
    let client = client_for(start_server(None));

    let err = client.lookup_ship_by_name("Nobody").unwrap_err();
    match &err {
        ApiError::UnexpectedStatus { status, .. } => assert_eq!(*status, 404),
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
    let body: serde_json::Value = serde_json::from_str(&err.body_text().unwrap()).unwrap();
    assert_eq!(body["message"], "ship not found");

    let err = client.get_build_info("99:99:99").unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedStatus { status: 404, .. }));
}

#[test]
fn token_is_sent_when_configured() {
    let addr = start_server(Some("s3cret"));

    let anonymous = client_for(addr);
    let err = anonymous.lookup_ship_by_id("077").unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedStatus { status: 401, .. }));

    let authed = AzurLaneClient::new(
        ClientConfig::default()
            .with_base_url(&format!("http://{addr}/v2"))
            .with_token("s3cret"),
    );
    assert_eq!(authed.lookup_ship_by_id("077").unwrap().name, "Enterprise");
}

#[test]
fn concurrent_calls_do_not_cross_contaminate() {
    let client = client_for(start_server(None));
    let names = ["Enterprise", "Prinz Eugen", "Javelin", "Ayanami", "Kaga (Battleship)"];

    std::thread::scope(|scope| {
        let handles: Vec<_> = names
            .iter()
            .cycle()
            .take(20)
            .map(|name| {
                let client = &client;
                scope.spawn(move || (*name, client.lookup_ship_by_name(name).unwrap()))
            })
            .collect();
        for handle in handles {
            let (asked, ship) = handle.join().unwrap();
            assert_eq!(ship.name, asked);
        }
    });
}

#[test]
fn silent_server_times_out() {
    // Accepts connections but never answers.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });

    let client = AzurLaneClient::new(
        ClientConfig::default()
            .with_base_url(&format!("http://{addr}/v2"))
            .with_timeout(Duration::from_millis(300)),
    );

    let started = Instant::now();
    let err = client.lookup_ship_by_name("Enterprise").unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(matches!(err, ApiError::Transport(ref e) if e.is_timeout()), "{err:?}");
}

#[test]
fn refused_connection_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).list_ships(Category::Type, "Destroyer").unwrap_err();
    assert!(matches!(err, ApiError::Transport(ref e) if !e.is_timeout()), "{err:?}");
}
