use keystone_archive::{AppError, Config, archive_characters, config::ConfigFormat};
use serde_json::{Value, json};
use std::path::Path;
use tempfile::tempdir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const PROFILE_PATH: &str = "/profile/wow/character/kazzak/thrall/mythic-keystone-profile";

const BASE_CONFIG: &str = "\
region: eu
client_id: client-id
client_secret: client-secret
characters:
";

fn config_for(server: &MockServer, data_dir: &Path, characters: &[(&str, &str)]) -> Config {
    let mut yaml = String::from(BASE_CONFIG);
    for (realm, name) in characters {
        yaml.push_str(&format!("  - realm: {realm}\n    name: {name}\n"));
    }
    let mut config = Config::parse(&yaml, ConfigFormat::Yaml).unwrap();
    config.api_base_url = Some(server.uri());
    config.oauth_url = Some(format!("{}/oauth/token", server.uri()));
    config.data_dir = data_dir.to_string_lossy().to_string();
    config
}

fn member(id: u64, name: &str, realm_id: u64, slug: &str) -> Value {
    json!({"id": id, "name": name, "realm": {"id": realm_id, "slug": slug}})
}

fn profile_body(period: u64, best_runs: Value, seasons: Value) -> Value {
    json!({
        "character": {"id": 7, "name": "Thrall", "realm": {"id": 1305, "slug": "kazzak"}},
        "current_period": {"period": {"id": period}, "best_runs": best_runs},
        "current_mythic_rating": {"rating": 2500.5, "color": {"r": 255}},
        "seasons": seasons
    })
}

fn json_body(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn read_yaml(path: impl AsRef<Path>) -> Value {
    let content = std::fs::read_to_string(path.as_ref())
        .unwrap_or_else(|e| panic!("{}: {e}", path.as_ref().display()));
    serde_yaml::from_str(&content).unwrap()
}

async fn mount_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token",
            "token_type": "bearer",
            "expires_in": 86399
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Equipment without items and a connected realm without leaderboards.
/// Mounted after test-specific mocks so those win.
async fn mount_quiet_world(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/profile/wow/character/kazzak/thrall/equipment"))
        .respond_with(json_body(json!({"character": {}})))
        .mount(server)
        .await;
    let uri = server.uri();
    let href = format!("{uri}/data/wow/connected-realm/1305?namespace=dynamic-eu");
    Mock::given(method("GET"))
        .and(path("/data/wow/realm/kazzak"))
        .respond_with(json_body(json!({"connected_realm": {"href": href}})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/wow/connected-realm/1305"))
        .respond_with(json_body(json!({"id": 1305})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/data/wow/connected-realm/1305/mythic-leaderboard/index",
        ))
        .respond_with(json_body(json!({"current_leaderboards": []})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_current_period_run_is_stored_without_ranking() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    let run = json!({
        "completed_timestamp": 1700000000u64,
        "duration": 1712345,
        "keystone_level": 15,
        "ranking": 42,
        "dungeon": {"id": 402, "name": "Algeth'ar Academy"},
        "members": [
            {"character": member(9, "Jaina", 1403, "draenor")},
            {"character": member(7, "Thrall", 1305, "kazzak")}
        ]
    });
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .and(query_param("namespace", "profile-eu"))
        .and(query_param("locale", "en_GB"))
        .respond_with(json_body(profile_body(930, json!([run]), json!([]))))
        .mount(&server)
        .await;
    mount_quiet_world(&server).await;

    let dir = tempdir().unwrap();
    let config = config_for(&server, dir.path(), &[("kazzak", "thrall")]);
    let summary = archive_characters(&config).await.unwrap();

    let stored = read_yaml(dir.path().join("kazzak/thrall/runs/1700000000.yml"));
    assert!(stored.get("ranking").is_none());
    assert_eq!(stored["keystone_level"], json!(15));
    assert_eq!(stored["members"][0]["character"]["name"], json!("Thrall"));
    assert_eq!(stored["members"][1]["character"]["name"], json!("Jaina"));

    let character = read_yaml(dir.path().join("kazzak/thrall/character.yml"));
    assert_eq!(character["name"], json!("Thrall"));
    let rating = read_yaml(dir.path().join("kazzak/thrall/current_mythic_rating.yml"));
    assert_eq!(rating["rating"], json!(2500.5));

    assert_eq!(summary.characters_archived, 1);
    assert_eq!(summary.runs_written, 1);
}

#[tokio::test]
async fn test_unrated_season_is_not_stored_but_its_runs_are() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    let seasons = json!([
        {"id": 10, "key": {"href": format!("{}/season/10?namespace=profile-eu", server.uri())}},
        {"id": 11, "key": {"href": format!("{}/season/11?namespace=profile-eu", server.uri())}}
    ]);
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(json_body(profile_body(930, json!(null), seasons)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/season/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "season": {"id": 10},
            "mythic_rating": {"rating": 0},
            "best_runs": [
                {"completed_timestamp": 1600000002000u64, "ranking": 5, "members": []},
                {"completed_timestamp": 1600000001000u64, "members": []}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/season/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "season": {"id": 11},
            "mythic_rating": {"rating": 1875.25},
            "best_runs": [
                {"completed_timestamp": 1700000002000u64, "ranking": 1, "members": []},
                {"completed_timestamp": 1700000001000u64, "ranking": 2, "members": []}
            ]
        })))
        .mount(&server)
        .await;
    mount_quiet_world(&server).await;

    let dir = tempdir().unwrap();
    let config = config_for(&server, dir.path(), &[("kazzak", "thrall")]);
    let summary = archive_characters(&config).await.unwrap();

    let character_dir = dir.path().join("kazzak/thrall");
    assert!(!character_dir.join("seasons/10.yml").exists());
    assert!(character_dir.join("runs/1600000001000.yml").exists());
    assert!(character_dir.join("runs/1600000002000.yml").exists());

    let season = read_yaml(character_dir.join("seasons/11.yml"));
    assert_eq!(season["mythic_rating"]["rating"], json!(1875.25));
    let best_runs = season["best_runs"].as_array().unwrap();
    let timestamps: Vec<u64> = best_runs
        .iter()
        .map(|run| run["completed_timestamp"].as_u64().unwrap())
        .collect();
    assert_eq!(timestamps, vec![1700000001000, 1700000002000]);

    let run = read_yaml(character_dir.join("runs/1700000002000.yml"));
    assert!(run.get("ranking").is_none());

    assert_eq!(summary.seasons_written, 1);
    assert_eq!(summary.runs_written, 4);
}

#[tokio::test]
async fn test_season_failure_is_skipped() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    let seasons = json!([
        {"id": 10, "key": {"href": format!("{}/season/10", server.uri())}},
        {"id": 11, "key": {"href": format!("{}/season/11", server.uri())}}
    ]);
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(json_body(profile_body(930, json!([]), seasons)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/season/10"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/season/11"))
        .respond_with(json_body(json!({"mythic_rating": {"rating": 100.0}})))
        .mount(&server)
        .await;
    mount_quiet_world(&server).await;

    let dir = tempdir().unwrap();
    let config = config_for(&server, dir.path(), &[("kazzak", "thrall")]);
    let summary = archive_characters(&config).await.unwrap();

    assert!(dir.path().join("kazzak/thrall/seasons/11.yml").exists());
    assert_eq!(summary.seasons_written, 1);
    assert_eq!(summary.characters_archived, 1);
}

#[tokio::test]
async fn test_expired_token_triggers_one_reauthentication() {
    let server = MockServer::start().await;
    mount_token(&server, 2).await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(json_body(profile_body(930, json!([]), json!([]))))
        .expect(1)
        .mount(&server)
        .await;
    mount_quiet_world(&server).await;

    let dir = tempdir().unwrap();
    let config = config_for(&server, dir.path(), &[("kazzak", "thrall")]);
    let summary = archive_characters(&config).await.unwrap();

    assert_eq!(summary.characters_archived, 1);
    assert!(dir.path().join("kazzak/thrall/character.yml").exists());
}

#[tokio::test]
async fn test_character_is_skipped_after_ten_failed_attempts() {
    let server = MockServer::start().await;
    // One initial token plus a re-authentication before each of attempts 2..=10.
    mount_token(&server, 10).await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(10)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/profile/wow/character/draenor/jaina/mythic-keystone-profile",
        ))
        .respond_with(json_body(profile_body(930, json!([]), json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let config = config_for(
        &server,
        dir.path(),
        &[("kazzak", "thrall"), ("draenor", "jaina")],
    );
    let summary = archive_characters(&config).await.unwrap();

    assert_eq!(summary.characters_skipped, 1);
    assert_eq!(summary.characters_archived, 1);
    assert!(!dir.path().join("kazzak/thrall").exists());
    assert!(dir.path().join("draenor/jaina/character.yml").exists());
}

#[tokio::test]
async fn test_rejected_credentials_abort_the_run() {
    let server = MockServer::start().await;
    let rejected = ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_client"}));
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(rejected)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let config = config_for(&server, dir.path(), &[("kazzak", "thrall")]);
    let result = archive_characters(&config).await;

    assert!(matches!(result, Err(AppError::AuthFailure { .. })));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_leaderboard_is_fetched_once_and_filtered_per_character() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    for name in ["thrall", "garrosh"] {
        Mock::given(method("GET"))
            .and(path(format!(
                "/profile/wow/character/kazzak/{name}/mythic-keystone-profile"
            )))
            .respond_with(json_body(profile_body(930, json!([]), json!([]))))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(
            "/data/wow/connected-realm/1305/mythic-leaderboard/index",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_leaderboards": [
                {"key": {"href": "unused"}, "name": "Algeth'ar Academy", "id": 402},
                {"key": {"href": "unused"}, "name": "Brackenhide Hollow", "id": 405}
            ]
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/data/wow/connected-realm/1305/mythic-leaderboard/402/period/930",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "map": {"id": 2526},
            "period": 930,
            "leading_groups": [
                {
                    "ranking": 1,
                    "completed_timestamp": 1700000500000u64,
                    "keystone_level": 24,
                    "members": [
                        {
                            "profile": member(7, "Thrall", 1305, "kazzak"),
                            "faction": {"type": "HORDE"}
                        },
                        {
                            "profile": member(3, "Anduin", 1300, "silvermoon"),
                            "faction": {"type": "ALLIANCE"}
                        }
                    ]
                },
                {
                    "ranking": 2,
                    "completed_timestamp": 1700000600000u64,
                    "keystone_level": 23,
                    "members": [{"profile": member(9, "Jaina", 1403, "draenor")}]
                }
            ],
            "keystone_affixes": [
                {"keystone_affix": {"id": 9, "name": "Tyrannical"}, "starting_level": 2}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/data/wow/connected-realm/1305/mythic-leaderboard/405/period/930",
        ))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;
    mount_quiet_world(&server).await;

    let dir = tempdir().unwrap();
    let config = config_for(
        &server,
        dir.path(),
        &[("kazzak", "thrall"), ("kazzak", "garrosh")],
    );
    let summary = archive_characters(&config).await.unwrap();

    let period_dir = dir.path().join("leaderboard/1305/930");
    let page = read_yaml(period_dir.join("402/data.yml"));
    assert_eq!(page["leading_groups"][0]["ranking"], json!(1));
    assert!(!period_dir.join("405/data.yml").exists());

    let runs_dir = dir.path().join("kazzak/thrall/runs");
    let run = read_yaml(runs_dir.join("1700000500000.yml"));
    let affixes = json!([{"id": 9, "name": "Tyrannical"}]);
    assert!(run.get("ranking").is_none());
    assert_eq!(run["dungeon"]["id"], json!(402));
    assert_eq!(run["dungeon"]["name"], json!("Algeth'ar Academy"));
    assert_eq!(run["keystone_affixes"], affixes);
    assert_eq!(run["members"][0]["character"]["name"], json!("Anduin"));
    assert_eq!(run["members"][1]["character"]["name"], json!("Thrall"));
    assert!(run["members"][0].get("profile").is_none());
    assert!(!runs_dir.join("1700000600000.yml").exists());

    assert_eq!(summary.leaderboard_pages_written, 1);
    assert_eq!(summary.characters_archived, 2);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("kazzak/connected_realm_id")).unwrap(),
        "1305"
    );
}

#[tokio::test]
async fn test_item_icons_are_downloaded_once() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(json_body(profile_body(930, json!([]), json!([]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/profile/wow/character/kazzak/thrall/equipment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "equipped_items": [
                {"item": {"id": 100}, "slot": {"type": "HEAD"}, "durability": {"value": 80}},
                {"item": {"id": 200}, "slot": {"type": "NECK"}}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/wow/media/item/200"))
        .and(query_param("namespace", "static-eu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assets": [{"key": "icon", "value": format!("{}/render/200.jpg", server.uri())}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/wow/media/item/100"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/render/200.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]))
        .expect(1)
        .mount(&server)
        .await;
    mount_quiet_world(&server).await;

    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("item")).unwrap();
    std::fs::write(dir.path().join("item/100.jpg"), [1u8, 2, 3]).unwrap();

    let config = config_for(&server, dir.path(), &[("kazzak", "thrall")]);
    let summary = archive_characters(&config).await.unwrap();

    let downloaded = std::fs::read(dir.path().join("item/200.jpg")).unwrap();
    assert_eq!(downloaded, vec![0xFF, 0xD8, 0xFF, 0xE0]);
    let cached = std::fs::read(dir.path().join("item/100.jpg")).unwrap();
    assert_eq!(cached, vec![1, 2, 3]);
    assert_eq!(summary.item_icons_downloaded, 1);

    let items = read_yaml(dir.path().join("kazzak/thrall/equipped_items.yml"));
    assert!(items[0].get("durability").is_none());
    assert_eq!(items[0]["slot"]["type"], json!("HEAD"));
}

#[tokio::test]
async fn test_cached_connected_realm_id_skips_realm_lookup() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(json_body(profile_body(930, json!([]), json!([]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/wow/realm/kazzak"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/data/wow/connected-realm/1999/mythic-leaderboard/index",
        ))
        .respond_with(json_body(json!({"current_leaderboards": []})))
        .expect(1)
        .mount(&server)
        .await;
    mount_quiet_world(&server).await;

    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("kazzak")).unwrap();
    std::fs::write(dir.path().join("kazzak/connected_realm_id"), "1999").unwrap();

    let config = config_for(&server, dir.path(), &[("kazzak", "thrall")]);
    archive_characters(&config).await.unwrap();
}
