//! Wiremock integration tests for the HTTP transport.
//!
//! Each test points a `TmdbClient` at a mock server and checks the path and
//! query parameters of the request plus the decoding of the response. The
//! client is blocking, so it is created, used and dropped on the blocking
//! thread pool.

use serde_json::json;
use tmdb_persist::{
    Config, MovieCreditsRequest, MovieDetailRequest, SearchMovieRequest, SearchTvRequest,
    TmdbApi, TmdbClient, TmdbError, TvCreditsRequest, TvDetailRequest, TvEpisodeRequest,
    TvSeasonRequest,
};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Runs `call` against a client for `config` off the async runtime.
async fn with_client<T, F>(config: Config, call: F) -> T
where
    T: Send + 'static,
    F: FnOnce(&TmdbClient) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(&TmdbClient::new(config)))
        .await
        .expect("blocking client task panicked")
}

fn config_for(server: &MockServer) -> Config {
    Config::default().with_api_url(format!("{}/3", server.uri()))
}

fn error_envelope(code: i64, message: &str) -> serde_json::Value {
    json!({ "success": false, "status_code": code, "status_message": message })
}

#[tokio::test]
async fn search_movie_sends_credentials_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("api_key", "secret"))
        .and(query_param("query", "The Matrix"))
        .and(query_param("page", "1"))
        .and(query_param("include_adult", "false"))
        .and(query_param_is_missing("year"))
        .and(query_param_is_missing("language"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "total_pages": 1,
            "total_results": 1,
            "results": [{
                "id": 603,
                "title": "The Matrix",
                "release_date": "1999-03-30",
                "poster_path": null
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server)
        .with_api_key("secret")
        .with_access_token("token");
    let result = with_client(config, |client| {
        client.search_movie("The Matrix", &SearchMovieRequest::default())
    })
    .await
    .expect("search should succeed");

    assert_eq!(result.results.len(), 1);
    assert_eq!(result.results[0].id, 603);
    assert_eq!(result.results[0].title, "The Matrix");
    assert_eq!(result.results[0].poster_path, None);
}

#[tokio::test]
async fn requests_without_credentials_carry_no_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/movie/603"))
        .and(query_param_is_missing("api_key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 603, "title": "The Matrix" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let movie = with_client(config_for(&server), |client| {
        client.movie_detail(603, &MovieDetailRequest::default())
    })
    .await
    .expect("lookup should succeed");

    assert_eq!(movie.title, "The Matrix");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn movie_detail_sends_language_and_appended_resources() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/movie/603"))
        .and(query_param("language", "de-DE"))
        .and(query_param("append_to_response", "videos,images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 603,
            "title": "Matrix",
            "runtime": 136,
            "tagline": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = MovieDetailRequest {
        language: Some("de-DE".to_string()),
        append_to_response: Some("videos,images".to_string()),
    };
    let movie = with_client(config_for(&server), move |client| {
        client.movie_detail(603, &opts)
    })
    .await
    .expect("lookup should succeed");

    assert_eq!(movie.title, "Matrix");
    assert_eq!(movie.runtime, Some(136));
    assert_eq!(movie.tagline, None);
}

#[tokio::test]
async fn movie_credits_hits_credits_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/movie/603/credits"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 603,
            "cast": [{
                "id": 6384,
                "cast_id": 34,
                "name": "Keanu Reeves",
                "character": "Neo",
                "order": 0,
                "profile_path": "/4D0PpNI0kmP58hgrwGC3wCjxhnm.jpg"
            }],
            "crew": [{
                "id": 9339,
                "name": "Lilly Wachowski",
                "department": "Directing",
                "job": "Director"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = MovieCreditsRequest {
        language: Some("en-US".to_string()),
    };
    let credits = with_client(config_for(&server), move |client| {
        client.movie_credits(603, &opts)
    })
    .await
    .expect("credits should succeed");

    assert_eq!(credits.id, 603);
    assert_eq!(credits.cast[0].name, "Keanu Reeves");
    assert_eq!(credits.cast[0].character, "Neo");
    assert_eq!(credits.cast[0].cast_id, Some(34));
    assert_eq!(credits.crew[0].job, "Director");
}

#[tokio::test]
async fn search_tv_sends_all_set_options() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/tv"))
        .and(query_param("query", "Game of Thrones"))
        .and(query_param("page", "2"))
        .and(query_param("first_air_date_year", "2011"))
        .and(query_param("language", "en-US"))
        .and(query_param("include_adult", "true"))
        .and(query_param_is_missing("year"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 2,
            "total_pages": 2,
            "total_results": 21,
            "results": [{ "id": 1399, "name": "Game of Thrones", "first_air_date": "2011-04-17" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = SearchTvRequest {
        page: Some(2),
        first_air_date_year: Some(2011),
        language: Some("en-US".to_string()),
        include_adult: true,
        ..Default::default()
    };
    let result = with_client(config_for(&server), move |client| {
        client.search_tv("Game of Thrones", &opts)
    })
    .await
    .expect("search should succeed");

    assert_eq!(result.page, 2);
    assert_eq!(result.results[0].id, 1399);
    assert_eq!(result.results[0].name, "Game of Thrones");
}

#[tokio::test]
async fn tv_detail_hits_show_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/tv/1399"))
        .and(query_param_is_missing("language"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1399,
            "name": "Game of Thrones",
            "number_of_seasons": 8,
            "number_of_episodes": 73,
            "type": "Scripted",
            "status": "Ended"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let show = with_client(config_for(&server), |client| {
        client.tv_detail(1399, &TvDetailRequest::default())
    })
    .await
    .expect("lookup should succeed");

    assert_eq!(show.name, "Game of Thrones");
    assert_eq!(show.number_of_seasons, 8);
    assert_eq!(show.kind, "Scripted");
}

#[tokio::test]
async fn tv_credits_hits_credits_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/tv/1399/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1399,
            "cast": [{ "id": 22970, "name": "Peter Dinklage", "character": "Tyrion Lannister" }],
            "crew": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credits = with_client(config_for(&server), |client| {
        client.tv_credits(1399, &TvCreditsRequest::default())
    })
    .await
    .expect("credits should succeed");

    assert_eq!(credits.cast[0].name, "Peter Dinklage");
    assert_eq!(credits.cast[0].cast_id, None);
    assert!(credits.crew.is_empty());
}

#[tokio::test]
async fn tv_season_hits_season_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/tv/1399/season/1"))
        .and(query_param("language", "de-DE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3624,
            "name": "Staffel 1",
            "season_number": 1,
            "episodes": [
                { "id": 63056, "name": "Der Winter naht", "episode_number": 1, "season_number": 1 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = TvSeasonRequest {
        language: Some("de-DE".to_string()),
    };
    let season = with_client(config_for(&server), move |client| {
        client.tv_season(1399, 1, &opts)
    })
    .await
    .expect("season should succeed");

    assert_eq!(season.name, "Staffel 1");
    assert_eq!(season.episodes[0].name, "Der Winter naht");
}

#[tokio::test]
async fn tv_episode_hits_episode_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/tv/1399/season/1/episode/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 63064,
            "name": "Baelor",
            "season_number": 1,
            "episode_number": 9,
            "show_id": 1399,
            "guest_stars": [{ "id": 1, "name": "Someone", "character": "Guard" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let episode = with_client(config_for(&server), |client| {
        client.tv_episode(1399, 1, 9, &TvEpisodeRequest::default())
    })
    .await
    .expect("episode should succeed");

    assert_eq!(episode.name, "Baelor");
    assert_eq!(episode.episode_number, 9);
    assert_eq!(episode.guest_stars[0].character, "Guard");
}

#[tokio::test]
async fn error_envelope_with_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/tv/1399/season/1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_envelope(
            7,
            "Invalid API key: You must be granted a valid key.",
        )))
        .mount(&server)
        .await;

    let err = with_client(config_for(&server), |client| {
        client.tv_season(1399, 1, &TvSeasonRequest::default())
    })
    .await
    .unwrap_err();

    match err {
        TmdbError::ApiError { code, message } => {
            assert_eq!(code, 7);
            assert!(message.starts_with("Invalid API key"));
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn error_envelope_with_http_ok_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/movie/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(error_envelope(
            34,
            "The resource you requested could not be found.",
        )))
        .mount(&server)
        .await;

    let err = with_client(config_for(&server), |client| {
        client.movie_detail(0, &MovieDetailRequest::default())
    })
    .await
    .unwrap_err();

    assert!(matches!(err, TmdbError::ApiError { code: 34, .. }));
    assert_eq!(
        err.to_string(),
        "The resource you requested could not be found. (code: 34)"
    );
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "page": "first", "results": {} })),
        )
        .mount(&server)
        .await;

    let err = with_client(config_for(&server), |client| {
        client.search_movie("The Matrix", &SearchMovieRequest::default())
    })
    .await
    .unwrap_err();

    assert!(matches!(err, TmdbError::ParseError(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let config = Config::default().with_api_url("http://127.0.0.1:1/3");

    let err = with_client(config, |client| {
        client.movie_detail(603, &MovieDetailRequest::default())
    })
    .await
    .unwrap_err();

    assert!(matches!(err, TmdbError::RequestError(_)));
}

#[tokio::test]
async fn authenticate_accepts_successful_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/authentication"))
        .and(query_param("api_key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status_code": 1,
            "status_message": "Success."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).with_api_key("secret");
    let response = with_client(config, |client| client.authenticate())
        .await
        .expect("authentication should succeed");

    assert!(response.success);
    assert_eq!(response.status_code, 1);
}

#[tokio::test]
async fn authenticate_rejects_invalid_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/authentication"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_envelope(
            7,
            "Invalid API key: You must be granted a valid key.",
        )))
        .mount(&server)
        .await;

    let config = config_for(&server).with_api_key("wrong");
    let err = with_client(config, |client| client.authenticate())
        .await
        .unwrap_err();

    assert!(matches!(err, TmdbError::ApiError { code: 7, .. }));
}
