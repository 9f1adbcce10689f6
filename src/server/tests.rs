use super::*;
use crate::Rating;
use crate::SESSION_COOKIE;
use crate::players::Player;
use crate::tables::TableEntry;
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::http::header::ContentType;
use actix_web::test;

const USERNAME: &str = "club";
const PASSWORD: &str = "secret";

macro_rules! app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from($store.clone() as Arc<dyn Store>))
                .app_data(web::Data::new(Sessions::default()))
                .app_data(web::Data::new(Signups::default()))
                .app_data(web::Data::new(Credentials::new(
                    USERNAME.to_string(),
                    PASSWORD.to_string(),
                )))
                .configure(routes),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr) => {{
        let body = format!("username={}&password={}", USERNAME, PASSWORD);
        let resp = test::call_service(&$app, form("/login", &body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        resp.response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie")
            .into_owned()
    }};
}

fn form(uri: &str, body: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header(ContentType::form_url_encoded())
        .set_payload(body.to_string())
}

fn authed(req: test::TestRequest, cookie: &Cookie<'static>) -> test::TestRequest {
    req.cookie(cookie.clone())
}

async fn seeded(players: &[(&str, Rating)]) -> Arc<Memory> {
    let store = Arc::new(Memory::new());
    for (name, rating) in players {
        store
            .create_player(&Player::new(name.to_string(), *rating))
            .await
            .unwrap();
    }
    store
}

async fn rating(store: &Memory, name: &str) -> Rating {
    store.player(name).await.unwrap().unwrap().rating()
}

async fn text(resp: actix_web::dev::ServiceResponse) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

#[actix_web::test]
async fn login_sets_cookie_and_redirects() {
    let store = Arc::new(Memory::new());
    let app = app!(store);
    let body = format!("username={}&password={}", USERNAME, PASSWORD);
    let resp = test::call_service(&app, form("/login", &body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/landing");
    assert!(resp.response().cookies().any(|c| c.name() == SESSION_COOKIE));
}

#[actix_web::test]
async fn wrong_password_is_forbidden() {
    let store = Arc::new(Memory::new());
    let app = app!(store);
    let body = format!("username={}&password=nope", USERNAME);
    let resp = test::call_service(&app, form("/login", &body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(!resp.response().cookies().any(|c| c.name() == SESSION_COOKIE));
}

#[actix_web::test]
async fn protected_routes_need_a_session() {
    let store = Arc::new(Memory::new());
    let app = app!(store);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/landing").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let bogus = Cookie::new(SESSION_COOKIE, "0190b7a4-0000-7000-8000-000000000000");
    let resp = test::call_service(&app, authed(test::TestRequest::get().uri("/landing"), &bogus).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let resp = test::call_service(&app, form("/add_player", "name=ana").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(store.players().await.unwrap().is_empty());
}

#[actix_web::test]
async fn login_page_and_health_are_public() {
    let store = Arc::new(Memory::new());
    let app = app!(store);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(text(resp).await, "ok");
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let store = Arc::new(Memory::new());
    let app = app!(store);
    let cookie = login!(app);
    let resp = test::call_service(&app, authed(test::TestRequest::get().uri("/landing"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, authed(test::TestRequest::post().uri("/logout"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let resp = test::call_service(&app, authed(test::TestRequest::get().uri("/landing"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn duplicate_player_conflicts() {
    let store = Arc::new(Memory::new());
    let app = app!(store);
    let cookie = login!(app);
    let resp = test::call_service(&app, authed(form("/add_player", "name=ana&rating=1200"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let resp = test::call_service(&app, authed(form("/add_player", "name=ana&rating=900"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let players = store.players().await.unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].rating(), 1200.0);
}

#[actix_web::test]
async fn missing_rating_defaults() {
    let store = Arc::new(Memory::new());
    let app = app!(store);
    let cookie = login!(app);
    test::call_service(&app, authed(form("/add_player", "name=ana"), &cookie).to_request()).await;
    test::call_service(&app, authed(form("/add_player", "name=bo&rating="), &cookie).to_request()).await;
    assert_eq!(rating(&store, "ana").await, 1000.0);
    assert_eq!(rating(&store, "bo").await, 1000.0);
    let resp = test::call_service(&app, authed(form("/add_player", "name=cy&rating=lots"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = test::call_service(&app, authed(form("/add_player", "rating=10"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn sort_players_ranks_selection() {
    let store = seeded(&[("ana", 900.0), ("bo", 1300.0), ("cy", 1100.0), ("di", 2000.0)]).await;
    let app = app!(store);
    let cookie = login!(app);
    let resp = test::call_service(
        &app,
        authed(form("/sort_players", "selected=ana&selected=bo&selected=cy"), &cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = text(resp).await;
    let bo = page.find(">bo<").unwrap();
    let cy = page.find(">cy<").unwrap();
    let ana = page.find(">ana<").unwrap();
    assert!(bo < cy && cy < ana);
    assert!(!page.contains(">di<"));
}

#[actix_web::test]
async fn new_table_rows_builds_form() {
    let store = seeded(&[("ana", 1000.0)]).await;
    let app = app!(store);
    let cookie = login!(app);
    let resp = test::call_service(&app, authed(form("/new_table_rows", "n=4"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(text(resp).await.matches("name=\"player\"").count(), 4);
    let resp = test::call_service(&app, authed(form("/new_table_rows", "n=-1"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = test::call_service(&app, authed(form("/new_table_rows", "n=100000"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn equal_ratings_survive_a_table() {
    let store = seeded(&[("a", 1000.0), ("b", 1000.0), ("c", 1000.0)]).await;
    let app = app!(store);
    let cookie = login!(app);
    let body = "n=3&player=a&player=b&player=c\
                &s2=10&s2=20&s2=30&s3=0&s3=0&s3=0&s4=0&s4=0&s4=0\
                &s5=0&s5=0&s5=0&s6=0&s6=0&s6=0";
    let resp = test::call_service(&app, authed(form("/save_table", body), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let tables = store.tables().await.unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(
        tables[0].entries(),
        &[
            TableEntry::new("a", 10),
            TableEntry::new("b", 20),
            TableEntry::new("c", 30)
        ]
    );
    let uri = format!("/apply_ratings/{}", tables[0].id());
    let resp = test::call_service(&app, authed(test::TestRequest::post().uri(&uri), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = test::read_body_json(resp).await;
    let updated = json["updated"].as_object().unwrap();
    assert_eq!(updated.len(), 3);
    assert!((updated["a"].as_f64().unwrap() + 0.5).abs() < 1e-9);
    assert!((updated["c"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    for name in ["a", "b", "c"] {
        assert_eq!(rating(&store, name).await, 1000.0);
    }
}

#[actix_web::test]
async fn applying_moves_unequal_ratings() {
    let store = seeded(&[("a", 1100.0), ("b", 1000.0), ("c", 900.0)]).await;
    let app = app!(store);
    let cookie = login!(app);
    let id = store
        .create_table(&[
            TableEntry::new("a", 10),
            TableEntry::new("b", 20),
            TableEntry::new("c", 30),
        ])
        .await
        .unwrap();
    let uri = format!("/apply_ratings/{}", id);
    let resp = test::call_service(&app, authed(test::TestRequest::post().uri(&uri), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(rating(&store, "a").await, 950.0);
    assert_eq!(rating(&store, "b").await, 1000.0);
    assert_eq!(rating(&store, "c").await, 1050.0);
}

#[actix_web::test]
async fn unknown_player_rolls_back() {
    let store = seeded(&[("a", 1500.0), ("b", 1000.0)]).await;
    let app = app!(store);
    let cookie = login!(app);
    let id = store
        .create_table(&[
            TableEntry::new("a", 10),
            TableEntry::new("ghost", 10),
            TableEntry::new("b", 10),
        ])
        .await
        .unwrap();
    let uri = format!("/apply_ratings/{}", id);
    let resp = test::call_service(&app, authed(test::TestRequest::post().uri(&uri), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(text(resp).await, "unknown player: ghost");
    assert_eq!(rating(&store, "a").await, 1500.0);
    assert_eq!(rating(&store, "b").await, 1000.0);
}

#[actix_web::test]
async fn unknown_table_is_not_found() {
    let store = Arc::new(Memory::new());
    let app = app!(store);
    let cookie = login!(app);
    let resp = test::call_service(
        &app,
        authed(test::TestRequest::post().uri("/apply_ratings/42"), &cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn save_table_validates() {
    let store = seeded(&[("a", 1000.0)]).await;
    let app = app!(store);
    let cookie = login!(app);
    for body in [
        "n=1&player=ghost&s2=1&s3=1&s4=1&s5=1&s6=1",
        "n=1&player=a&s2=x&s3=1&s4=1&s5=1&s6=1",
        "n=2&player=a&player=a&s2=1&s3=1&s4=1&s5=1&s6=1",
        "n=1&player=a",
        "n=1&player=a&s2=9223372036854775807&s3=1&s4=0&s5=0&s6=0",
        "player=a&s2=1",
    ] {
        let resp = test::call_service(&app, authed(form("/save_table", body), &cookie).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", body);
    }
    assert!(store.tables().await.unwrap().is_empty());
}

#[actix_web::test]
async fn view_tables_lists_saved_tables() {
    let store = seeded(&[("a", 1000.0)]).await;
    let app = app!(store);
    let cookie = login!(app);
    store.create_table(&[TableEntry::new("a", 7)]).await.unwrap();
    store.create_table(&[TableEntry::new("a", 9)]).await.unwrap();
    let resp = test::call_service(&app, authed(test::TestRequest::get().uri("/view_tables"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = text(resp).await;
    assert!(page.contains("/apply_ratings/1"));
    assert!(page.contains("/apply_ratings/2"));
}

#[actix_web::test]
async fn signup_queue_flow() {
    let store = seeded(&[("ana", 900.0), ("bo", 1200.0)]).await;
    let app = app!(store);
    let cookie = login!(app);
    for body in ["name=ana", "name=bo", "name=ana", "name=ghost"] {
        let resp = test::call_service(&app, authed(form("/signup_list", body), &cookie).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let resp = test::call_service(&app, authed(test::TestRequest::get().uri("/signup_list"), &cookie).to_request()).await;
    let page = text(resp).await;
    assert_eq!(page.matches("<tr><td>ana</td>").count(), 1);
    assert!(page.find("<tr><td>bo</td>").unwrap() < page.find("<tr><td>ana</td>").unwrap());
    assert!(!page.contains("ghost"));
    store.update_rating("ana", 1500.0).await.unwrap();
    let resp = test::call_service(&app, authed(test::TestRequest::get().uri("/signup_list"), &cookie).to_request()).await;
    let page = text(resp).await;
    assert!(page.find("<tr><td>ana</td>").unwrap() < page.find("<tr><td>bo</td>").unwrap());
    let resp = test::call_service(&app, authed(test::TestRequest::post().uri("/signup_discard"), &cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/signup_list");
    let resp = test::call_service(&app, authed(test::TestRequest::get().uri("/signup_list"), &cookie).to_request()).await;
    assert!(!text(resp).await.contains("<tr><td>"));
}
