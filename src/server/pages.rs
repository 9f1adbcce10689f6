//! Bare HTML pages. Every interpolated value goes through [`escape`].
use crate::FIRST_ROUND;
use crate::ROUNDS;
use crate::players::Player;
use crate::tables::Table;
use actix_web::HttpResponse;
use actix_web::http::header::ContentType;

pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

pub fn escape(raw: &str) -> String {
    raw.chars().fold(String::with_capacity(raw.len()), |mut out, c| {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
        out
    })
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head><body>\n<h1>{}</h1>\n{}\n</body></html>\n",
        escape(title),
        escape(title),
        body
    )
}

fn player_rows(players: &[Player]) -> String {
    players
        .iter()
        .map(|p| format!("<tr><td>{}</td><td>{:.1}</td></tr>", escape(p.name()), p.rating()))
        .collect()
}

fn player_options(players: &[Player]) -> String {
    players
        .iter()
        .map(|p| format!("<option value=\"{0}\">{0}</option>", escape(p.name())))
        .collect()
}

pub fn login() -> String {
    layout(
        "Login",
        "<form method=\"post\" action=\"/login\">\
         <input name=\"username\" placeholder=\"username\">\
         <input name=\"password\" type=\"password\" placeholder=\"password\">\
         <button>Log in</button></form>",
    )
}

pub fn landing(username: &str) -> String {
    layout(
        "Club",
        &format!(
            "<p>Logged in as {}</p><ul>\
             <li><a href=\"/add_player\">Add player</a></li>\
             <li><a href=\"/sort_players\">Sort players</a></li>\
             <li><a href=\"/new_table\">New table</a></li>\
             <li><a href=\"/view_tables\">View tables</a></li>\
             <li><a href=\"/signup_list\">Sign-up list</a></li>\
             </ul><form method=\"post\" action=\"/logout\"><button>Log out</button></form>",
            escape(username)
        ),
    )
}

pub fn add_player() -> String {
    layout(
        "Add player",
        "<form method=\"post\" action=\"/add_player\">\
         <input name=\"name\" placeholder=\"name\">\
         <input name=\"rating\" placeholder=\"1000\">\
         <button>Add</button></form>",
    )
}

pub fn select_players(players: &[Player]) -> String {
    let boxes = players
        .iter()
        .map(|p| {
            format!(
                "<label><input type=\"checkbox\" name=\"selected\" value=\"{0}\">{0} ({1:.1})</label><br>",
                escape(p.name()),
                p.rating()
            )
        })
        .collect::<String>();
    layout(
        "Sort players",
        &format!(
            "<form method=\"post\" action=\"/sort_players\">{}<button>Sort</button></form>",
            boxes
        ),
    )
}

pub fn ranking(players: &[Player]) -> String {
    layout(
        "Sorted players",
        &format!(
            "<table><tr><th>Player</th><th>Rating</th></tr>{}</table>",
            player_rows(players)
        ),
    )
}

pub fn row_count() -> String {
    layout(
        "New table",
        "<form method=\"post\" action=\"/new_table_rows\">\
         <input name=\"n\" type=\"number\" min=\"0\" placeholder=\"rows\">\
         <button>Next</button></form>",
    )
}

pub fn table_form(rows: usize, players: &[Player]) -> String {
    let header = (FIRST_ROUND..FIRST_ROUND + ROUNDS)
        .map(|k| format!("<th>R{}</th>", k - FIRST_ROUND + 1))
        .collect::<String>();
    let inputs = (FIRST_ROUND..FIRST_ROUND + ROUNDS)
        .map(|k| format!("<td><input name=\"s{}\" type=\"number\" value=\"0\"></td>", k))
        .collect::<String>();
    let options = player_options(players);
    let body = (0..rows)
        .map(|_| format!("<tr><td><select name=\"player\">{}</select></td>{}</tr>", options, inputs))
        .collect::<String>();
    layout(
        "New table",
        &format!(
            "<form method=\"post\" action=\"/save_table\">\
             <input type=\"hidden\" name=\"n\" value=\"{}\">\
             <table><tr><th>Player</th>{}</tr>{}</table>\
             <button>Save</button></form>",
            rows, header, body
        ),
    )
}

pub fn tables(tables: &[Table]) -> String {
    let sections = tables
        .iter()
        .map(|table| {
            let rows = table
                .entries()
                .iter()
                .map(|e| format!("<tr><td>{}</td><td>{}</td></tr>", escape(&e.player), e.sum))
                .collect::<String>();
            format!(
                "<h2>Table {0}</h2><table><tr><th>Player</th><th>Sum</th></tr>{1}</table>\
                 <form method=\"post\" action=\"/apply_ratings/{0}\"><button>Apply ratings</button></form>",
                table.id(),
                rows
            )
        })
        .collect::<String>();
    layout("Tables", &sections)
}

pub fn signup(players: &[Player], queue: &[Player]) -> String {
    layout(
        "Sign-up list",
        &format!(
            "<form method=\"post\" action=\"/signup_list\"><select name=\"name\">{}</select>\
             <button>Sign up</button></form>\
             <table><tr><th>Player</th><th>Rating</th></tr>{}</table>\
             <form method=\"post\" action=\"/signup_discard\"><button>Discard list</button></form>",
            player_options(players),
            player_rows(queue)
        ),
    )
}
