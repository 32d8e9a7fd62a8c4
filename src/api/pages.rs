//! HTML rendering for the public pages.
//!
//! Pages are assembled from format! fragments around a shared layout; all
//! user- and database-sourced text goes through [`escape_html`].

use crate::db::albums::Album;
use crate::forms::{ContactForm, FormErrors};
use crate::pagination::Pagination;

/// Escape text for inclusion in HTML body or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared page shell.
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Disquaire</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            color: #222;
            line-height: 1.6;
        }}
        header {{
            background-color: #1a1a2e;
            color: #fff;
            padding: 15px 30px;
            display: flex;
            justify-content: space-between;
            align-items: center;
        }}
        header a {{ color: #fff; text-decoration: none; margin-right: 15px; }}
        .content {{ padding: 20px 30px; }}
        .album-grid {{ display: flex; flex-wrap: wrap; gap: 20px; }}
        .album-card {{ width: 200px; }}
        .album-card img {{ width: 200px; height: 200px; object-fit: cover; }}
        .pager a {{ margin-right: 10px; }}
        .errorlist {{ color: #b00020; }}
        form label {{ display: block; margin-top: 10px; }}
        .button {{
            display: inline-block;
            padding: 8px 16px;
            background: #1a1a2e;
            color: white;
            border: none;
            border-radius: 4px;
            margin-top: 12px;
            cursor: pointer;
        }}
    </style>
</head>
<body>
    <header>
        <div>
            <a href="/">Disquaire</a>
            <a href="/albums">All albums</a>
        </div>
        <form action="/search" method="get">
            <input type="text" name="query" placeholder="Search albums or artists">
            <button type="submit" class="button" style="margin-top:0">Search</button>
        </form>
    </header>
    <div class="content">
{body}
    </div>
</body>
</html>"#,
        title = escape_html(title),
        body = body,
    )
}

fn album_card(album: &Album) -> String {
    format!(
        r#"        <div class="album-card">
            <a href="/albums/{id}"><img src="{picture}" alt="{title}"></a>
            <p><a href="/albums/{id}">{title}</a></p>
        </div>"#,
        id = album.id,
        picture = escape_html(&album.picture),
        title = escape_html(&album.title),
    )
}

fn album_grid(albums: &[Album]) -> String {
    let cards: Vec<String> = albums.iter().map(album_card).collect();
    format!(
        "        <div class=\"album-grid\">\n{}\n        </div>",
        cards.join("\n")
    )
}

/// Front page: featured albums.
pub fn index_page(albums: &[Album]) -> String {
    let body = if albums.is_empty() {
        "        <h1>New arrivals</h1>\n        <p>No albums available right now.</p>".to_string()
    } else {
        format!("        <h1>New arrivals</h1>\n{}", album_grid(albums))
    };
    layout("Home", &body)
}

/// Paginated listing page with previous/next links.
pub fn listing_page(albums: &[Album], pagination: &Pagination) -> String {
    let mut pager = String::new();
    if pagination.page > 1 {
        pager.push_str(&format!(
            "<a href=\"/albums?page={}\">&laquo; Previous</a>",
            pagination.page - 1
        ));
    }
    if pagination.page < pagination.total_pages {
        pager.push_str(&format!(
            "<a href=\"/albums?page={}\">Next &raquo;</a>",
            pagination.page + 1
        ));
    }

    let body = format!(
        "        <h1>All albums</h1>\n{}\n        <p class=\"pager\">Page {} of {} {}</p>",
        album_grid(albums),
        pagination.page,
        pagination.total_pages.max(1),
        pager,
    );
    layout("Albums", &body)
}

/// Search results page.
pub fn search_page(query: &str, albums: &[Album]) -> String {
    let heading = format!(
        "        <h1>Results for: {}</h1>",
        escape_html(query)
    );
    let body = if albums.is_empty() {
        format!("{heading}\n        <p>No albums found.</p>")
    } else {
        format!("{heading}\n{}", album_grid(albums))
    };
    layout("Search", &body)
}

/// Album detail page with the booking form, optionally re-rendered with
/// field-level errors and previously submitted values.
pub fn detail_page(
    album: &Album,
    artists_name: &str,
    form: &ContactForm,
    errors: &FormErrors,
) -> String {
    let mut error_html = String::new();
    if let Some(msg) = errors.internal {
        error_html.push_str(&format!("        <p class=\"errorlist\">{msg}</p>\n"));
    }

    let field_error = |msg: Option<&str>| match msg {
        Some(m) => format!("<span class=\"errorlist\">{m}</span>"),
        None => String::new(),
    };

    let booking_form = if album.available {
        format!(
            r#"        <h2>Reserve this album</h2>
        <form action="/albums/{id}" method="post">
            <label>Name {name_error}
                <input type="text" name="name" value="{name}">
            </label>
            <label>Email {email_error}
                <input type="text" name="email" value="{email}">
            </label>
            <button type="submit" class="button">Reserve</button>
        </form>"#,
            id = album.id,
            name = escape_html(&form.name),
            email = escape_html(&form.email),
            name_error = field_error(errors.name),
            email_error = field_error(errors.email),
        )
    } else {
        "        <p>This album has already been reserved.</p>".to_string()
    };

    let body = format!(
        r#"        <h1>{title}</h1>
        <p>{artists}</p>
        <img src="{picture}" alt="{title}" width="300">
{error_html}{booking_form}"#,
        title = escape_html(&album.title),
        artists = escape_html(artists_name),
        picture = escape_html(&album.picture),
    );
    layout(&album.title, &body)
}

/// Booking confirmation page.
pub fn confirmation_page(album_title: &str) -> String {
    let body = format!(
        "        <h1>Thank you!</h1>\n        <p>Your reservation for <strong>{}</strong> has been registered. We will contact you shortly.</p>",
        escape_html(album_title)
    );
    layout("Reservation confirmed", &body)
}

/// 404 page for missing albums.
pub fn not_found_page() -> String {
    layout(
        "Not found",
        "        <h1>Not found</h1>\n        <p>This album does not exist or is no longer listed.</p>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"A&B"</b>"#),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_search_page_escapes_query() {
        let html = search_page("<script>alert(1)</script>", &[]);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_detail_page_hides_form_when_unavailable() {
        let album = Album {
            id: 1,
            reference: None,
            created_at: 0,
            available: false,
            title: "Escape".to_string(),
            picture: String::new(),
        };
        let html = detail_page(
            &album,
            "Journey",
            &ContactForm::default(),
            &FormErrors::default(),
        );
        assert!(html.contains("already been reserved"));
        assert!(!html.contains("method=\"post\""));
    }
}
