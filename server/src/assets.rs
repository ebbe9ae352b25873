//! The compiled frontend, embedded at build time and served with an
//! `index.html` fallback so client-side routes survive a reload.

use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use log::debug;
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

const INDEX: &str = "index.html";

#[derive(Debug, PartialEq, Eq)]
pub struct Asset<'a> {
    pub path: &'a str,
    pub contents: &'a [u8],
    pub content_type: String,
}

/// Finds the file for a request path.
///
/// Paths whose last segment has an extension are files and miss with `None`;
/// anything else is an app route and gets `index.html`.
pub fn resolve_asset<'a>(dir: &'a Dir<'a>, request_path: &str) -> Option<Asset<'a>> {
    let path = request_path.trim_start_matches('/');
    let path = if path.is_empty() { INDEX } else { path };

    if let Some(file) = dir.get_file(path) {
        return Some(Asset {
            path: file.path().to_str().unwrap_or(INDEX),
            contents: file.contents(),
            content_type: from_path(path).first_or_octet_stream().to_string(),
        });
    }

    let last = path.rsplit('/').next().unwrap_or_default();
    if last.contains('.') {
        return None;
    }
    dir.get_file(INDEX).map(|index| Asset {
        path: INDEX,
        contents: index.contents(),
        content_type: "text/html; charset=utf-8".to_string(),
    })
}

pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    match resolve_asset(&STATIC_DIR, req.path()) {
        Some(asset) => {
            debug!("{} -> {}", req.path(), asset.path);
            HttpResponse::Ok()
                .content_type(asset.content_type)
                .body(asset.contents.to_vec())
        }
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use include_dir::{DirEntry, File};

    static ENTRIES: &[DirEntry<'static>] = &[
        DirEntry::File(File::new("index.html", b"<html></html>")),
        DirEntry::File(File::new("frontend-1a2b.js", b"export {}")),
        DirEntry::File(File::new("frontend-1a2b_bg.wasm", b"\0asm")),
    ];
    static DIST: Dir<'static> = Dir::new("", ENTRIES);

    #[test]
    fn root_serves_index() {
        let asset = resolve_asset(&DIST, "/").unwrap();
        assert_eq!(asset.path, "index.html");
        assert_eq!(asset.contents, b"<html></html>");
    }

    #[test]
    fn files_are_served_with_their_type() {
        let asset = resolve_asset(&DIST, "/frontend-1a2b_bg.wasm").unwrap();
        assert_eq!(asset.content_type, "application/wasm");
        let asset = resolve_asset(&DIST, "/frontend-1a2b.js").unwrap();
        assert!(asset.content_type.contains("javascript"));
    }

    #[test]
    fn app_routes_fall_back_to_index() {
        for path in ["/dashboard", "/designer/42", "/data/upload/42"] {
            let asset = resolve_asset(&DIST, path).unwrap();
            assert_eq!(asset.path, "index.html", "{path}");
            assert_eq!(asset.content_type, "text/html; charset=utf-8");
        }
    }

    #[test]
    fn missing_files_are_not_found() {
        assert_eq!(resolve_asset(&DIST, "/missing.js"), None);
        assert_eq!(resolve_asset(&DIST, "/img/logo.png"), None);
    }
}
