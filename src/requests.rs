use rocket::fs::NamedFile;
use rocket::{get, State};
use std::path::{Path, PathBuf};

use crate::server::AppState;

// ===============
// ASSET endpoints
// ===============

#[get("/static/<asset..>")]
pub async fn assets(state: &State<AppState>, asset: PathBuf) -> Option<NamedFile> {
    NamedFile::open(Path::new(&state.static_dir).join(asset))
        .await
        .ok()
}
