use rocket::{routes, Build, Rocket};
use rocket_dyn_templates::Template;

use crate::build_info::BuildInfo;
use crate::config::Settings;
use crate::error_pages::catchers;
use crate::i18n::I18n;
use crate::requests::assets;

/// Read-only state shared by every request. Built once at startup.
pub struct AppState {
    pub environment: String,
    pub build: BuildInfo,
    pub static_dir: String,
    pub i18n: I18n,
}

impl AppState {
    pub fn new(settings: &Settings, i18n: I18n) -> Self {
        Self {
            environment: settings.environment.clone(),
            build: BuildInfo::from(settings),
            static_dir: settings.static_dir.clone(),
            i18n,
        }
    }
}

pub fn build(settings: &Settings, i18n: I18n) -> Rocket<Build> {
    rocket::build()
        .configure(
            rocket::Config::figment()
                .merge(("port", settings.bind_port))
                .merge(("address", &settings.bind_addr))
                .merge(("template_dir", &settings.template_dir)),
        )
        .manage(AppState::new(settings, i18n))
        .attach(Template::fairing())
        .mount("/", routes![assets])
        .register("/", catchers())
}
