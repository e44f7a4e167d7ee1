use env_logger::{fmt::Color, Builder, Env};
use log::{error, info};
use std::io::Write;

mod build_info;
mod config;
mod error_pages;
mod errors;
mod i18n;
mod requests;
mod server;

use config::Settings;
use i18n::I18n;

fn init_logger() {
    let mut builder = Builder::from_env(Env::default().filter_or(
        "LOG_LEVEL",
        "info,rocket::server=warn,rocket_dyn_templates=info,rocket::shield=off,rocket::launch=off",
    ));
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                buf.style()
                    .set_color(Color::Black)
                    .set_intense(true)
                    .value(chrono::Local::now().format("%Y-%m-%d %H:%M:%S")),
                buf.default_styled_level(record.level()),
                buf.style()
                    .set_color(Color::Black)
                    .set_intense(true)
                    .value(record.target()),
                record.args()
            )
        })
        .init();
}

#[tokio::main]
async fn main() {
    init_logger();

    info!("Starting up");

    let settings = match Settings::read_config() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Could not load configuration: {}", e);
            return;
        }
    };

    let i18n = match I18n::load(&settings.locales_dir, &settings.default_locale) {
        Ok(i18n) => i18n,
        Err(e) => {
            error!("Could not load translations: {}", e);
            return;
        }
    };

    info!(
        "Serving error pages in {} locale(s), default '{}'",
        i18n.locales().len(),
        i18n.default_locale()
    );

    info!(
        "Starting web server on {}:{} ({} environment, commit {})",
        settings.bind_addr, settings.bind_port, settings.environment, settings.commit
    );

    if let Err(e) = server::build(&settings, i18n).launch().await {
        error!("Web server stopped: {}", e);
    }
}
