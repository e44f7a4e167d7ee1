use log::error;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::{catch, catchers, Catcher, Orbit, Request, Responder, Rocket};
use rocket_dyn_templates::Template;
use serde::Serialize;
use unic_langid::LanguageIdentifier;

use crate::build_info::BuildInfo;
use crate::errors::Error;
use crate::server::AppState;

/// The error conditions that get a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPage {
    NotFound,
    InternalServerError,
}

impl ErrorPage {
    pub fn status(self) -> Status {
        match self {
            ErrorPage::NotFound => Status::NotFound,
            ErrorPage::InternalServerError => Status::InternalServerError,
        }
    }

    pub fn message_key(self) -> &'static str {
        match self {
            ErrorPage::NotFound => "404_not_found",
            ErrorPage::InternalServerError => "500_internal_server_error",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            ErrorPage::NotFound => "not_found",
            ErrorPage::InternalServerError => "internal_server_error",
        }
    }

    /// Served when the page itself cannot be rendered. Touches neither
    /// templates nor translations.
    pub fn fallback_body(self) -> &'static str {
        match self {
            ErrorPage::NotFound => "404 Not Found",
            ErrorPage::InternalServerError => "500 Internal Server Error",
        }
    }

    pub fn render<R: TemplateRenderer + ?Sized>(
        self,
        renderer: &R,
        locale: &LanguageIdentifier,
        state: &AppState,
    ) -> Result<String, Error> {
        match self {
            ErrorPage::NotFound => render_not_found(renderer, locale, state),
            ErrorPage::InternalServerError => {
                render_internal_server_error(renderer, locale, state)
            }
        }
    }
}

/// Everything an error template gets to see.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorPageContext {
    pub title: String,
    pub built: String,
    pub commit: String,
    pub environment: String,
}

impl ErrorPageContext {
    pub fn new(title: impl Into<String>, build: &BuildInfo, environment: &str) -> Self {
        Self {
            title: title.into(),
            built: build.built.clone(),
            commit: build.commit.clone(),
            environment: environment.to_owned(),
        }
    }

    /// Fails with `LocalizationMissing` if no catalog has a title for `page`.
    pub fn resolve(
        page: ErrorPage,
        locale: &LanguageIdentifier,
        state: &AppState,
    ) -> Result<Self, Error> {
        let title = state.i18n.lookup(locale, page.message_key())?;
        Ok(Self::new(title, &state.build, &state.environment))
    }

    /// Like `resolve`, but lets the catalog fall back to the default locale
    /// and then to the message key.
    pub fn translated(page: ErrorPage, locale: &LanguageIdentifier, state: &AppState) -> Self {
        let title = state.i18n.translate(locale, page.message_key());
        Self::new(title, &state.build, &state.environment)
    }
}

pub trait TemplateRenderer {
    fn render(&self, template: &str, context: &ErrorPageContext) -> Option<String>;
}

impl TemplateRenderer for Rocket<Orbit> {
    fn render(&self, template: &str, context: &ErrorPageContext) -> Option<String> {
        Template::show(self, template.to_owned(), context)
    }
}

pub fn render<R: TemplateRenderer + ?Sized>(
    page: ErrorPage,
    renderer: &R,
    context: &ErrorPageContext,
) -> Result<String, Error> {
    renderer
        .render(page.template(), context)
        .filter(|html| !html.is_empty())
        .ok_or_else(|| Error::TemplateRenderFailure(page.template().to_owned()))
}

pub fn render_not_found<R: TemplateRenderer + ?Sized>(
    renderer: &R,
    locale: &LanguageIdentifier,
    state: &AppState,
) -> Result<String, Error> {
    let context = ErrorPageContext::resolve(ErrorPage::NotFound, locale, state)?;
    render(ErrorPage::NotFound, renderer, &context)
}

pub fn render_internal_server_error<R: TemplateRenderer + ?Sized>(
    renderer: &R,
    locale: &LanguageIdentifier,
    state: &AppState,
) -> Result<String, Error> {
    let context = ErrorPageContext::resolve(ErrorPage::InternalServerError, locale, state)?;
    render(ErrorPage::InternalServerError, renderer, &context)
}

#[derive(Responder)]
pub enum ErrorResponse {
    Page(RawHtml<String>),
    Fallback(String),
}

fn respond(page: ErrorPage, req: &Request<'_>) -> ErrorResponse {
    let rocket = req.rocket();
    let state = match rocket.state::<AppState>() {
        Some(state) => state,
        None => {
            error!("Application state is not managed, serving plain {}", page.status());
            return ErrorResponse::Fallback(page.fallback_body().to_owned());
        }
    };

    let path = req.uri().path();
    let locale = state.i18n.negotiate(
        path.segments().next(),
        req.headers().get_one("Accept-Language"),
    );
    let rendered = match page.render(rocket, locale, state) {
        Err(Error::LocalizationMissing { .. }) => {
            let context = ErrorPageContext::translated(page, locale, state);
            render(page, rocket, &context)
        }
        rendered => rendered,
    };

    match rendered {
        Ok(html) => ErrorResponse::Page(RawHtml(html)),
        Err(e) => {
            error!("{}, serving plain {} for {}", e, page.status(), req.uri());
            ErrorResponse::Fallback(page.fallback_body().to_owned())
        }
    }
}

#[catch(404)]
pub fn not_found(req: &Request) -> ErrorResponse {
    respond(ErrorPage::NotFound, req)
}

#[catch(500)]
pub fn internal_error(req: &Request) -> ErrorResponse {
    respond(ErrorPage::InternalServerError, req)
}

pub fn catchers() -> Vec<Catcher> {
    catchers![not_found, internal_error]
}
