use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::get,
};

use crate::{
    error::WebError,
    gallery::{Gallery, Slot},
    normalization::encode_path_segment,
    state::AppState,
    topic::Topic,
    validation::{SearchForm, validate_topic},
    views::{self, PageContext},
};

/// Where `/` sends the browser.
pub const HOME_PATH: &str = "/hallstat";

/// Gallery routes: one per fixed topic, plus search.
pub fn routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/", get(home))
        .route("/search", get(submit_search))
        .route("/search/{topic}", get(search_results));

    for topic in Topic::FIXED {
        if let Some(path) = topic.path() {
            router = router.route(
                path,
                get(move |State(gallery): State<Gallery>| fixed_gallery(gallery, topic)),
            );
        }
    }

    router
}

async fn home() -> Redirect {
    Redirect::to(HOME_PATH)
}

async fn fixed_gallery(gallery: Gallery, topic: Topic) -> Html<String> {
    let slot = gallery.slot(topic).await;
    let title = topic.title("");

    Html(render_slot(&slot, &title, Some(topic), ""))
}

/// Header form submission. Starts the search (again, if it finished or failed)
/// and sends the browser to its results.
async fn submit_search(
    State(gallery): State<Gallery>,
    Query(form): Query<SearchForm>,
) -> Redirect {
    let topic = match form.into_topic() {
        Ok(topic) => topic,
        Err(err) => {
            tracing::debug!("Ignoring search submission: {err}");
            return Redirect::to("/");
        }
    };

    if let Some(ticket) = gallery.refresh_search(&topic).await {
        gallery.spawn_fetch(ticket);
    }

    Redirect::to(&format!("/search/{}", encode_path_segment(&topic)))
}

/// Search results. Opening the path directly starts the search the first
/// time; later views only render whatever state it is in.
async fn search_results(
    State(gallery): State<Gallery>,
    Path(raw): Path<String>,
) -> Result<Html<String>, WebError> {
    let topic = validate_topic(&raw)?;

    if let Some(ticket) = gallery.begin_search_if_needed(&topic).await {
        gallery.spawn_fetch(ticket);
    }

    let slot = gallery.search_slot(&topic).await;
    let title = Topic::Search.title(&topic);

    Ok(Html(render_slot(&slot, &title, None, &topic)))
}

fn render_slot(slot: &Slot, title: &str, active: Option<Topic>, search_text: &str) -> String {
    let loading = slot.is_loading();
    let body = views::render_gallery(&slot.photos, title, loading);

    views::render_page(
        PageContext {
            title,
            active,
            search_text,
            refresh: loading,
        },
        &body,
    )
}
