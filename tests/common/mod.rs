#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use mgl_blanket_shop::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::products::ActiveModel as ProductActive,
    routes::create_router,
    state::AppState,
    views::extract_page_data,
};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;

/// Fresh in-memory store with the products table migrated.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, &AppConfig::default()))
}

pub async fn insert_product(
    state: &AppState,
    id: i32,
    name_en: &str,
    price: f64,
    is_active: bool,
) -> anyhow::Result<()> {
    ProductActive {
        id: Set(id),
        name_mm: Set(format!("စောင် {id}")),
        name_en: Set(name_en.to_string()),
        price: Set(price),
        image: Set(Some(format!("img/{id}.jpg"))),
        short_desc_mm: Set(None),
        desc_mm: Set(None),
        is_active: Set(is_active),
    }
    .insert(&state.orm)
    .await?;
    Ok(())
}

pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub data: Option<Value>,
}

impl Page {
    pub fn notices(&self) -> Vec<String> {
        self.data
            .as_ref()
            .and_then(|d| d["notices"].as_array().cloned())
            .unwrap_or_default()
            .into_iter()
            .filter_map(|n| n.as_str().map(str::to_string))
            .collect()
    }

    pub fn ids(&self, key: &str) -> Vec<i64> {
        self.data
            .as_ref()
            .and_then(|d| d[key].as_array().cloned())
            .unwrap_or_default()
            .iter()
            .filter_map(|item| item["id"].as_i64())
            .collect()
    }
}

/// Drives the router like a browser: remembers the session cookie between requests.
pub struct Browser {
    app: Router,
    cookie: Option<String>,
}

impl Browser {
    pub fn new(state: AppState) -> Self {
        Self {
            app: create_router(state),
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> Page {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> Page {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// POST with no content type at all, as a hand-written client might send.
    pub async fn post_untyped(&mut self, uri: &str, body: &str) -> Page {
        let request = self
            .request("POST", uri)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn login(&mut self) -> Page {
        self.post_form("/login", "username=admin&password=mgl12345").await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> Page {
        let response: Response<Body> = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8_lossy(&bytes);

        Page {
            status,
            location,
            data: extract_page_data(&html),
        }
    }
}
