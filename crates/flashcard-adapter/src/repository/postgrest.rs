//! PostgREST Record Store - Supabase tables over HTTP
//!
//! Collections map to `{url}/rest/v1/{table}`:
//!
//! | table           | operations                                  |
//! |-----------------|---------------------------------------------|
//! | `categories`    | select                                      |
//! | `cards`         | select, select by category, insert, update, delete |
//! | `card_attempts` | select, insert                              |
//!
//! Writes ask for `Prefer: return=representation` so the created or
//! affected rows come back in the response. An update or delete that
//! matches no row returns `[]`, which is reported as `NotFound`.

use flashcard_domain::{
    Attempt, AttemptStore, Card, CardId, CardStore, CardUpdate, Category, CategoryId,
    CategoryStore, NewCard, StoreError,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ConfigError, StoreConfig};

const CATEGORIES: &str = "categories";
const CARDS: &str = "cards";
const ATTEMPTS: &str = "card_attempts";

/// Row ids may be uuids or bigints depending on the schema
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum RowId {
    Text(String),
    Number(i64),
}

impl RowId {
    fn into_string(self) -> String {
        match self {
            RowId::Text(s) => s,
            RowId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    id: RowId,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category::new(CategoryId::new(row.id.into_string()), row.name)
    }
}

#[derive(Debug, Deserialize)]
struct CardRow {
    id: RowId,
    question: String,
    answer: String,
    category_id: RowId,
}

impl From<CardRow> for Card {
    fn from(row: CardRow) -> Self {
        Card::new(
            CardId::new(row.id.into_string()),
            row.question,
            row.answer,
            CategoryId::new(row.category_id.into_string()),
        )
    }
}

#[derive(Debug, Deserialize)]
struct AttemptRow {
    card_id: RowId,
    is_correct: bool,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<AttemptRow> for Attempt {
    fn from(row: AttemptRow) -> Self {
        let card_id = CardId::new(row.card_id.into_string());
        match row.created_at {
            Some(at) => Attempt::recorded(card_id, row.is_correct, at),
            None => Attempt::new(card_id, row.is_correct),
        }
    }
}

#[derive(Debug, Serialize)]
struct NewCardBody<'a> {
    question: &'a str,
    answer: &'a str,
    category_id: &'a str,
}

#[derive(Debug, Serialize)]
struct CardUpdateBody<'a> {
    question: &'a str,
    answer: &'a str,
}

#[derive(Debug, Serialize)]
struct NewAttemptBody<'a> {
    card_id: &'a str,
    is_correct: bool,
}

/// Record store backed by a Supabase/PostgREST endpoint
#[derive(Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl core::fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("base_url", &self.base_url)
            .field("client", &"<reqwest::Client>")
            .finish()
    }
}

impl PostgrestStore {
    pub fn new(config: &StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("flashcards/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    fn write_request(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, table)
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let (client, request) = request.build_split();
        let request = request.map_err(|e| StoreError::unavailable(e.to_string()))?;
        let method = request.method().clone();
        let response = client
            .execute(request)
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(&method, status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::unavailable(format!("Malformed response: {}", e)))
    }

    async fn fetch_rows<R, T>(&self, request: RequestBuilder) -> Result<Vec<T>, StoreError>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let rows: Vec<R> = self.fetch(request).await?;
        Ok(rows.into_iter().map(T::from).collect())
    }
}

/// Map a non-2xx response onto the store error taxonomy
///
/// Only constraint violations become `Validation`; everything else is
/// `Unavailable` and may be retried.
fn classify_failure(method: &Method, status: StatusCode, body: &str) -> StoreError {
    let message = format!("HTTP {}: {}", status.as_u16(), body);
    if is_constraint_violation(method, status, body) {
        StoreError::Validation { message }
    } else {
        StoreError::unavailable(message)
    }
}

/// Postgres reports integrity violations as SQLSTATE class `23`
fn is_constraint_violation(method: &Method, status: StatusCode, body: &str) -> bool {
    if let Some(code) = postgres_code(body) {
        return code.starts_with("23");
    }
    *method != Method::GET
        && matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
        )
}

fn postgres_code(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("code")?.as_str().map(str::to_string)
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

fn single_row<T>(rows: Vec<T>, table: &str, id: &str) -> Result<T, StoreError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| StoreError::not_found(table, id))
}

impl CategoryStore for PostgrestStore {
    async fn select_categories(&self) -> Result<Vec<Category>, StoreError> {
        let request = self
            .request(Method::GET, CATEGORIES)
            .query(&[("select", "*")]);
        self.fetch_rows::<CategoryRow, Category>(request).await
    }
}

impl CardStore for PostgrestStore {
    async fn select_cards(&self) -> Result<Vec<Card>, StoreError> {
        let request = self.request(Method::GET, CARDS).query(&[("select", "*")]);
        let cards = self.fetch_rows::<CardRow, Card>(request).await?;
        debug!(count = cards.len(), "fetched cards");
        Ok(cards)
    }

    async fn select_cards_in(&self, category: &CategoryId) -> Result<Vec<Card>, StoreError> {
        let filter = eq(category.as_str());
        let request = self
            .request(Method::GET, CARDS)
            .query(&[("select", "*"), ("category_id", filter.as_str())]);
        self.fetch_rows::<CardRow, Card>(request).await
    }

    async fn insert_card(&self, card: &NewCard) -> Result<Card, StoreError> {
        let body = [NewCardBody {
            question: card.question(),
            answer: card.answer(),
            category_id: card.category_id().as_str(),
        }];
        let request = self.write_request(Method::POST, CARDS).json(&body);
        let rows = self.fetch_rows::<CardRow, Card>(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::unavailable("Insert returned no row"))
    }

    async fn update_card(&self, id: &CardId, update: &CardUpdate) -> Result<Card, StoreError> {
        let filter = eq(id.as_str());
        let body = CardUpdateBody {
            question: update.question(),
            answer: update.answer(),
        };
        let request = self
            .write_request(Method::PATCH, CARDS)
            .query(&[("id", filter.as_str())])
            .json(&body);
        let rows = self.fetch_rows::<CardRow, Card>(request).await?;
        single_row(rows, CARDS, id.as_str())
    }

    async fn delete_card(&self, id: &CardId) -> Result<(), StoreError> {
        let filter = eq(id.as_str());
        let request = self
            .write_request(Method::DELETE, CARDS)
            .query(&[("id", filter.as_str())]);
        let rows = self.fetch_rows::<CardRow, Card>(request).await?;
        single_row(rows, CARDS, id.as_str()).map(|_| ())
    }
}

impl AttemptStore for PostgrestStore {
    async fn select_attempts(&self) -> Result<Vec<Attempt>, StoreError> {
        let request = self
            .request(Method::GET, ATTEMPTS)
            .query(&[("select", "*"), ("order", "created_at.asc")]);
        self.fetch_rows::<AttemptRow, Attempt>(request).await
    }

    async fn insert_attempt(&self, attempt: &Attempt) -> Result<Attempt, StoreError> {
        let body = [NewAttemptBody {
            card_id: attempt.card_id().as_str(),
            is_correct: attempt.is_correct(),
        }];
        let request = self.write_request(Method::POST, ATTEMPTS).json(&body);
        let rows = self.fetch_rows::<AttemptRow, Attempt>(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::unavailable("Insert returned no row"))
    }
}
