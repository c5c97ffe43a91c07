//! Axum web framework integration demo.
//!
//! This demo shows how to attach an ability to every request with a
//! middleware and consult it from handlers:
//!
//! - no or unknown `x-user-token` header → 401
//! - `cannot` / `authorize` denial → 403
//! - missing policy or action (configuration error) → 500
//!
//! # Running
//!
//! ```bash
//! RUST_LOG=ability=debug cargo run --bin axum_middleware
//! ```
//!
//! Then test with:
//! ```bash
//! curl -H 'x-user-token: alice' http://localhost:3000/books/1
//! curl -X DELETE -H 'x-user-token: alice' http://localhost:3000/books/2
//! curl -X DELETE -H 'x-user-token: root' http://localhost:3000/books/2
//! curl -X POST -H 'x-user-token: alice' http://localhost:3000/books/1/publish
//! ```

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use ability::prelude::*;
use axum::{
    Extension, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct User {
    id: u64,
    role: &'static str,
}

#[derive(Debug, Clone, Subject)]
struct Book {
    id: u64,
    user_id: u64,
    title: &'static str,
}

fn book_policy() -> Policy<User> {
    Policy::<User>::builder::<Book>()
        .before(|user, _action| (user.role == "ADMIN").then_some(true))
        .action("view", |_, _| true)
        .instance_action("delete", |user, book| user.id == book.user_id)
        .build()
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    factory: AbilityFactory<User>,
    users: Arc<HashMap<&'static str, User>>,
    books: Arc<Vec<Book>>,
}

/// The ability attached to each authenticated request
type RequestAbility = Extension<Arc<Ability<User>>>;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let factory = AbilityFactory::builder()
        .register_subject::<Book>(book_policy)
        .config(FactoryConfig::strict())
        .build()?;
    factory.validate(&[("Book", &["view", "delete"])])?;

    let users = HashMap::from([
        ("alice", User { id: 1, role: "AUTHOR" }),
        ("root", User { id: 2, role: "ADMIN" }),
    ]);
    let books = vec![
        Book { id: 1, user_id: 1, title: "Alice's Notes" },
        Book { id: 2, user_id: 3, title: "Someone Else's Book" },
    ];

    let state = AppState { factory, users: Arc::new(users), books: Arc::new(books) };

    let app = Router::new()
        .route("/books/{id}", get(view_book).delete(delete_book))
        .route("/books/{id}/publish", post(publish_book))
        .route_layer(middleware::from_fn_with_state(state.clone(), attach_ability))
        .route("/health", get(health_check))
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Resolves the user from the request and attaches their ability
async fn attach_ability(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> std::result::Result<Response, AppError> {
    // In a real app, verify a session cookie or JWT here
    let user = request
        .headers()
        .get("x-user-token")
        .and_then(|value| value.to_str().ok())
        .and_then(|token| state.users.get(token))
        .cloned()
        .ok_or(AppError::Unauthenticated)?;

    let ability = state.factory.create(user)?;
    request.extensions_mut().insert(Arc::new(ability));

    Ok(next.run(request).await)
}

/// View a book - requires "view"
async fn view_book(
    State(state): State<AppState>,
    Extension(ability): RequestAbility,
    Path(id): Path<u64>,
) -> std::result::Result<impl IntoResponse, AppError> {
    let book = find_book(&state, id)?;

    if ability.cannot("view", book)? {
        return Err(AppError::Forbidden(format!("cannot view book {id}")));
    }

    Ok(format!("{}: {}", book.id, book.title))
}

/// Delete a book - requires "delete" on the instance
async fn delete_book(
    State(state): State<AppState>,
    Extension(ability): RequestAbility,
    Path(id): Path<u64>,
) -> std::result::Result<impl IntoResponse, AppError> {
    let book = find_book(&state, id)?;

    // authorize() converts a denial into a Forbidden error
    ability.authorize("delete", book)?;

    Ok(format!("Deleted book {id} for user {}", ability.user().id))
}

/// Publish is not defined by the book policy, so this always returns 500
async fn publish_book(
    State(state): State<AppState>,
    Extension(ability): RequestAbility,
    Path(id): Path<u64>,
) -> std::result::Result<impl IntoResponse, AppError> {
    let book = find_book(&state, id)?;
    ability.authorize("publish", book)?;
    Ok(format!("Published book {id}"))
}

/// Health check endpoint (no authorization required)
async fn health_check() -> impl IntoResponse {
    "OK"
}

fn find_book(state: &AppState, id: u64) -> std::result::Result<&Book, AppError> {
    state.books.iter().find(|book| book.id == id).ok_or(AppError::NotFound)
}

// ─────────────────────────────────────────────────────────────────────────────
// Error Handling
// ─────────────────────────────────────────────────────────────────────────────

/// Application error type that converts ability outcomes to HTTP responses
enum AppError {
    /// No user could be resolved
    Unauthenticated,
    /// Unknown book
    NotFound,
    /// Denied by a `cannot` check
    Forbidden(String),
    /// Denial from `authorize` or a configuration error
    Ability(Error),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::Ability(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated").into_response(),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, message).into_response(),
            AppError::Ability(err) => {
                let status = StatusCode::from_u16(err.kind().http_status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

                // Never leak configuration details to the client
                let message =
                    if err.is_configuration_error() { "internal error".to_string() } else { err.to_string() };

                (status, message).into_response()
            }
        }
    }
}
