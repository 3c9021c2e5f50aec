#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum_test::TestServer;
use redirect_chain::application::services::ChainService;
use redirect_chain::domain::chain::{ResolverNode, TerminalResponder};
use redirect_chain::domain::entities::{PathTable, RedirectRecord};
use redirect_chain::routes::app_router;
use redirect_chain::state::AppState;

pub const GODOC_URL: &str = "https://godoc.org/github.com/gophercises/urlshort";

pub const SEEDS_JSON: &str = r#"[
    {"path": "/go", "url": "https://go.dev"},
    {"path": "/rust", "url": "https://rust-lang.org"}
]"#;

pub const SEEDS_YAML: &str = "- path: /go
  url: https://go.dev
- path: /rust
  url: https://rust-lang.org
";

pub fn table(pairs: &[(&str, &str)]) -> PathTable {
    PathTable::from_records(pairs.iter().map(|(p, u)| RedirectRecord::new(*p, *u)))
}

pub fn create_test_state(tables: Vec<PathTable>, default_path: &str) -> AppState {
    let chain = ResolverNode::build(tables, TerminalResponder::default());
    AppState::new(Arc::new(ChainService::new(chain, default_path)))
}

pub fn create_test_server(tables: Vec<PathTable>) -> TestServer {
    TestServer::new(app_router(create_test_state(tables, "/"))).unwrap()
}

pub fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}
