//! In-memory redirect source.

use async_trait::async_trait;

use crate::domain::entities::{PathTable, RedirectRecord};
use crate::domain::repositories::RedirectSource;
use crate::error::AppError;

/// A fixed table compiled into the binary or built in code.
pub struct StaticRedirectSource {
    name: String,
    table: PathTable,
}

impl StaticRedirectSource {
    pub fn new(name: impl Into<String>, table: PathTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    /// The built-in redirects served after the configured source.
    pub fn builtin() -> Self {
        Self::new(
            "builtin",
            PathTable::from_records([
                RedirectRecord::new(
                    "/urlshort-godoc",
                    "https://godoc.org/github.com/gophercises/urlshort",
                ),
                RedirectRecord::new("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
            ]),
        )
    }
}

#[async_trait]
impl RedirectSource for StaticRedirectSource {
    fn describe(&self) -> String {
        format!("static table `{}`", self.name)
    }

    async fn load(&self) -> Result<PathTable, AppError> {
        Ok(self.table.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_table() {
        let table = StaticRedirectSource::builtin().load().await.unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("/urlshort-godoc"),
            Some("https://godoc.org/github.com/gophercises/urlshort")
        );
        assert_eq!(
            table.get("/yaml-godoc"),
            Some("https://godoc.org/gopkg.in/yaml.v2")
        );
    }
}
