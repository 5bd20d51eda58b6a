// Category service

use eventhub_core::validation::check_category;
use eventhub_core::{Category, Result};
use std::sync::Arc;

use crate::api::categories::CreateCategoryRequest;
use crate::storage::{CategoryRow, CreateCategoryRow, StorageBackend};

pub struct CategoryService {
    db: Arc<StorageBackend>,
}

impl CategoryService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// All categories in creation order
    pub async fn list(&self) -> Result<Vec<Category>> {
        let rows = self.db.list_categories().await?;
        Ok(rows.into_iter().map(row_to_category).collect())
    }

    #[tracing::instrument(skip(self, req), fields(category.name = %req.name))]
    pub async fn create(&self, req: CreateCategoryRequest) -> Result<Category> {
        let name = req.name.trim().to_string();
        let description = req.description.trim().to_string();
        check_category(&name, &description).into_result()?;

        let row = self
            .db
            .create_category(CreateCategoryRow { name, description })
            .await?;

        tracing::info!(category_id = %row.id, "Category created");
        Ok(row_to_category(row))
    }
}

pub(crate) fn row_to_category(row: CategoryRow) -> Category {
    Category {
        id: row.id,
        name: row.name,
        description: row.description,
        created_at: row.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventhub_core::EventsError;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(StorageBackend::in_memory()))
    }

    fn request(name: &str, description: &str) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let service = service();

        let created = service.create(request("Music", "Live shows")).await.unwrap();

        let categories = service.list().await.unwrap();
        assert_eq!(categories, vec![created]);
        assert_eq!(categories[0].name, "Music");
        assert_eq!(categories[0].description, "Live shows");
    }

    #[tokio::test]
    async fn test_create_trims_input() {
        let service = service();
        let created = service.create(request("  Music ", " Live shows\n")).await.unwrap();
        assert_eq!(created.name, "Music");
        assert_eq!(created.description, "Live shows");
    }

    #[tokio::test]
    async fn test_size_limit_applies_to_trimmed_input() {
        use eventhub_core::validation::MAX_NAME_BYTES;

        let service = service();
        let name = "a".repeat(MAX_NAME_BYTES);

        let created = service
            .create(request(&format!("{name}{}", " ".repeat(100)), "Live shows"))
            .await
            .unwrap();
        assert_eq!(created.name.len(), MAX_NAME_BYTES);

        let err = service
            .create(request(&format!("{name}a"), "Live shows"))
            .await
            .unwrap_err();
        assert!(matches!(err, EventsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_invalid_category_is_not_persisted() {
        let service = service();

        let err = service.create(request("Music", "")).await.unwrap_err();
        match err {
            EventsError::Validation(errors) => {
                assert_eq!(errors.fields().len(), 1);
                assert_eq!(errors.fields()[0].field, "description");
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(service.list().await.unwrap().is_empty());
    }
}
