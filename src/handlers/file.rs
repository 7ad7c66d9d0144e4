use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};

use crate::db::FileStore;
use crate::errors::AppError;
use crate::views::Views;

/// Index page: every stored file, newest first.
pub async fn list_files(
    store: web::Data<dyn FileStore>,
    views: web::Data<Views>,
) -> Result<HttpResponse, AppError> {
    let files = store.list().await?;
    let html = views.index(&files)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryFileStore;
    use crate::handlers::routes;
    use crate::handlers::upload::{UploadSettings, PERMITTED_EXTENSIONS};
    use crate::models::file::StoredFile;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use chrono::{Duration, Utc};
    use std::sync::Arc;
    use uuid::Uuid;

    fn stored(name: &str, age_minutes: i64) -> StoredFile {
        StoredFile {
            file_id: Uuid::new_v4(),
            content: b"x".to_vec(),
            name: name.to_string(),
            note: None,
            size: 1,
            uploaded_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[actix_web::test]
    async fn index_lists_newest_first() {
        let store = Arc::new(MemoryFileStore::new());
        store.add(&stored("older.txt", 10)).await.unwrap();
        store.add(&stored("newer.txt", 1)).await.unwrap();

        let dyn_store: Arc<dyn FileStore> = store;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(dyn_store))
                .app_data(web::Data::new(Views::new(PERMITTED_EXTENSIONS, 1000).unwrap()))
                .app_data(web::Data::new(UploadSettings { file_size_limit: 1000 }))
                .configure(routes),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        let newer = html.find("newer.txt").unwrap();
        let older = html.find("older.txt").unwrap();
        assert!(newer < older);
    }

    #[actix_web::test]
    async fn listing_failures_surface_as_server_errors() {
        struct BrokenStore;

        #[async_trait::async_trait]
        impl FileStore for BrokenStore {
            async fn add(&self, _file: &StoredFile) -> Result<(), AppError> {
                Err(AppError::DatabaseError("down".to_string()))
            }

            async fn list(&self) -> Result<Vec<crate::models::file::FileSummary>, AppError> {
                Err(AppError::DatabaseError("down".to_string()))
            }
        }

        let dyn_store: Arc<dyn FileStore> = Arc::new(BrokenStore);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(dyn_store))
                .app_data(web::Data::new(Views::new(PERMITTED_EXTENSIONS, 1000).unwrap()))
                .configure(routes),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
