#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use short_now::domain::entities::{NewUrlRecord, UrlPatch, UrlRecord};
use short_now::domain::filter::{Filter, FindOptions};
use short_now::domain::repositories::UrlRepository;
use short_now::error::AppError;
use axum::ServiceExt;
use axum::extract::Request;
use short_now::routes::{app_router, router};
use short_now::state::AppState;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

pub const ERROR_PAGE: &str = "/error";

/// `UrlRepository` over a vector, in insertion order.
#[derive(Default)]
pub struct MemoryUrlRepository {
    records: Mutex<Vec<UrlRecord>>,
    next_id: AtomicI64,
    offline: AtomicBool,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail with a storage error.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub async fn seed(&self, long_url: &str, short_url: &str) -> UrlRecord {
        self.insert_one(NewUrlRecord {
            long_url: long_url.to_string(),
            short_url: short_url.to_string(),
        })
        .await
        .unwrap()
    }

    pub async fn snapshot(&self) -> Vec<UrlRecord> {
        self.records.lock().unwrap().clone()
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::storage_failure("Database error", json!({})));
        }
        Ok(())
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn find(
        &self,
        filter: &Filter,
        options: FindOptions,
    ) -> Result<Vec<UrlRecord>, AppError> {
        self.check_online()?;

        let records = self.records.lock().unwrap();
        let skip = options.skip.unwrap_or(0) as usize;
        let limit = options.limit.map_or(usize::MAX, |l| l as usize);

        Ok(records
            .iter()
            .filter(|r| filter.matches(r))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert_one(&self, record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        self.check_online()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        let record = UrlRecord::new(id, record.long_url, record.short_url);
        self.records.lock().unwrap().push(record.clone());

        Ok(record)
    }

    async fn update_one(
        &self,
        filter: &Filter,
        patch: UrlPatch,
    ) -> Result<Option<UrlRecord>, AppError> {
        self.check_online()?;

        let mut records = self.records.lock().unwrap();
        let Some(record) = records.iter_mut().find(|r| filter.matches(r)) else {
            return Ok(None);
        };

        if let Some(long_url) = patch.long_url {
            record.long_url = long_url;
        }

        Ok(Some(record.clone()))
    }

    async fn delete_one(&self, filter: &Filter) -> Result<u64, AppError> {
        self.check_online()?;

        let mut records = self.records.lock().unwrap();
        match records.iter().position(|r| filter.matches(r)) {
            Some(index) => {
                records.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_online()
    }
}

pub fn create_test_state(repository: Arc<MemoryUrlRepository>) -> AppState {
    AppState::new(repository, true, 100, ERROR_PAGE)
}

/// Full router over a fresh in-memory store.
pub fn test_server() -> (TestServer, Arc<MemoryUrlRepository>) {
    let repository = Arc::new(MemoryUrlRepository::new());
    let server = TestServer::new(router(create_test_state(repository.clone()))).unwrap();
    (server, repository)
}

/// The router as served in production, with path normalization.
pub fn app_server() -> (TestServer, Arc<MemoryUrlRepository>) {
    let repository = Arc::new(MemoryUrlRepository::new());
    let app = app_router(create_test_state(repository.clone()));
    let server = TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap();
    (server, repository)
}
