use crate::cache::CacheRegistry;
use crate::storage::StoreData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<StoreData>>,
    pub caches: Arc<CacheRegistry>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: StoreData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            caches: Arc::new(CacheRegistry::new()),
        }
    }
}
