use async_trait::async_trait;
use imagen_proxy::{
    Error, Result,
    imagen::{ImageClient, PredictResponse},
};
use serde_json::Value;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Mock image client replaying one upstream body for every call
#[derive(Debug, Clone)]
pub struct MockImageClient {
    pub body: Value,
    pub calls: Arc<AtomicUsize>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageClient {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            calls: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageClient for MockImageClient {
    async fn predict(&self, prompt: &str) -> Result<PredictResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(PredictResponse::from_value(self.body.clone()))
    }
}

/// Mock image client whose every call fails as if the upstream sent HTML
#[derive(Debug, Default)]
pub struct FailingImageClient;

#[async_trait]
impl ImageClient for FailingImageClient {
    async fn predict(&self, _prompt: &str) -> Result<PredictResponse> {
        let parse_err = serde_json::from_str::<Value>("<html>Bad Gateway</html>").unwrap_err();
        Err(Error::Serialization(parse_err))
    }
}
