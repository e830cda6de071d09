//! Test utilities shared by the lookup integration tests

use async_trait::async_trait;
use entity_lookup::{
    BackendError, EntityLookup, LookupConfig, SearchBackend, SearchRequest, SearchResponse,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// What the scripted backend does for one call
#[allow(dead_code)]
pub enum Step {
    Respond(SearchResponse),
    RespondAfter(Duration, SearchResponse),
    Fail(BackendError),
    /// Never answers
    Hang,
}

/// Backend that replays a fixed script and records every request
#[derive(Default)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<SearchRequest>>,
}

#[allow(dead_code)]
impl ScriptedBackend {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(steps.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, BackendError> {
        self.requests.lock().push(request);
        let step = self.script.lock().pop_front();
        match step {
            None => Ok(SearchResponse::ok(Value::Null)),
            Some(Step::Respond(response)) => Ok(response),
            Some(Step::RespondAfter(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            Some(Step::Fail(err)) => Err(err),
            Some(Step::Hang) => std::future::pending().await,
        }
    }
}

/// Lookup with default settings over `backend`
#[allow(dead_code)]
pub fn lookup_with(backend: &Arc<ScriptedBackend>) -> EntityLookup {
    let config = LookupConfig::builder()
        .component_name("abnLookup")
        .build()
        .expect("default config is valid");
    lookup_with_config(config, backend)
}

#[allow(dead_code)]
pub fn lookup_with_config(config: LookupConfig, backend: &Arc<ScriptedBackend>) -> EntityLookup {
    let backend: Arc<dyn SearchBackend> = backend.clone();
    EntityLookup::with_backend(config, backend)
}

/// Register record shaped like the business register response
#[allow(dead_code)]
pub fn register_record(abn: &str, name: &str) -> Value {
    json!({
        "abn": {"identifier_value": abn},
        "other_trading_name": {"organisation_name": name},
        "entity_status": {"entity_status_code": "Active", "effective_from": "2000-07-01"},
        "entity_type": {"entity_description": "Australian Private Company"},
        "goods_and_services_tax": {"effective_from": "0001-01-01"},
        "main_business_location": "NSW 2000"
    })
}

/// `n` distinct register records
#[allow(dead_code)]
pub fn register_records(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| register_record(&format!("{:011}", 51_824_753_000_u64 + i as u64), &format!("Entity {i}")))
            .collect(),
    )
}
