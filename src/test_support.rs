//! Shared fixtures for unit tests: a scripted transport, a recording
//! navigator, and identity payloads.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use serde_json::json;

use crate::config::ClientConfig;
use crate::net::http::{HttpRequest, HttpResponse, Transport};
use crate::net::{ApiClient, TransportError};
use crate::routing::Navigator;
use crate::storage::{CredentialStore, MemoryStorage};

type SendHook = Box<dyn Fn(&HttpRequest)>;

/// Transport that replays queued replies and records every request.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
    on_send: RefCell<Option<SendHook>>,
    gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
}

impl MockTransport {
    pub fn reply(&self, status: u16, raw: &str) {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpResponse::from_raw(status, raw.to_owned())));
    }

    pub fn reply_json(&self, status: u16, body: &serde_json::Value) {
        self.reply(status, &body.to_string());
    }

    pub fn fail(&self, error: TransportError) {
        self.replies.borrow_mut().push_back(Err(error));
    }

    /// Run `hook` while a request is "in flight".
    pub fn on_send(&self, hook: impl Fn(&HttpRequest) + 'static) {
        *self.on_send.borrow_mut() = Some(Box::new(hook));
    }

    /// Hold the next request's reply until the returned sender fires (or is
    /// dropped).
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.gates.borrow_mut().push_back(gate);
        release
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| r.url.trim_start_matches("http://localhost:8000/api").to_owned())
            .collect()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if let Some(hook) = self.on_send.borrow().as_ref() {
            hook(&request);
        }
        self.requests.borrow_mut().push(request);
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".to_owned())));
        let gate = self.gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        reply
    }
}

/// Navigator that records every pushed path.
#[derive(Default)]
pub struct RecordingNavigator {
    pushed: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn pushed(&self) -> Vec<String> {
        self.pushed.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.pushed.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.pushed.borrow_mut().push(path.to_owned());
    }
}

pub struct Harness {
    pub storage: Rc<MemoryStorage>,
    pub credentials: CredentialStore,
    pub transport: Rc<MockTransport>,
    pub api: ApiClient,
    pub navigator: Rc<RecordingNavigator>,
}

pub fn harness() -> Harness {
    let storage = Rc::new(MemoryStorage::new());
    let credentials = CredentialStore::new(storage.clone());
    let transport = Rc::new(MockTransport::default());
    let api = ApiClient::new(ClientConfig::default(), transport.clone(), credentials.clone());
    Harness { storage, credentials, transport, api, navigator: Rc::new(RecordingNavigator::default()) }
}

pub fn user_json(role: &str) -> serde_json::Value {
    json!({
        "id": 42,
        "name": "Rina",
        "email": "rina@dlh.go.id",
        "role_id": 3,
        "role": { "id": 3, "name": role },
        "province_id": "33",
        "nomor_telepon": "0812000"
    })
}

pub fn user(role: &str) -> crate::net::types::User {
    serde_json::from_value(user_json(role)).unwrap()
}
