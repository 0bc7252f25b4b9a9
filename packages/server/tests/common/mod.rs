//! Shared helpers for the integration tests: in-memory fake gateways, an
//! in-process server on an ephemeral port, and a WebSocket test client.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tsunagi_server::{
    domain::{
        AuthGateway, AuthGrant, AuthToken, ChatDraft, ChatRecord, ChatStoreGateway,
        ConnectionStoreGateway, Contact, Credentials, DisplayName, GatewayError, Gateways,
        GeoPoint, Hazard, HazardReport, Identity, PersistedMessage, PointOfInterest,
        PointsOfInterestGateway, RoadConditionGateway, UserId,
    },
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemorySessionRegistry},
    ui::{AppState, Server},
};
use tsunagi_shared::time::FixedClock;

pub const PASSWORD: &str = "password";
pub const NOW: i64 = 1_700_000_000_000;
const EVENT_TIMEOUT: Duration = Duration::from_secs(2);

fn user_id(id: &str) -> UserId {
    UserId::new(id.to_string()).unwrap()
}

fn display_name(name: &str) -> DisplayName {
    DisplayName::new(name.to_string()).unwrap()
}

// ========================================
// Fake gateways
// ========================================

/// `<name>@example.com` / `password` for every known user
pub struct FakeAuth {
    users: HashMap<String, (String, String)>,
}

#[async_trait]
impl AuthGateway for FakeAuth {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, GatewayError> {
        match self.users.get(&credentials.email) {
            Some((id, name)) if credentials.password == PASSWORD => Ok(AuthGrant {
                identity: Identity::new(user_id(id), display_name(name)),
                token: AuthToken::new(format!("token-{id}")).unwrap(),
            }),
            _ => Err(GatewayError::AuthenticationFailed),
        }
    }
}

pub struct FakeConnectionStore {
    contacts: HashMap<String, Vec<(String, String)>>,
}

#[async_trait]
impl ConnectionStoreGateway for FakeConnectionStore {
    async fn list_connections(
        &self,
        user_id: &UserId,
        _token: &AuthToken,
    ) -> Result<Vec<Contact>, GatewayError> {
        Ok(self
            .contacts
            .get(user_id.as_str())
            .into_iter()
            .flatten()
            .map(|(id, name)| Contact {
                user_id: self::user_id(id),
                display_name: display_name(name),
            })
            .collect())
    }
}

/// Chat store keeping every message in memory
#[derive(Default)]
pub struct FakeChatStore {
    chats: Mutex<Vec<Value>>,
}

impl FakeChatStore {
    pub fn stored(&self) -> Vec<Value> {
        self.chats.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatStoreGateway for FakeChatStore {
    async fn create_message(
        &self,
        sender: &UserId,
        recipient: &UserId,
        draft: &ChatDraft,
        _token: &AuthToken,
    ) -> Result<PersistedMessage, GatewayError> {
        let chat = json!({
            "sender": sender.as_str(),
            "recipient": recipient.as_str(),
            "content": draft.text.as_str(),
            "messageType": draft.kind.as_str(),
        });
        self.chats.lock().unwrap().push(chat.clone());
        Ok(PersistedMessage {
            record: ChatRecord(chat),
            related_points_of_interest: Vec::new(),
        })
    }

    async fn list_messages(
        &self,
        a: &UserId,
        b: &UserId,
        _token: &AuthToken,
    ) -> Result<Vec<ChatRecord>, GatewayError> {
        let pair = |chat: &Value| {
            let (sender, recipient) = (&chat["sender"], &chat["recipient"]);
            (sender == a.as_str() && recipient == b.as_str())
                || (sender == b.as_str() && recipient == a.as_str())
        };
        Ok(self
            .chats
            .lock()
            .unwrap()
            .iter()
            .filter(|chat| pair(chat))
            .cloned()
            .map(ChatRecord)
            .collect())
    }
}

/// `None` simulates an unreachable service
pub struct FakePointsOfInterest {
    spots: Option<Vec<PointOfInterest>>,
}

#[async_trait]
impl PointsOfInterestGateway for FakePointsOfInterest {
    async fn nearby(
        &self,
        _point: GeoPoint,
        _token: &AuthToken,
    ) -> Result<Vec<PointOfInterest>, GatewayError> {
        self.spots
            .clone()
            .ok_or_else(|| GatewayError::Unavailable("connection refused".to_string()))
    }
}

#[derive(Default)]
pub struct FakeRoadCondition {
    hazards: Mutex<Vec<Value>>,
}

#[async_trait]
impl RoadConditionGateway for FakeRoadCondition {
    async fn report(
        &self,
        report: &HazardReport,
        _token: &AuthToken,
    ) -> Result<Hazard, GatewayError> {
        let hazard = json!({
            "type": report.kind,
            "description": report.description,
            "location": report.location,
        });
        self.hazards.lock().unwrap().push(hazard.clone());
        Ok(Hazard(hazard))
    }

    async fn list(&self, _token: &AuthToken) -> Result<Vec<Hazard>, GatewayError> {
        Ok(self
            .hazards
            .lock()
            .unwrap()
            .iter()
            .cloned()
            .map(Hazard)
            .collect())
    }
}

// ========================================
// Test server
// ========================================

/// Users: alice(1) <-> bob(2), carol(3) <-> dave(4), eve(5) without contacts
pub struct TestServer {
    addr: std::net::SocketAddr,
    pub chat_store: Arc<FakeChatStore>,
}

impl TestServer {
    /// Start a server whose points-of-interest lookup returns `spots`
    /// (`None` makes the lookup fail).
    pub async fn start(spots: Option<Vec<PointOfInterest>>) -> Self {
        let users = [("1", "alice"), ("2", "bob"), ("3", "carol"), ("4", "dave"), ("5", "eve")];
        let auth = FakeAuth {
            users: users
                .iter()
                .map(|(id, name)| {
                    (format!("{name}@example.com"), (id.to_string(), name.to_string()))
                })
                .collect(),
        };
        let pairs = [("1", "2", "bob"), ("2", "1", "alice"), ("3", "4", "dave"), ("4", "3", "carol")];
        let connection_store = FakeConnectionStore {
            contacts: pairs
                .iter()
                .map(|(me, peer, name)| (me.to_string(), vec![(peer.to_string(), name.to_string())]))
                .collect(),
        };
        let chat_store = Arc::new(FakeChatStore::default());

        let gateways = Gateways {
            auth: Arc::new(auth),
            connection_store: Arc::new(connection_store),
            chat_store: chat_store.clone(),
            points_of_interest: Arc::new(FakePointsOfInterest { spots }),
            road_condition: Arc::new(FakeRoadCondition::default()),
        };
        let state = AppState::new(
            Arc::new(InMemorySessionRegistry::new()),
            Arc::new(WebSocketMessagePusher::new()),
            gateways,
            Arc::new(FixedClock::new(NOW)),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(Server::new(state).serve(listener, std::future::pending()));

        Self { addr, chat_store }
    }

    /// Get the WebSocket URL for this server
    pub fn url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn connect(&self) -> TestClient {
        TestClient::connect(&self.url()).await
    }

    /// `/api/sessions` snapshot
    pub async fn sessions(&self) -> Vec<Value> {
        reqwest::get(format!("http://{}/api/sessions", self.addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    /// Poll `/api/sessions` until it holds `count` sessions.
    pub async fn wait_for_session_count(&self, count: usize) -> Vec<Value> {
        let deadline = tokio::time::Instant::now() + EVENT_TIMEOUT;
        loop {
            let sessions = self.sessions().await;
            if sessions.len() == count || tokio::time::Instant::now() > deadline {
                return sessions;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

// ========================================
// Test client
// ========================================

pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(url: &str) -> Self {
        let (stream, _) = connect_async(url).await.expect("Failed to connect");
        Self { stream }
    }

    pub async fn send(&mut self, event: &str, payload: Value) {
        let frame = json!({"event": event, "payload": payload}).to_string();
        self.stream.send(Message::text(frame)).await.unwrap();
    }

    /// Next server event, failing the test after a timeout
    pub async fn next_event(&mut self) -> Value {
        loop {
            let message = tokio::time::timeout(EVENT_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for an event")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = message {
                return serde_json::from_str(text.as_str()).unwrap();
            }
        }
    }

    /// Assert that nothing arrives within `window`
    pub async fn expect_silence(&mut self, window: Duration) {
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(window, self.stream.next()).await
        {
            panic!("Unexpected event: {}", text.as_str());
        }
    }

    /// Authenticate and consume `identity`, `connections` and, when a contact
    /// exists, the `history` of the automatically selected peer.
    pub async fn login(&mut self, name: &str) -> Vec<Value> {
        self.send(
            "authenticate",
            json!({"email": format!("{name}@example.com"), "password": PASSWORD}),
        )
        .await;

        let identity = self.next_event().await;
        assert_eq!(identity["event"], "identity", "login of {name} failed");
        let connections = self.next_event().await;
        assert_eq!(connections["event"], "connections");
        let has_contacts = connections["payload"]
            .as_array()
            .is_some_and(|contacts| !contacts.is_empty());

        let mut events = vec![identity, connections];
        if has_contacts {
            let history = self.next_event().await;
            assert_eq!(history["event"], "history");
            events.push(history);
        }
        events
    }

    pub async fn close(mut self) {
        self.stream.close(None).await.unwrap();
    }
}
