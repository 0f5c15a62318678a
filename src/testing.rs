use std::{
	collections::VecDeque,
	sync::{Arc, Mutex},
};

use crate::{Config, Requester, transport::Transport};

const OK: &str = r#"{"response":{"success":"true"}}"#;

#[derive(Debug, thiserror::Error)]
#[error("stub transport failure")]
pub struct StubError;

#[derive(Debug, Default)]
struct State {
	replies: VecDeque<String>,
	fail: bool,
	urls: Vec<String>,
}

/// Records every URL and replays canned bodies. The last body repeats.
#[derive(Debug, Clone, Default)]
pub struct StubTransport {
	state: Arc<Mutex<State>>,
}

impl StubTransport {
	pub fn replying(body: &str) -> Self {
		Self::default().then(body)
	}

	pub fn failing() -> Self {
		let stub = Self::default();
		stub.state.lock().unwrap().fail = true;
		stub
	}

	pub fn then(self, body: &str) -> Self {
		self.state.lock().unwrap().replies.push_back(body.to_owned());
		self
	}

	pub fn urls(&self) -> Vec<String> {
		self.state.lock().unwrap().urls.clone()
	}

	pub fn calls(&self) -> usize {
		self.state.lock().unwrap().urls.len()
	}

	/// The query parameters of the last request, in order.
	pub fn last_query(&self) -> Vec<(String, String)> {
		let urls = self.urls();
		let last = urls.last().expect("no request was sent");
		let url = url::Url::parse(last).unwrap();

		url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
	}

	/// The path of the last request.
	pub fn last_path(&self) -> String {
		let urls = self.urls();
		url::Url::parse(urls.last().expect("no request was sent")).unwrap().path().to_owned()
	}

	pub fn last_param(&self, key: &str) -> Option<String> {
		self.last_query().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
	}
}

impl Transport for StubTransport {
	type Error = StubError;

	async fn post(&self, url: &str) -> Result<Vec<u8>, StubError> {
		let mut state = self.state.lock().unwrap();
		state.urls.push(url.to_owned());

		if state.fail {
			return Err(StubError);
		}

		let body = if state.replies.len() > 1 {
			state.replies.pop_front()
		} else {
			state.replies.front().cloned()
		};

		Ok(body.unwrap_or_else(|| OK.to_owned()).into_bytes())
	}
}

pub fn requester(config: Config, transport: &StubTransport) -> Requester<StubTransport> {
	Requester::new(config, transport.clone()).unwrap()
}
