use crate::data::{CompletedEntry, HygieneRating, Occupant, Priority, QueueEntry, Snapshot, User, UserColor, Utility};
use lazy_static::lazy_static;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

lazy_static! {
	// Base URL is baked in at build time; unset means same-origin.
	// reqwest needs absolute URLs, so same-origin resolves through
	// the window location.
	static ref API_ROOT: String = {
		let base = match option_env!("BACKEND_URL") {
			Some(url) if !url.is_empty() => url.trim_end_matches('/').to_owned(),
			_ => origin().unwrap_or_default(),
		};
		format!("{base}/api")
	};
}

#[cfg(target_family = "wasm")]
fn origin() -> Option<String> {
	web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_family = "wasm"))]
fn origin() -> Option<String> {
	None
}

fn endpoint(path: &str) -> String {
	format!("{}{path}", *API_ROOT)
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("server rejected the request: {}", .detail.as_deref().unwrap_or("no detail provided"))]
	Rejected { detail: Option<String> },
	#[error(transparent)]
	Transport(#[from] reqwest::Error),
	#[error(transparent)]
	Decode(#[from] InvalidJson),
}

impl Error {
	/// Text for the blocking alert: the server's detail when it sent one,
	/// otherwise the caller's generic message.
	pub fn user_message(&self, fallback: &str) -> String {
		match self {
			Self::Rejected { detail: Some(detail) } => detail.clone(),
			_ => fallback.to_owned(),
		}
	}
}

#[derive(thiserror::Error, Debug)]
pub struct InvalidJson(pub String, pub serde_json::Error);
impl std::fmt::Display for InvalidJson {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Invalid json: {:?}\nError: {:?}", self.0, self.1)
	}
}

pub struct Request<T> {
	builder: reqwest::RequestBuilder,
	marker: std::marker::PhantomData<T>,
}
impl<T> std::fmt::Debug for Request<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.builder.fmt(f)
	}
}
impl<T> Request<T>
where
	T: DeserializeOwned,
{
	pub fn get(path: &str) -> Self {
		Self::from(reqwest::Client::new().get(endpoint(path)))
	}

	pub fn post(path: &str) -> Self {
		Self::from(reqwest::Client::new().post(endpoint(path)))
	}

	pub fn from(builder: reqwest::RequestBuilder) -> Self {
		Self {
			builder,
			marker: Default::default(),
		}
	}

	pub fn with_json<Q>(mut self, json: &Q) -> Self
	where
		Q: Serialize + ?Sized,
	{
		self.builder = self.builder.json(json);
		self
	}

	pub async fn send(self) -> Result<T, Error> {
		let response: reqwest::Response = self.builder.send().await?;
		let status = response.status();
		let text = response.text().await?;
		if !status.is_success() {
			return Err(Error::Rejected {
				detail: extract_detail(&text),
			});
		}
		let output = match serde_json::from_str(&text) {
			Ok(data) => data,
			Err(err) => {
				return Err(InvalidJson(text, err))?;
			}
		};
		Ok(output)
	}
}

// Rejection bodies look like {"detail": "..."} when the server explains itself.
fn extract_detail(body: &str) -> Option<String> {
	#[derive(Deserialize)]
	struct Rejection {
		detail: String,
	}
	serde_json::from_str::<Rejection>(body)
		.ok()
		.map(|rejection| rejection.detail)
}

/// Body of acknowledgement-only mutations.
#[derive(Debug, Deserialize)]
pub struct Acknowledgement {
	pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUser {
	pub name: String,
	pub color: UserColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinQueue {
	pub user_id: String,
	pub priority: Priority,
	pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddUtility {
	pub name: String,
	pub last_bought_by_user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateHygiene {
	pub rated_by_user_id: String,
	pub rating: u8,
	pub comment: Option<String>,
}

pub async fn users() -> Result<Vec<User>, Error> {
	Request::get("/users").send().await
}

pub async fn create_user(payload: &CreateUser) -> Result<User, Error> {
	Request::post("/users").with_json(payload).send().await
}

pub async fn queue() -> Result<Vec<QueueEntry>, Error> {
	Request::get("/queue").send().await
}

pub async fn current_occupant() -> Result<Option<Occupant>, Error> {
	Request::get("/queue/current").send().await
}

pub async fn completed() -> Result<Vec<CompletedEntry>, Error> {
	Request::get("/queue/completed").send().await
}

pub async fn join_queue(payload: &JoinQueue) -> Result<QueueEntry, Error> {
	Request::post("/queue").with_json(payload).send().await
}

pub async fn start_entry(id: &str) -> Result<Acknowledgement, Error> {
	Request::post(&format!("/queue/{id}/start")).send().await
}

pub async fn complete_entry(id: &str) -> Result<Acknowledgement, Error> {
	Request::post(&format!("/queue/{id}/complete")).send().await
}

pub async fn emergency_alert() -> Result<Acknowledgement, Error> {
	Request::post("/emergency-alert").send().await
}

pub async fn utilities() -> Result<Vec<Utility>, Error> {
	Request::get("/utilities").send().await
}

pub async fn add_utility(payload: &AddUtility) -> Result<Utility, Error> {
	Request::post("/utilities").with_json(payload).send().await
}

pub async fn hygiene_ratings() -> Result<Vec<HygieneRating>, Error> {
	Request::get("/hygiene-rating").send().await
}

pub async fn submit_rating(payload: &RateHygiene) -> Result<HygieneRating, Error> {
	Request::post("/hygiene-rating").with_json(payload).send().await
}

/// Fetch all six collections concurrently and build the next snapshot.
/// Slices settle independently: a failed fetch keeps its stale slice.
pub async fn refresh(previous: Snapshot) -> Snapshot {
	let (users, queue, occupant, completed, utilities, ratings) = futures::join!(
		users(),
		queue(),
		current_occupant(),
		completed(),
		utilities(),
		hygiene_ratings(),
	);
	Snapshot {
		users: slice_or_stale("users", users, previous.users),
		queue: slice_or_stale("queue", queue, previous.queue),
		occupant: slice_or_stale("occupant", occupant, previous.occupant),
		completed: slice_or_stale("completed", completed, previous.completed),
		utilities: slice_or_stale("utilities", utilities, previous.utilities),
		ratings: slice_or_stale("ratings", ratings, previous.ratings),
	}
}

fn slice_or_stale<T>(name: &str, fetched: Result<T, Error>, stale: T) -> T {
	match fetched {
		Ok(fresh) => fresh,
		Err(err) => {
			log::warn!(target: "refresh", "{name} fetch failed, keeping stale data: {err}");
			stale
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn endpoints_live_under_the_api_prefix() {
		assert!(endpoint("/queue/current").ends_with("/api/queue/current"));
	}

	#[test]
	fn join_payload_matches_wire_contract() {
		let payload = JoinQueue {
			user_id: "7f9d33cd".into(),
			priority: Priority::Emergency,
			reason: None,
		};
		assert_eq!(
			serde_json::to_value(&payload).unwrap(),
			json!({"user_id": "7f9d33cd", "priority": "emergency", "reason": null})
		);
	}

	#[test]
	fn create_user_payload_matches_wire_contract() {
		let payload = CreateUser {
			name: "Alex".into(),
			color: UserColor::Blue,
		};
		assert_eq!(
			serde_json::to_value(&payload).unwrap(),
			json!({"name": "Alex", "color": "blue"})
		);
	}

	#[test]
	fn rating_payload_matches_wire_contract() {
		let payload = RateHygiene {
			rated_by_user_id: "42".into(),
			rating: 3,
			comment: Some("needs soap".into()),
		};
		assert_eq!(
			serde_json::to_value(&payload).unwrap(),
			json!({"rated_by_user_id": "42", "rating": 3, "comment": "needs soap"})
		);
	}

	#[test]
	fn rejection_detail_is_parsed_when_present() {
		assert_eq!(
			extract_detail(r#"{"detail": "Color already taken by another user"}"#),
			Some("Color already taken by another user".to_owned())
		);
		assert_eq!(extract_detail("Internal Server Error"), None);
		assert_eq!(extract_detail(r#"{"error": "nope"}"#), None);
	}

	#[test]
	fn alerts_prefer_server_detail_over_fallback() {
		let rejected = Error::Rejected {
			detail: Some("User already in queue".into()),
		};
		assert_eq!(rejected.user_message("Error joining queue"), "User already in queue");

		let bare = Error::Rejected { detail: None };
		assert_eq!(bare.user_message("Error joining queue"), "Error joining queue");

		let garbled = Error::from(InvalidJson("<html>".into(), serde_json::from_str::<()>("x").unwrap_err()));
		assert_eq!(garbled.user_message("Error joining queue"), "Error joining queue");
	}

	#[test]
	fn stale_slices_survive_failed_fetches() {
		let stale = vec!["kept".to_owned()];
		let kept = slice_or_stale("users", Err::<Vec<String>, _>(Error::Rejected { detail: None }), stale.clone());
		assert_eq!(kept, stale);

		let fresh = slice_or_stale("users", Ok(vec!["fresh".to_owned()]), stale);
		assert_eq!(fresh, vec!["fresh".to_owned()]);
	}
}
