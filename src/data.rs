use serde::{Deserialize, Deserializer, Serialize};
use time::{format_description::well_known::Iso8601, macros::format_description, PrimitiveDateTime};

/// How many completed uses and utilities the dashboard lists at once.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserColor {
	Red,
	Blue,
	Green,
	Yellow,
	Orange,
	Purple,
	Pink,
	Cyan,
}

impl UserColor {
	pub const ALL: [Self; 8] = [
		Self::Red,
		Self::Blue,
		Self::Green,
		Self::Yellow,
		Self::Orange,
		Self::Purple,
		Self::Pink,
		Self::Cyan,
	];

	pub fn id(&self) -> &'static str {
		match self {
			Self::Red => "red",
			Self::Blue => "blue",
			Self::Green => "green",
			Self::Yellow => "yellow",
			Self::Orange => "orange",
			Self::Purple => "purple",
			Self::Pink => "pink",
			Self::Cyan => "cyan",
		}
	}

	pub fn from_id(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|color| color.id() == value)
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Red => "RED",
			Self::Blue => "BLUE",
			Self::Green => "GREEN",
			Self::Yellow => "YELLOW",
			Self::Orange => "ORANGE",
			Self::Purple => "PURPLE",
			Self::Pink => "PINK",
			Self::Cyan => "CYAN",
		}
	}

	pub fn hex(&self) -> &'static str {
		match self {
			Self::Red => "#ef4444",
			Self::Blue => "#3b82f6",
			Self::Green => "#22c55e",
			Self::Yellow => "#facc15",
			Self::Orange => "#f97316",
			Self::Purple => "#a855f7",
			Self::Pink => "#ec4899",
			Self::Cyan => "#06b6d4",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
	Emergency,
	Work,
	Health,
}

impl Priority {
	// Select-menu order; the server owns queue ordering.
	pub const ALL: [Self; 3] = [Self::Work, Self::Health, Self::Emergency];

	pub fn id(&self) -> &'static str {
		match self {
			Self::Emergency => "emergency",
			Self::Work => "work",
			Self::Health => "health",
		}
	}

	pub fn from_id(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|priority| priority.id() == value)
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Emergency => "🚨 EMERGENCY",
			Self::Work => "💼 WORK",
			Self::Health => "🏥 HEALTH",
		}
	}

	pub fn tag_class(&self) -> &'static str {
		match self {
			Self::Emergency => "is-danger",
			Self::Work => "is-link",
			Self::Health => "is-success",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
	pub id: String,
	pub name: String,
	pub color: UserColor,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueueEntry {
	pub id: String,
	pub user_id: String,
	pub user_name: String,
	pub user_color: UserColor,
	pub priority: Priority,
	pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Occupant {
	pub id: String,
	pub user_name: String,
	pub user_color: UserColor,
	pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompletedEntry {
	pub id: String,
	pub user_name: String,
	pub user_color: UserColor,
	#[serde(deserialize_with = "naive_utc")]
	pub completed_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Utility {
	pub id: String,
	pub name: String,
	pub last_bought_by_name: String,
	#[serde(deserialize_with = "naive_utc")]
	pub last_bought_date: PrimitiveDateTime,
	pub next_buyer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HygieneRating {
	pub rated_by_name: String,
	pub rating: u8,
	pub comment: Option<String>,
	#[serde(deserialize_with = "naive_utc")]
	pub created_at: PrimitiveDateTime,
}

// The backend serializes timestamps without a UTC offset.
fn naive_utc<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let text = String::deserialize(deserializer)?;
	PrimitiveDateTime::parse(&text, &Iso8601::DEFAULT).map_err(serde::de::Error::custom)
}

pub fn clock_time(moment: &PrimitiveDateTime) -> String {
	moment
		.format(format_description!("[hour]:[minute]:[second]"))
		.unwrap_or_default()
}

pub fn calendar_date(moment: &PrimitiveDateTime) -> String {
	moment
		.format(format_description!("[year]-[month]-[day]"))
		.unwrap_or_default()
}

pub fn date_and_time(moment: &PrimitiveDateTime) -> String {
	moment
		.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
		.unwrap_or_default()
}

/// Everything the dashboard renders from, replaced wholesale per refresh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
	pub users: Vec<User>,
	pub queue: Vec<QueueEntry>,
	pub occupant: Option<Occupant>,
	pub completed: Vec<CompletedEntry>,
	pub utilities: Vec<Utility>,
	pub ratings: Vec<HygieneRating>,
}

impl Snapshot {
	/// The "Start Using" control only exists for the head of the queue,
	/// and only while the bathroom is free.
	pub fn can_start(&self, position: usize) -> bool {
		position == 0 && self.occupant.is_none()
	}

	pub fn recent_completed(&self) -> &[CompletedEntry] {
		&self.completed[..self.completed.len().min(RECENT_LIMIT)]
	}

	pub fn recent_utilities(&self) -> &[Utility] {
		&self.utilities[..self.utilities.len().min(RECENT_LIMIT)]
	}

	/// Ratings arrive newest-first; only the newest is shown.
	pub fn latest_rating(&self) -> Option<&HygieneRating> {
		self.ratings.first()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use time::macros::datetime;

	#[test]
	fn color_mappings_are_total() {
		for color in UserColor::ALL {
			assert!(color.hex().starts_with('#'), "{color:?} has no swatch");
			assert!(!color.label().is_empty(), "{color:?} has no label");
			assert_eq!(UserColor::from_id(color.id()), Some(color));
		}
		assert_eq!(UserColor::from_id("mauve"), None);
	}

	#[test]
	fn priority_mappings_are_total() {
		for priority in Priority::ALL {
			assert!(!priority.label().is_empty(), "{priority:?} has no label");
			assert!(priority.tag_class().starts_with("is-"), "{priority:?} has no tag class");
			assert_eq!(Priority::from_id(priority.id()), Some(priority));
		}
		assert_eq!(Priority::from_id("urgent"), None);
	}

	#[test]
	fn colors_and_priorities_use_wire_ids() {
		let value = serde_json::to_value(UserColor::Cyan).unwrap();
		assert_eq!(value, json!("cyan"));
		let value = serde_json::to_value(Priority::Emergency).unwrap();
		assert_eq!(value, json!("emergency"));
		let color: UserColor = serde_json::from_value(json!("yellow")).unwrap();
		assert_eq!(color, UserColor::Yellow);
	}

	#[test]
	fn queue_entry_parses_server_shape() {
		let entry: QueueEntry = serde_json::from_value(json!({
			"id": "ca54b7cb-1111-4a44-b969-20e18c9ad1a1",
			"user_id": "7f9d33cd-2222-4d55-a1cd-57e914f17a0b",
			"user_name": "Alex",
			"user_color": "blue",
			"priority": "work",
			"status": "waiting",
			"reason": "quick",
			"created_at": "2025-08-06T09:15:00.123456",
			"started_at": null,
			"completed_at": null
		}))
		.unwrap();
		assert_eq!(entry.user_name, "Alex");
		assert_eq!(entry.user_color, UserColor::Blue);
		assert_eq!(entry.priority, Priority::Work);
		assert_eq!(entry.reason.as_deref(), Some("quick"));
	}

	#[test]
	fn absent_occupant_is_none() {
		let occupant: Option<Occupant> = serde_json::from_str("null").unwrap();
		assert_eq!(occupant, None);
	}

	#[test]
	fn naive_timestamps_parse_and_format() {
		let entry: CompletedEntry = serde_json::from_value(json!({
			"id": "1",
			"user_name": "Alex",
			"user_color": "blue",
			"completed_at": "2025-08-06T14:03:09.500000"
		}))
		.unwrap();
		assert_eq!(entry.completed_at, datetime!(2025-08-06 14:03:09.5));
		assert_eq!(clock_time(&entry.completed_at), "14:03:09");
		assert_eq!(calendar_date(&entry.completed_at), "2025-08-06");
		assert_eq!(date_and_time(&entry.completed_at), "2025-08-06 14:03");
	}

	#[test]
	fn rating_comment_is_optional() {
		let rating: HygieneRating = serde_json::from_value(json!({
			"id": "1",
			"rated_by_user_id": "2",
			"rated_by_name": "Sam",
			"rating": 4,
			"comment": null,
			"created_at": "2025-08-06T08:00:00"
		}))
		.unwrap();
		assert_eq!(rating.rating, 4);
		assert_eq!(rating.comment, None);
	}

	fn completed_entry(id: usize) -> CompletedEntry {
		CompletedEntry {
			id: id.to_string(),
			user_name: format!("user-{id}"),
			user_color: UserColor::Red,
			completed_at: datetime!(2025-08-06 12:00:00),
		}
	}

	#[test]
	fn completed_history_caps_at_five() {
		let mut snapshot = Snapshot::default();
		snapshot.completed = (0..8).map(completed_entry).collect();
		assert_eq!(snapshot.recent_completed().len(), RECENT_LIMIT);
		assert_eq!(snapshot.recent_completed()[0].id, "0");

		snapshot.completed.truncate(3);
		assert_eq!(snapshot.recent_completed().len(), 3);
	}

	#[test]
	fn start_control_needs_head_position_and_free_bathroom() {
		let mut snapshot = Snapshot::default();
		assert!(snapshot.can_start(0));
		assert!(!snapshot.can_start(1));

		snapshot.occupant = Some(Occupant {
			id: "1".into(),
			user_name: "Alex".into(),
			user_color: UserColor::Blue,
			priority: Priority::Work,
		});
		assert!(!snapshot.can_start(0));
	}

	#[test]
	fn latest_rating_is_the_first_listed() {
		let mut snapshot = Snapshot::default();
		assert!(snapshot.latest_rating().is_none());
		snapshot.ratings = vec![
			HygieneRating {
				rated_by_name: "Sam".into(),
				rating: 5,
				comment: Some("spotless".into()),
				created_at: datetime!(2025-08-06 10:00:00),
			},
			HygieneRating {
				rated_by_name: "Alex".into(),
				rating: 2,
				comment: None,
				created_at: datetime!(2025-08-05 10:00:00),
			},
		];
		assert_eq!(snapshot.latest_rating().unwrap().rated_by_name, "Sam");
	}
}
