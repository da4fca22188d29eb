use crate::{
	api,
	components::{Crewmate, CrewmateSize, EmergencyModal, StarPicker, Stars},
	data::{calendar_date, clock_time, date_and_time, Priority, Snapshot, UserColor},
};
use ybc::{
	Button, Column, Columns, Container, Control, Field, Input, InputType, Level, LevelItem,
	LevelLeft, LevelRight, Section, Select, Subtitle, Tag, TextArea, Title,
};
use yew::prelude::*;
use yew_hooks::{use_interval, use_mount};

const REFRESH_MILLIS: u32 = 10_000;

fn alert(message: &str) {
	let Some(window) = web_sys::window() else { return };
	let _ = window.alert_with_message(message);
}

fn text_update(state: &UseStateHandle<String>) -> Callback<String> {
	let state = state.clone();
	Callback::from(move |value| state.set(value))
}

fn normalized_reason(input: &str) -> Option<String> {
	let trimmed = input.trim();
	match trimmed.is_empty() {
		true => None,
		false => Some(trimmed.to_owned()),
	}
}

// Independent of the join call: a broadcast failure is logged and otherwise ignored.
fn broadcast_emergency() {
	wasm_bindgen_futures::spawn_local(async {
		match api::emergency_alert().await {
			Ok(ack) => log::debug!(target: "emergency", "{}", ack.message),
			Err(err) => log::error!(target: "emergency", "broadcast failed: {err}"),
		}
	});
}

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct PriorityBadgeProps {
	pub priority: Priority,
}

#[function_component]
pub fn PriorityBadge(props: &PriorityBadgeProps) -> Html {
	html! {
		<Tag classes={props.priority.tag_class()}>{props.priority.label()}</Tag>
	}
}

#[function_component]
pub fn Dashboard() -> Html {
	let snapshot = use_state(|| Snapshot::default());
	let emergency_open = use_state(|| false);

	let new_user_name = use_state(|| String::new());
	let new_user_color = use_state(|| UserColor::Red);
	// One identity select backs both the join form and the rating form.
	let member_id = use_state(|| String::new());
	let join_priority = use_state(|| Priority::Work);
	let join_reason = use_state(|| String::new());
	let utility_name = use_state(|| String::new());
	let buyer_id = use_state(|| String::new());
	let rating_value = use_state(|| 5u8);
	let rating_comment = use_state(|| String::new());

	let refresh = {
		let snapshot = snapshot.clone();
		Callback::from(move |_: ()| {
			let snapshot = snapshot.clone();
			wasm_bindgen_futures::spawn_local(async move {
				let next = api::refresh((*snapshot).clone()).await;
				snapshot.set(next);
			});
		})
	};
	{
		let refresh = refresh.clone();
		use_mount(move || refresh.emit(()));
	}
	{
		let refresh = refresh.clone();
		use_interval(move || refresh.emit(()), REFRESH_MILLIS);
	}

	let create_user = {
		let new_user_name = new_user_name.clone();
		let new_user_color = new_user_color.clone();
		let refresh = refresh.clone();
		Callback::from(move |_| {
			let name = new_user_name.trim().to_owned();
			if name.is_empty() {
				alert("Enter a name first");
				return;
			}
			let payload = api::CreateUser {
				name,
				color: *new_user_color,
			};
			let new_user_name = new_user_name.clone();
			let refresh = refresh.clone();
			wasm_bindgen_futures::spawn_local(async move {
				match api::create_user(&payload).await {
					Ok(_) => {
						new_user_name.set(String::new());
						refresh.emit(());
					}
					Err(err) => alert(&err.user_message("Error creating user")),
				}
			});
		})
	};

	let join_queue = {
		let member_id = member_id.clone();
		let join_priority = join_priority.clone();
		let join_reason = join_reason.clone();
		let emergency_open = emergency_open.clone();
		let refresh = refresh.clone();
		Callback::from(move |_| {
			if member_id.is_empty() {
				alert("Select a user first");
				return;
			}
			let payload = api::JoinQueue {
				user_id: (*member_id).clone(),
				priority: *join_priority,
				reason: normalized_reason(&join_reason),
			};
			let join_reason = join_reason.clone();
			let emergency_open = emergency_open.clone();
			let refresh = refresh.clone();
			wasm_bindgen_futures::spawn_local(async move {
				match api::join_queue(&payload).await {
					Ok(entry) => {
						join_reason.set(String::new());
						if entry.priority == Priority::Emergency {
							emergency_open.set(true);
							broadcast_emergency();
						}
						refresh.emit(());
					}
					Err(err) => alert(&err.user_message("Error joining queue")),
				}
			});
		})
	};

	let start_entry: Callback<String> = {
		let refresh = refresh.clone();
		Callback::from(move |id: String| {
			let refresh = refresh.clone();
			wasm_bindgen_futures::spawn_local(async move {
				match api::start_entry(&id).await {
					Ok(_) => refresh.emit(()),
					Err(err) => alert(&err.user_message("Error starting bathroom use")),
				}
			});
		})
	};

	let complete_entry: Callback<String> = {
		let refresh = refresh.clone();
		Callback::from(move |id: String| {
			let refresh = refresh.clone();
			wasm_bindgen_futures::spawn_local(async move {
				match api::complete_entry(&id).await {
					Ok(_) => refresh.emit(()),
					Err(err) => alert(&err.user_message("Error completing bathroom use")),
				}
			});
		})
	};

	let submit_rating = {
		let member_id = member_id.clone();
		let rating_value = rating_value.clone();
		let rating_comment = rating_comment.clone();
		let refresh = refresh.clone();
		Callback::from(move |_| {
			if member_id.is_empty() {
				alert("Please select a user first");
				return;
			}
			let payload = api::RateHygiene {
				rated_by_user_id: (*member_id).clone(),
				rating: *rating_value,
				comment: normalized_reason(&rating_comment),
			};
			let rating_comment = rating_comment.clone();
			let refresh = refresh.clone();
			wasm_bindgen_futures::spawn_local(async move {
				match api::submit_rating(&payload).await {
					Ok(_) => {
						rating_comment.set(String::new());
						refresh.emit(());
					}
					Err(err) => alert(&err.user_message("Error submitting rating")),
				}
			});
		})
	};

	let add_utility = {
		let utility_name = utility_name.clone();
		let buyer_id = buyer_id.clone();
		let refresh = refresh.clone();
		Callback::from(move |_| {
			let name = utility_name.trim().to_owned();
			if name.is_empty() {
				alert("Enter a utility name first");
				return;
			}
			if buyer_id.is_empty() {
				alert("Please select who bought this item");
				return;
			}
			let payload = api::AddUtility {
				name,
				last_bought_by_user_id: (*buyer_id).clone(),
			};
			let utility_name = utility_name.clone();
			let refresh = refresh.clone();
			wasm_bindgen_futures::spawn_local(async move {
				match api::add_utility(&payload).await {
					Ok(_) => {
						utility_name.set(String::new());
						refresh.emit(());
					}
					Err(err) => alert(&err.user_message("Error adding utility")),
				}
			});
		})
	};

	let dismiss_emergency = {
		let emergency_open = emergency_open.clone();
		Callback::from(move |_| emergency_open.set(false))
	};

	let color_update = {
		let new_user_color = new_user_color.clone();
		Callback::from(move |value: String| {
			if let Some(color) = UserColor::from_id(&value) {
				new_user_color.set(color);
			}
		})
	};
	let priority_update = {
		let join_priority = join_priority.clone();
		Callback::from(move |value: String| {
			if let Some(priority) = Priority::from_id(&value) {
				join_priority.set(priority);
			}
		})
	};
	let pick_rating = {
		let rating_value = rating_value.clone();
		Callback::from(move |stars| rating_value.set(stars))
	};

	let user_options = |placeholder: &str, selected: &str| -> Html {
		html! {<>
			<option value="" selected={selected.is_empty()}>{placeholder}</option>
			{snapshot.users.iter().map(|user| html! {
				<option value={user.id.clone()} selected={selected == user.id}>{&user.name}</option>
			}).collect::<Vec<_>>()}
		</>}
	};

	let status_panel = match &snapshot.occupant {
		Some(occupant) => {
			let done = {
				let id = occupant.id.clone();
				complete_entry.reform(move |_| id.clone())
			};
			html! {
				<div class="is-flex is-flex-direction-column is-align-items-center">
					<Crewmate color={occupant.user_color} size={CrewmateSize::Large} on_toilet=true active=true />
					<p class="mt-5 has-text-weight-bold is-size-5">{&occupant.user_name}</p>
					<p class="has-text-grey">{"Using bathroom"}</p>
					<PriorityBadge priority={occupant.priority} />
					<Button classes={"is-success mt-3"} onclick={done}>{"✅ Done"}</Button>
				</div>
			}
		}
		None => html! {
			<div class="has-text-centered">
				<p style="font-size: 3rem;">{"🚽"}</p>
				<p class="has-text-success has-text-weight-bold is-size-5">{"Bathroom Available!"}</p>
			</div>
		},
	};

	let waiting_panel = match snapshot.queue.is_empty() {
		true => html! { <p class="has-text-grey has-text-centered">{"No one in queue"}</p> },
		false => html! {<>
			{snapshot.queue.iter().enumerate().map(|(position, entry)| {
				let start_control = match snapshot.can_start(position) {
					true => {
						let start = {
							let id = entry.id.clone();
							start_entry.reform(move |_| id.clone())
						};
						html! { <Button classes={"is-link is-small"} onclick={start}>{"Start Using"}</Button> }
					}
					false => html! {},
				};
				html! {
					<Level classes={"box py-3 mb-3"}>
						<LevelLeft>
							<LevelItem>
								<span class="has-text-weight-bold is-size-5">{format!("#{}", position + 1)}</span>
							</LevelItem>
							<LevelItem>
								<Crewmate color={entry.user_color} size={CrewmateSize::Small} />
							</LevelItem>
							<LevelItem>
								<div>
									<p class="has-text-weight-bold">{&entry.user_name}</p>
									<PriorityBadge priority={entry.priority} />
									{entry.reason.as_ref().map(|reason| html! {
										<p class="is-size-7 has-text-grey">{reason}</p>
									}).unwrap_or_default()}
								</div>
							</LevelItem>
						</LevelLeft>
						<LevelRight>
							<LevelItem>{start_control}</LevelItem>
						</LevelRight>
					</Level>
				}
			}).collect::<Vec<_>>()}
		</>},
	};

	let completed_panel = html! {<>
		{snapshot.recent_completed().iter().map(|entry| html! {
			<Level classes={"box py-2 mb-3 has-background-success-light"}>
				<LevelLeft>
					<LevelItem>
						<Crewmate color={entry.user_color} size={CrewmateSize::Small} />
					</LevelItem>
					<LevelItem>
						<div>
							<p class="has-text-weight-bold">{&entry.user_name}</p>
							<p class="is-size-7 has-text-grey">{clock_time(&entry.completed_at)}</p>
						</div>
					</LevelItem>
				</LevelLeft>
			</Level>
		}).collect::<Vec<_>>()}
	</>};

	let utilities_panel = html! {<>
		{snapshot.recent_utilities().iter().map(|utility| html! {
			<div class="box py-3 mb-3">
				<p class="has-text-weight-bold">{&utility.name}</p>
				<p class="is-size-7 has-text-grey">
					{"Last bought by: "}<strong>{&utility.last_bought_by_name}</strong>
				</p>
				<p class="is-size-7 has-text-grey">{"Date: "}{calendar_date(&utility.last_bought_date)}</p>
				{utility.next_buyer_name.as_ref().map(|next| html! {
					<p class="is-size-7 has-text-success">{"Next buyer: "}<strong>{next}</strong></p>
				}).unwrap_or_default()}
			</div>
		}).collect::<Vec<_>>()}
	</>};

	let roster_panel = html! {
		<div class="is-flex is-flex-wrap-wrap" style="gap: 1rem;">
			{snapshot.users.iter().map(|user| html! {
				<Level classes={"box py-2 px-3 mb-0"}>
					<LevelItem>
						<Crewmate color={user.color} size={CrewmateSize::Small} />
					</LevelItem>
					<LevelItem>
						<span class="has-text-weight-bold ml-2">{&user.name}</span>
					</LevelItem>
					<LevelItem>
						<span style={format!("width: 16px; height: 16px; border-radius: 9999px; background-color: {};", user.color.hex())} />
					</LevelItem>
				</Level>
			}).collect::<Vec<_>>()}
		</div>
	};

	let latest_rating_panel = match snapshot.latest_rating() {
		Some(rating) => html! {
			<ybc::Box classes={"mt-5"}>
				<Title classes={"is-5"}>{"🧽 Latest Hygiene Rating"}</Title>
				<p>
					<span class="has-text-weight-bold mr-2">{&rating.rated_by_name}</span>
					<span class="mr-2">{"rated:"}</span>
					<Stars rating={rating.rating} />
				</p>
				{rating.comment.as_ref().map(|comment| html! {
					<p class="is-italic has-text-grey">{format!("\"{comment}\"")}</p>
				}).unwrap_or_default()}
				<p class="is-size-7 has-text-grey mt-2">{date_and_time(&rating.created_at)}</p>
			</ybc::Box>
		},
		None => html! {},
	};

	html! {<>
		<EmergencyModal open={*emergency_open} on_dismiss={dismiss_emergency} />
		<Section>
			<Container>
				<Title classes={"has-text-centered"}>{"🚽 Bathroom Queue Manager"}</Title>

				<ybc::Box>
					<Title classes={"is-4 has-text-centered"}>{"Bathroom Status"}</Title>
					{status_panel}
				</ybc::Box>

				<Columns>
					<Column>
						<ybc::Box>
							<Title classes={"is-5"}>{"🕒 Waiting Queue"}</Title>
							{waiting_panel}
						</ybc::Box>
					</Column>
					<Column>
						<ybc::Box>
							<Title classes={"is-5"}>{"✅ Recently Completed"}</Title>
							{completed_panel}
						</ybc::Box>
					</Column>
				</Columns>

				<Columns>
					<Column>
						<ybc::Box>
							<Title classes={"is-5"}>{"👥 Add Roommate"}</Title>
							<Field>
								<Control>
									<Input
										name="name" value={(*new_user_name).clone()}
										update={text_update(&new_user_name)}
										r#type={InputType::Text}
										placeholder={"Name"}
									/>
								</Control>
							</Field>
							<Field>
								<Control>
									<Select name="color" value={new_user_color.id().to_owned()} update={color_update}>
										{UserColor::ALL.iter().map(|color| html! {
											<option value={color.id()} selected={*new_user_color == *color}>{color.label()}</option>
										}).collect::<Vec<_>>()}
									</Select>
								</Control>
							</Field>
							<Button classes={"is-link is-fullwidth"} onclick={create_user}>{"Add User"}</Button>
						</ybc::Box>
					</Column>
					<Column>
						<ybc::Box>
							<Title classes={"is-5"}>{"🏃 Join Queue"}</Title>
							<Field>
								<Control>
									<Select name="user" value={(*member_id).clone()} update={text_update(&member_id)}>
										{user_options("Select User", &member_id)}
									</Select>
								</Control>
							</Field>
							<Field>
								<Control>
									<Select name="priority" value={join_priority.id().to_owned()} update={priority_update}>
										{Priority::ALL.iter().map(|priority| html! {
											<option value={priority.id()} selected={*join_priority == *priority}>{priority.label()}</option>
										}).collect::<Vec<_>>()}
									</Select>
								</Control>
							</Field>
							<Field>
								<Control>
									<Input
										name="reason" value={(*join_reason).clone()}
										update={text_update(&join_reason)}
										r#type={InputType::Text}
										placeholder={"Reason (optional)"}
									/>
								</Control>
							</Field>
							<Button classes={"is-success is-fullwidth"} onclick={join_queue}>{"Join Queue"}</Button>
						</ybc::Box>
					</Column>
					<Column>
						<ybc::Box>
							<Title classes={"is-5"}>{"⭐ Rate Hygiene"}</Title>
							<Field>
								<Control>
									<Select name="rated_by" value={(*member_id).clone()} update={text_update(&member_id)}>
										{user_options("Who are you?", &member_id)}
									</Select>
								</Control>
							</Field>
							<Field>
								<Control>
									<span class="mr-2">{"Rating:"}</span>
									<StarPicker value={*rating_value} on_pick={pick_rating} />
								</Control>
							</Field>
							<Field>
								<Control>
									<TextArea
										name="comment" value={(*rating_comment).clone()}
										update={text_update(&rating_comment)}
										placeholder={"Comment (optional)"}
									/>
								</Control>
							</Field>
							<Button classes={"is-warning is-fullwidth"} onclick={submit_rating}>{"Submit Rating"}</Button>
						</ybc::Box>
					</Column>
				</Columns>

				<Columns>
					<Column>
						<ybc::Box>
							<Title classes={"is-5"}>{"🧽 Add Bathroom Utility"}</Title>
							<Field>
								<Control>
									<Input
										name="utility" value={(*utility_name).clone()}
										update={text_update(&utility_name)}
										r#type={InputType::Text}
										placeholder={"Utility name (e.g., Toilet Paper, Soap)"}
									/>
								</Control>
							</Field>
							<Field>
								<Control>
									<Select name="buyer" value={(*buyer_id).clone()} update={text_update(&buyer_id)}>
										{user_options("Who bought this?", &buyer_id)}
									</Select>
								</Control>
							</Field>
							<Button classes={"is-primary is-fullwidth"} onclick={add_utility}>{"Add Utility"}</Button>
						</ybc::Box>
					</Column>
					<Column>
						<ybc::Box>
							<Title classes={"is-5"}>{"🧴 Bathroom Utilities"}</Title>
							{utilities_panel}
						</ybc::Box>
					</Column>
				</Columns>

				<ybc::Box>
					<Title classes={"is-5"}>{"👥 Current Roommates"}</Title>
					{roster_panel}
				</ybc::Box>

				{latest_rating_panel}
				<Subtitle classes={"is-7 has-text-grey has-text-centered mt-5"}>
					{"Data refreshes every 10 seconds"}
				</Subtitle>
			</Container>
		</Section>
	</>}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_reasons_become_none() {
		assert_eq!(normalized_reason(""), None);
		assert_eq!(normalized_reason("   "), None);
		assert_eq!(normalized_reason(" quick "), Some("quick".to_owned()));
	}
}
