use yew::prelude::*;

pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct StarsProps {
	pub rating: u8,
}

/// Read-only 1-5 star row.
#[function_component]
pub fn Stars(props: &StarsProps) -> Html {
	html! {
		<span>
			{(1..=MAX_RATING).map(|star| {
				let classes = match star <= props.rating {
					true => "has-text-warning",
					false => "has-text-grey-light",
				};
				html! { <span class={classes}>{"⭐"}</span> }
			}).collect::<Vec<_>>()}
		</span>
	}
}

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct StarPickerProps {
	pub value: u8,
	pub on_pick: Callback<u8>,
}

#[function_component]
pub fn StarPicker(props: &StarPickerProps) -> Html {
	html! {
		<span>
			{(1..=MAX_RATING).map(|star| {
				let classes = match star <= props.value {
					true => "button is-ghost px-1 has-text-warning",
					false => "button is-ghost px-1 has-text-grey-light",
				};
				let onclick = props.on_pick.reform(move |_| star);
				html! { <button type="button" class={classes} {onclick}>{"⭐"}</button> }
			}).collect::<Vec<_>>()}
		</span>
	}
}
