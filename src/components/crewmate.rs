use crate::data::UserColor;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrewmateSize {
	Small,
	#[default]
	Normal,
	Large,
}

impl CrewmateSize {
	// Sprite footprint in pixels (width, height).
	fn dimensions(&self) -> (u32, u32) {
		match self {
			Self::Small => (32, 48),
			Self::Normal => (48, 64),
			Self::Large => (64, 80),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct CrewmateProps {
	pub color: UserColor,
	#[prop_or_default]
	pub size: CrewmateSize,
	#[prop_or_default]
	pub on_toilet: bool,
	#[prop_or_default]
	pub active: bool,
}

/// Little crew-member sprite, tinted by the user's claimed color.
#[function_component]
pub fn Crewmate(props: &CrewmateProps) -> Html {
	let (width, height) = props.size.dimensions();
	let opacity = match props.active {
		true => "1.0",
		false => "0.7",
	};
	let frame_style = format!(
		"position: relative; width: {width}px; height: {height}px; opacity: {opacity}; transition: opacity 0.3s;"
	);
	let body_style = format!(
		"position: relative; width: {width}px; height: {height}px; border-radius: 9999px; \
		box-shadow: 0 2px 6px rgba(0,0,0,0.3); background-color: {};",
		props.color.hex()
	);
	let visor_style = format!(
		"position: absolute; top: 4px; left: 50%; transform: translateX(-50%); \
		width: {}px; height: {}px; border-radius: 9999px; background-color: #bfdbfe; opacity: 0.8;",
		width * 2 / 3,
		height / 5
	);
	let backpack_style = format!(
		"position: absolute; right: -4px; top: 8px; width: {}px; height: {}px; \
		border-radius: 4px; opacity: 0.9; background-color: {};",
		width / 5,
		height / 4,
		props.color.hex()
	);
	let leg_style = format!(
		"display: inline-block; width: {}px; height: {}px; margin: 0 1px; \
		border-radius: 9999px; background-color: {};",
		width / 5,
		height / 6,
		props.color.hex()
	);

	let legs = match props.on_toilet {
		// Legs are hidden while seated.
		true => html! {},
		false => html! {
			<div style="position: absolute; bottom: -8px; left: 50%; transform: translateX(-50%); white-space: nowrap;">
				<span style={leg_style.clone()} />
				<span style={leg_style} />
			</div>
		},
	};
	let toilet = match props.on_toilet {
		true => html! {
			<div style="position: absolute; bottom: -16px; left: 50%; transform: translateX(-50%);">
				<div style="width: 40px; height: 24px; background-color: #ffffff; border: 2px solid #d1d5db; border-radius: 8px;" />
			</div>
		},
		false => html! {},
	};
	let steam = match props.on_toilet {
		true => html! {
			<div style="position: absolute; top: -12px; left: 50%; transform: translateX(-50%);">
				{"💨"}
			</div>
		},
		false => html! {},
	};

	html! {
		<div style={frame_style}>
			<div style={body_style}>
				<div style={visor_style} />
				<div style={backpack_style} />
				{legs}
			</div>
			{toilet}
			{steam}
		</div>
	}
}
