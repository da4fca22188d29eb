use ybc::{Button, Title};
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Properties)]
pub struct EmergencyModalProps {
	pub open: bool,
	pub on_dismiss: Callback<()>,
}

/// Full-screen overlay raised when someone joins the queue with the
/// emergency priority. Only an explicit dismissal closes it.
#[function_component]
pub fn EmergencyModal(props: &EmergencyModalProps) -> Html {
	if !props.open {
		return html! {
			<div class={"modal"} id="emergency-modal" />
		};
	}

	let dismiss = props.on_dismiss.reform(|_| ());
	html! {
		<div class={"modal is-active"} id="emergency-modal">
			<div class="modal-background" style="background-color: rgba(220, 38, 38, 0.9);" />
			<div class="modal-content">
				<ybc::Box classes={"has-text-centered"}>
					<p style="font-size: 4rem;">{"🚨"}</p>
					<Title classes={"has-text-danger"}>{"EMERGENCY!"}</Title>
					<p class="mb-5">{"Someone needs the bathroom urgently!"}</p>
					<Button classes={"is-danger"} onclick={dismiss}>{"OK, GOT IT!"}</Button>
				</ybc::Box>
			</div>
		</div>
	}
}
