pub mod api;
pub mod components;
pub mod data;

#[cfg(target_family = "wasm")]
fn main() {
	wasm_logger::init(wasm_logger::Config::default());
	yew::Renderer::<components::Dashboard>::new().render();
}

#[cfg(not(target_family = "wasm"))]
fn main() {}
