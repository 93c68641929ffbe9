use curio::app::App;

fn main() {
    curio::logging::init();
    leptos::mount::mount_to_body(App);
}
