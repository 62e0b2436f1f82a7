mod config;
mod crm;
mod form;
mod lead;
mod page;

fn main() {
    yew::Renderer::<page::App>::new().render();
}
