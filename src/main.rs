use std::error::Error;

mod app;
mod ui;

fn main() -> Result<(), Box<dyn Error>> {
    app::run()
}
