//=========================================================================
// poly: engine binary
//=========================================================================

use log::error;
use poly_engine::EngineBuilder;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = EngineBuilder::new().build().run() {
        error!(target: "engine", "{}", err);
        std::process::exit(1);
    }
}
