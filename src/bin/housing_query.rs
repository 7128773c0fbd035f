use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let stdout = std::io::stdout();
    housing_trends::cli::run_query_cli(
        std::env::args().skip(1),
        housing_trends::cli::load_snapshot,
        &mut stdout.lock(),
    )
}
