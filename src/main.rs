use azure_e2e_toolkit::output::print_summary;
use azure_e2e_toolkit::{reconcile_skip_list, write_skip_outputs};
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();

    log::info!("#Start main()");

    let skip_path = PathBuf::from(env_or("SKIP_FILE", "skip.txt"));
    let junit_dir = PathBuf::from(env_or("JUNIT_DIR", "."));
    let out_dir = PathBuf::from(env_or("SKIP_OUT_DIR", "."));
    let if_second = matches!(env_or("SECOND_PASS", "false").as_str(), "1" | "true");

    let (outcome, line_ending) = reconcile_skip_list(&skip_path, &junit_dir, if_second)
        .expect("Error reconciling skip list");
    write_skip_outputs(&out_dir, &outcome, line_ending).expect("Error writing skip outputs");

    print_summary(&outcome);

    Ok(())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
