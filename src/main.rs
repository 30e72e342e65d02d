use log::error;
use timetable_solver::{TimetableRequest, server, solve_timetable};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // `timetable_solver <request.json>` solves once and prints the result;
    // without arguments the HTTP server starts
    let outcome = match std::env::args().nth(1) {
        Some(path) => solve_file(&path),
        None => server::run_server().await.map_err(|e| format!("server stopped: {e}")),
    };
    if let Err(e) = outcome {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn solve_file(path: &str) -> Result<(), String> {
    let raw = std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let request: TimetableRequest =
        serde_json::from_str(&raw).map_err(|e| format!("invalid request in {path}: {e}"))?;
    let result = solve_timetable(&request).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
