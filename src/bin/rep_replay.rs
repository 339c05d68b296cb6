use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use rep_matcher::config::Config;
use rep_matcher::pose::load_reference;
use rep_matcher::session::RepSession;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Usage: rep_replay <live.json> [reference.json|-] [config.toml]
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!("usage: {} <live.json> [reference.json|-] [config.toml]", args[0]);
    }
    let live_path = &args[1];
    let reference_path = args.get(2).filter(|p| p.as_str() != "-");
    let config_path = args.get(3).map(String::as_str).unwrap_or(CONFIG_PATH);

    let config = Config::load_or_default(config_path);
    let matcher = &config.matcher;

    println!("=== Rep Replay ===");
    println!("Live: {}", live_path);
    println!("Reference: {}", reference_path.map(String::as_str).unwrap_or("(practice mode)"));
    println!(
        "Matcher: threshold={}, key_frames={}, throttle={}ms, buffer={}",
        matcher.match_threshold, matcher.key_frames, matcher.throttle_ms, matcher.max_buffer_frames
    );
    println!();

    // an unreadable reference means practice mode
    let reference = match reference_path {
        Some(path) => match load_reference(path) {
            Ok(frames) => Some(frames),
            Err(e) => {
                println!("Reference unavailable ({:#}), practice mode", e);
                None
            }
        },
        None => None,
    };
    let live = load_reference(live_path)?;

    let mut session = RepSession::new(matcher.clone(), reference);
    let total = live.len();
    let mut accepted = 0;
    for frame in live {
        // recorded timestamps stand in for arrival times
        let arrival_ms = frame.timestamp;
        if session.ingest(frame, arrival_ms) {
            accepted += 1;
        }
    }
    println!("Frames: {} recorded, {} accepted, {} buffered", total, accepted, session.buffered());

    let result = session.complete_rep();
    let stats = session.stats();

    println!("Result: {}", serde_json::to_string(&result)?);
    println!("Correct reps: {}/{}", stats.correct_reps, stats.attempted_reps);
    Ok(())
}
