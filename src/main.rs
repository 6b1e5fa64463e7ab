use driftfield::Backdrop;

fn main() {
    env_logger::init();

    // No portable OS query exists for this; honor an environment override.
    let reduce_motion = std::env::var("DRIFTFIELD_REDUCE_MOTION")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if let Err(err) = Backdrop::new().with_reduced_motion(reduce_motion).run() {
        log::error!("backdrop exited: {err}");
        std::process::exit(1);
    }
}
